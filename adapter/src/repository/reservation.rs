use crate::database::{model::reservation::ReservationRow, ConnectionPool};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use derive_new::new;
use kernel::model::{
    id::{OwnerId, PetId, ReservationId, ServiceId, StaffId},
    reservation::{event::CreateReservation, Reservation, ReservationStatus},
    service::ServiceType,
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation> {
        // A conflicting concurrent commit aborts the serializable
        // transaction with SQLSTATE 40001. One retry re-runs the in-store
        // guards, which then report the precise domain error instead.
        let mut result = self.try_create(&event).await;
        if result
            .as_ref()
            .is_err_and(|e| is_serialization_failure(e))
        {
            tracing::debug!(
                service_id = %event.service_id,
                "serializable commit conflicted, retrying once"
            );
            result = self.try_create(&event).await;
        }
        result
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        let row: Option<ReservationRow> = sqlx::query_as(
            r#"
            SELECT
                reservation_id, service_type, service_id, reservation_date,
                start_time, end_time, pet_id, owner_id, staff_id,
                owner_name, phone, email, pet_name,
                pickup_option, pickup_time, grooming_options, notes,
                status, created_at
            FROM reservations
            WHERE reservation_id = $1
            "#,
        )
        .bind(reservation_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Reservation::try_from).transpose()
    }

    async fn find_by_owner_id(&self, owner_id: OwnerId) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
            SELECT
                reservation_id, service_type, service_id, reservation_date,
                start_time, end_time, pet_id, owner_id, staff_id,
                owner_name, phone, email, pet_name,
                pickup_option, pickup_time, grooming_options, notes,
                status, created_at
            FROM reservations
            WHERE owner_id = $1
            ORDER BY reservation_date DESC, created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn count_active_on(&self, service_id: ServiceId, date: NaiveDate) -> AppResult<i64> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM reservations
            WHERE service_id = $1
              AND reservation_date = $2
              AND status <> 'CANCELLED'
            "#,
        )
        .bind(service_id)
        .bind(date)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_active_by_pet_on(
        &self,
        pet_id: PetId,
        service_id: ServiceId,
        date: NaiveDate,
    ) -> AppResult<Option<Reservation>> {
        let row: Option<ReservationRow> = sqlx::query_as(
            r#"
            SELECT
                reservation_id, service_type, service_id, reservation_date,
                start_time, end_time, pet_id, owner_id, staff_id,
                owner_name, phone, email, pet_name,
                pickup_option, pickup_time, grooming_options, notes,
                status, created_at
            FROM reservations
            WHERE pet_id = $1
              AND service_id = $2
              AND reservation_date = $3
              AND status <> 'CANCELLED'
            LIMIT 1
            "#,
        )
        .bind(pet_id)
        .bind(service_id)
        .bind(date)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Reservation::try_from).transpose()
    }

    async fn find_active_by_staff_at(
        &self,
        staff_id: StaffId,
        date: NaiveDate,
        start_time: Option<NaiveDateTime>,
    ) -> AppResult<Option<Reservation>> {
        // IS NOT DISTINCT FROM so that a NULL start time still occupies
        // exactly one (staff, date) slot.
        let row: Option<ReservationRow> = sqlx::query_as(
            r#"
            SELECT
                reservation_id, service_type, service_id, reservation_date,
                start_time, end_time, pet_id, owner_id, staff_id,
                owner_name, phone, email, pet_name,
                pickup_option, pickup_time, grooming_options, notes,
                status, created_at
            FROM reservations
            WHERE staff_id = $1
              AND reservation_date = $2
              AND start_time IS NOT DISTINCT FROM $3
              AND status <> 'CANCELLED'
            LIMIT 1
            "#,
        )
        .bind(staff_id)
        .bind(date)
        .bind(start_time)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Reservation::try_from).transpose()
    }

    async fn cancel(&self, reservation_id: ReservationId) -> AppResult<()> {
        let res = sqlx::query(
            r#"
            UPDATE reservations
            SET status = 'CANCELLED'
            WHERE reservation_id = $1
            "#,
        )
        .bind(reservation_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified reservation not found".into(),
            ));
        }

        Ok(())
    }
}

impl ReservationRepositoryImpl {
    async fn try_create(&self, event: &CreateReservation) -> AppResult<Reservation> {
        let mut tx = self.db.begin().await?;

        self.set_transaction_serializable(&mut tx).await?;

        // The handler pipeline already ran these guards, but its reads raced
        // other requests. Re-running them here, inside the serializable
        // transaction, makes the store the authoritative guard.
        {
            let capacity: Option<i32> =
                sqlx::query_scalar("SELECT capacity FROM services WHERE service_id = $1")
                    .bind(event.service_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;

            let Some(capacity) = capacity else {
                return Err(AppError::ServiceNotFound);
            };

            let active: i64 = sqlx::query_scalar(
                r#"
                SELECT COUNT(*)
                FROM reservations
                WHERE service_id = $1
                  AND reservation_date = $2
                  AND status <> 'CANCELLED'
                "#,
            )
            .bind(event.service_id)
            .bind(event.date)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if active >= i64::from(capacity) {
                return Err(AppError::CapacityExceeded);
            }

            if let Some(pet_id) = event.pet_id {
                let duplicate: Option<ReservationId> = sqlx::query_scalar(
                    r#"
                    SELECT reservation_id
                    FROM reservations
                    WHERE pet_id = $1
                      AND service_id = $2
                      AND reservation_date = $3
                      AND status <> 'CANCELLED'
                    LIMIT 1
                    "#,
                )
                .bind(pet_id)
                .bind(event.service_id)
                .bind(event.date)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

                if duplicate.is_some() {
                    return Err(AppError::DuplicateBooking);
                }
            }

            if event.service_type == ServiceType::Grooming {
                if let Some(staff_id) = event.staff_id {
                    let held: Option<ReservationId> = sqlx::query_scalar(
                        r#"
                        SELECT reservation_id
                        FROM reservations
                        WHERE staff_id = $1
                          AND reservation_date = $2
                          AND start_time IS NOT DISTINCT FROM $3
                          AND status <> 'CANCELLED'
                        LIMIT 1
                        "#,
                    )
                    .bind(staff_id)
                    .bind(event.date)
                    .bind(event.start_time)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;

                    if held.is_some() {
                        return Err(AppError::StaffUnavailable);
                    }
                }
            }
        }

        let reservation_id = ReservationId::new();
        let created_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
            INSERT INTO reservations
                (reservation_id, service_type, service_id, reservation_date,
                 start_time, end_time, pet_id, owner_id, staff_id,
                 owner_name, phone, email, pet_name,
                 pickup_option, pickup_time, grooming_options, notes, status)
            VALUES
                ($1, $2, $3, $4, $5, $6, $7, $8, $9,
                 $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING created_at
            "#,
        )
        .bind(reservation_id)
        .bind(event.service_type.to_string())
        .bind(event.service_id)
        .bind(event.date)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(event.pet_id)
        .bind(event.owner_id)
        .bind(event.staff_id)
        .bind(&event.owner_name)
        .bind(&event.phone)
        .bind(&event.email)
        .bind(&event.pet_name)
        .bind(event.pickup_option.to_string())
        .bind(&event.pickup_time)
        .bind(&event.grooming_options)
        .bind(&event.notes)
        .bind(ReservationStatus::Confirmed.to_string())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_insert_error)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(Reservation {
            reservation_id,
            service_type: event.service_type,
            service_id: event.service_id,
            date: event.date,
            start_time: event.start_time,
            end_time: event.end_time,
            pet_id: event.pet_id,
            owner_id: event.owner_id,
            staff_id: event.staff_id,
            owner_name: event.owner_name.clone(),
            phone: event.phone.clone(),
            email: event.email.clone(),
            pet_name: event.pet_name.clone(),
            pickup_option: event.pickup_option,
            pickup_time: event.pickup_time.clone(),
            grooming_options: event.grooming_options.clone(),
            notes: event.notes.clone(),
            status: ReservationStatus::Confirmed,
            created_at,
        })
    }

    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}

/// The partial unique indexes on reservations are the final word on the
/// duplicate and staff-slot rules. A violation that slips past the
/// in-transaction checks is still reported as the matching domain error.
fn map_insert_error(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.code().as_deref() == Some("23505") {
            return match db_err.constraint() {
                Some("uq_reservations_pet_service_date") => AppError::DuplicateBooking,
                Some("uq_reservations_staff_slot") => AppError::StaffUnavailable,
                _ => AppError::SpecificOperationError(e),
            };
        }
    }
    AppError::SpecificOperationError(e)
}

fn is_serialization_failure(e: &AppError) -> bool {
    let (AppError::TransactionError(inner) | AppError::SpecificOperationError(inner)) = e else {
        return false;
    };
    inner
        .as_database_error()
        .and_then(|d| d.code())
        .is_some_and(|code| code == "40001")
}
