use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use kernel::model::{
    id::{OwnerId, PetId, ReservationId, ServiceId, StaffId},
    reservation::Reservation,
};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub service_type: String,
    pub service_id: ServiceId,
    pub reservation_date: NaiveDate,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub pet_id: Option<PetId>,
    pub owner_id: OwnerId,
    pub staff_id: Option<StaffId>,
    pub owner_name: String,
    pub phone: String,
    pub email: String,
    pub pet_name: String,
    pub pickup_option: String,
    pub pickup_time: Option<String>,
    pub grooming_options: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            reservation_id,
            service_type,
            service_id,
            reservation_date,
            start_time,
            end_time,
            pet_id,
            owner_id,
            staff_id,
            owner_name,
            phone,
            email,
            pet_name,
            pickup_option,
            pickup_time,
            grooming_options,
            notes,
            status,
            created_at,
        } = value;
        Ok(Reservation {
            reservation_id,
            service_type: parse_stored(&service_type)?,
            service_id,
            date: reservation_date,
            start_time,
            end_time,
            pet_id,
            owner_id,
            staff_id,
            owner_name,
            phone,
            email,
            pet_name,
            pickup_option: parse_stored(&pickup_option)?,
            pickup_time,
            grooming_options,
            notes,
            status: parse_stored(&status)?,
            created_at,
        })
    }
}

fn parse_stored<T>(raw: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| AppError::ConversionEntityError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::reservation::{PickupOption, ReservationStatus};
    use kernel::model::service::ServiceType;

    fn row() -> ReservationRow {
        ReservationRow {
            reservation_id: ReservationId::new(),
            service_type: "DAYCARE".into(),
            service_id: ServiceId::new(),
            reservation_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            start_time: None,
            end_time: None,
            pet_id: Some(PetId::new()),
            owner_id: OwnerId::new(),
            staff_id: None,
            owner_name: "Taro Test".into(),
            phone: "090-0000-0000".into(),
            email: "test@example.com".into(),
            pet_name: "Pochi".into(),
            pickup_option: "NO".into(),
            pickup_time: None,
            grooming_options: None,
            notes: None,
            status: "CONFIRMED".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn reservation_row_converts_enums_from_stored_text() {
        let reservation = Reservation::try_from(row()).unwrap();
        assert_eq!(reservation.service_type, ServiceType::Daycare);
        assert_eq!(reservation.pickup_option, PickupOption::No);
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
    }

    #[test]
    fn corrupt_status_text_is_a_conversion_error() {
        let mut corrupt = row();
        corrupt.status = "PENDING".into();
        assert!(matches!(
            Reservation::try_from(corrupt),
            Err(AppError::ConversionEntityError(_))
        ));
    }
}
