use crate::extractor::AppJson;
use crate::model::reservation::{
    CreateReservationRequest, ReservationListQuery, ReservationResponse, ReservationsResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::{
    id::ReservationId, reservation::event::CreateReservation, service::ServiceType,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

/// The booking decision pipeline. Guards run in a fixed order and the first
/// violated rule is the one reported; nothing is written until every guard
/// has passed. Do not reorder the guards: clients depend on which error
/// wins when several rules are violated at once.
pub async fn create_reservation(
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<CreateReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate(&())?;

    let event = CreateReservation::from(req);

    // 1. Vaccination guard. For a registered pet the stored record is
    //    authoritative and must agree with the caller's assertion; an
    //    unregistered pet has no record, so the assertion stands alone.
    match event.pet_id {
        Some(pet_id) => {
            let pet = registry
                .pet_repository()
                .find_by_id(pet_id)
                .await?
                .ok_or(AppError::PetNotFound)?;

            if !event.vaccines_up_to_date || !pet.vaccines_up_to_date {
                return Err(AppError::VaccinationNotCurrent);
            }
        }
        None => {
            if !event.vaccines_up_to_date {
                return Err(AppError::VaccinationNotCurrent);
            }
        }
    }

    // 2. Service existence guard.
    let service = registry
        .service_repository()
        .find_by_id(event.service_id)
        .await?
        .ok_or(AppError::ServiceNotFound)?;

    // 3. Capacity guard.
    let active = registry
        .reservation_repository()
        .count_active_on(event.service_id, event.date)
        .await?;

    if active >= i64::from(service.capacity) {
        return Err(AppError::CapacityExceeded);
    }

    // 4. Duplicate guard. Skipped for unregistered pets, which have no
    //    stable identity to deduplicate against.
    if let Some(pet_id) = event.pet_id {
        let existing = registry
            .reservation_repository()
            .find_active_by_pet_on(pet_id, event.service_id, event.date)
            .await?;

        if existing.is_some() {
            return Err(AppError::DuplicateBooking);
        }
    }

    // 5. Staff availability guard, grooming only.
    if event.service_type == ServiceType::Grooming {
        if let Some(staff_id) = event.staff_id {
            let held = registry
                .reservation_repository()
                .find_active_by_staff_at(staff_id, event.date, event.start_time)
                .await?;

            if held.is_some() {
                return Err(AppError::StaffUnavailable);
            }
        }
    }

    let reservation = registry.reservation_repository().create(event).await?;

    // Post-commit side effects: two independent best-effort dispatches.
    // Neither can fail the booking that already happened, and neither
    // shares a failure signal with the other.
    let notifier = registry.notifier();
    let confirmed = reservation.clone();
    tokio::spawn(async move {
        if let Err(e) = notifier.send_confirmation(&confirmed).await {
            tracing::warn!(
                error = %e,
                reservation_id = %confirmed.reservation_id,
                "failed to send confirmation mail"
            );
        }
    });

    let notifier = registry.notifier();
    let alerted = reservation.clone();
    tokio::spawn(async move {
        if let Err(e) = notifier.send_operator_alert(&alerted).await {
            tracing::warn!(
                error = %e,
                reservation_id = %alerted.reservation_id,
                "failed to send operator alert"
            );
        }
    });

    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse::from(reservation)),
    ))
}

pub async fn show_reservation(
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await
        .and_then(|reservation| match reservation {
            Some(reservation) => Ok(Json(reservation.into())),
            None => Err(AppError::EntityNotFound("Reservation not found".into())),
        })
}

pub async fn show_owner_reservation_list(
    Query(query): Query<ReservationListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    registry
        .reservation_repository()
        .find_by_owner_id(query.owner_id)
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

pub async fn cancel_reservation(
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .reservation_repository()
        .cancel(reservation_id)
        .await
        .map(|_| StatusCode::OK)
}
