use crate::model::reservation::Reservation;
use async_trait::async_trait;
use shared::error::AppResult;

/// Post-commit notification sink. Both dispatches are best-effort with at
/// most one attempt; a failure never affects the committed reservation.
#[async_trait]
pub trait ReservationNotifier: Send + Sync {
    /// Confirmation mail to the requester.
    async fn send_confirmation(&self, reservation: &Reservation) -> AppResult<()>;

    /// New-booking alert to the operations staff.
    async fn send_operator_alert(&self, reservation: &Reservation) -> AppResult<()>;
}
