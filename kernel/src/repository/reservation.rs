use crate::model::{
    id::{OwnerId, PetId, ReservationId, ServiceId, StaffId},
    reservation::{event::CreateReservation, Reservation},
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use shared::error::AppResult;

/// Store operations backing the booking guard pipeline. The lookup/count
/// methods only ever consider non-cancelled reservations; cancelled rows are
/// invisible to every guard.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persist a request that passed all guards, with status CONFIRMED and a
    /// store-assigned id and creation timestamp.
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation>;

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>>;

    async fn find_by_owner_id(&self, owner_id: OwnerId) -> AppResult<Vec<Reservation>>;

    /// Number of active reservations for a (service, date) pair.
    async fn count_active_on(&self, service_id: ServiceId, date: NaiveDate) -> AppResult<i64>;

    /// First active reservation for a (pet, service, date) triple, if any.
    async fn find_active_by_pet_on(
        &self,
        pet_id: PetId,
        service_id: ServiceId,
        date: NaiveDate,
    ) -> AppResult<Option<Reservation>>;

    /// First active reservation holding a (staff, date, start time) slot,
    /// if any.
    async fn find_active_by_staff_at(
        &self,
        staff_id: StaffId,
        date: NaiveDate,
        start_time: Option<NaiveDateTime>,
    ) -> AppResult<Option<Reservation>>;

    /// Mark a reservation CANCELLED, releasing its capacity slot.
    async fn cancel(&self, reservation_id: ReservationId) -> AppResult<()>;
}
