use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{OwnerId, PetId, ReservationId, ServiceId, StaffId},
    reservation::{event::CreateReservation, PickupOption, Reservation, ReservationStatus},
    service::ServiceType,
};
use serde::{Deserialize, Serialize};

/// The raw booking request. Typed fields make serde the structural
/// validator: an unparsable date, time, id or enum value rejects the
/// request before any guard runs. The garde rules cover the semantic
/// field checks on top of that.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[garde(skip)]
    pub service_type: ServiceType,
    #[garde(skip)]
    pub service_id: ServiceId,
    #[garde(skip)]
    pub date: NaiveDate,
    #[garde(skip)]
    pub start_time: Option<NaiveDateTime>,
    #[garde(skip)]
    pub end_time: Option<NaiveDateTime>,
    #[garde(skip)]
    pub pet_id: Option<PetId>,
    #[garde(skip)]
    pub owner_id: OwnerId,
    #[garde(skip)]
    pub staff_id: Option<StaffId>,
    #[garde(skip)]
    pub vaccines_up_to_date: bool,
    #[garde(length(min = 1))]
    pub owner_name: String,
    #[garde(length(min = 1))]
    pub phone: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1))]
    pub pet_name: String,
    #[garde(skip)]
    pub pickup_option: PickupOption,
    #[garde(skip)]
    pub pickup_time: Option<String>,
    #[garde(skip)]
    pub grooming_options: Option<String>,
    #[garde(skip)]
    pub notes: Option<String>,
}

impl From<CreateReservationRequest> for CreateReservation {
    fn from(value: CreateReservationRequest) -> Self {
        let CreateReservationRequest {
            service_type,
            service_id,
            date,
            start_time,
            end_time,
            pet_id,
            owner_id,
            staff_id,
            vaccines_up_to_date,
            owner_name,
            phone,
            email,
            pet_name,
            pickup_option,
            pickup_time,
            grooming_options,
            notes,
        } = value;
        CreateReservation {
            service_type,
            service_id,
            date,
            start_time,
            end_time,
            pet_id,
            owner_id,
            staff_id,
            vaccines_up_to_date,
            owner_name,
            phone,
            email,
            pet_name,
            pickup_option,
            pickup_time,
            grooming_options,
            notes,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationListQuery {
    pub owner_id: OwnerId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationsResponse {
    pub items: Vec<ReservationResponse>,
}

impl From<Vec<Reservation>> for ReservationsResponse {
    fn from(value: Vec<Reservation>) -> Self {
        Self {
            items: value.into_iter().map(ReservationResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: ReservationId,
    pub service_type: ServiceType,
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub pet_id: Option<PetId>,
    pub owner_id: OwnerId,
    pub staff_id: Option<StaffId>,
    pub owner_name: String,
    pub phone: String,
    pub email: String,
    pub pet_name: String,
    pub pickup_option: PickupOption,
    pub pickup_time: Option<String>,
    pub grooming_options: Option<String>,
    pub notes: Option<String>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            reservation_id,
            service_type,
            service_id,
            date,
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
        Self {
            reservation_id,
            service_type,
            service_id,
            date,
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
        }
    }
}
