use crate::model::id::{OwnerId, PetId, ReservationId, ServiceId, StaffId};
use crate::model::service::ServiceType;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub mod event;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PickupOption {
    Yes,
    No,
}

/// The committed booking record. Contact fields are captured redundantly
/// even when a registered pet exists, preserving the request as it was made.
#[derive(Debug, Clone)]
pub struct Reservation {
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
