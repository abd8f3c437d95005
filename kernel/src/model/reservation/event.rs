use crate::model::id::{OwnerId, PetId, ServiceId, StaffId};
use crate::model::reservation::PickupOption;
use crate::model::service::ServiceType;
use chrono::{NaiveDate, NaiveDateTime};

/// A booking request that already passed structural validation. The
/// `vaccines_up_to_date` assertion feeds the vaccination guard only and is
/// never persisted.
#[derive(Debug, Clone)]
pub struct CreateReservation {
    pub service_type: ServiceType,
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub pet_id: Option<PetId>,
    pub owner_id: OwnerId,
    pub staff_id: Option<StaffId>,
    pub vaccines_up_to_date: bool,
    pub owner_name: String,
    pub phone: String,
    pub email: String,
    pub pet_name: String,
    pub pickup_option: PickupOption,
    pub pickup_time: Option<String>,
    pub grooming_options: Option<String>,
    pub notes: Option<String>,
}
