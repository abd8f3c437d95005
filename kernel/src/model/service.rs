use crate::model::id::ServiceId;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    Daycare,
    Stay,
    Grooming,
}

impl ServiceType {
    /// Human-readable label used in notification mails.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Daycare => "Day care",
            ServiceType::Stay => "Overnight stay",
            ServiceType::Grooming => "Grooming",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Service {
    pub service_id: ServiceId,
    pub service_name: String,
    pub service_type: ServiceType,
    pub description: String,
    pub price: i32,
    /// Maximum number of non-cancelled reservations per calendar date.
    pub capacity: i32,
}
