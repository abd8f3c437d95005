use kernel::model::{
    id::ServiceId,
    service::{Service, ServiceType},
};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct ServiceRow {
    pub service_id: ServiceId,
    pub service_name: String,
    pub service_type: String,
    pub description: String,
    pub price: i32,
    pub capacity: i32,
}

impl TryFrom<ServiceRow> for Service {
    type Error = AppError;

    fn try_from(value: ServiceRow) -> Result<Self, Self::Error> {
        let ServiceRow {
            service_id,
            service_name,
            service_type,
            description,
            price,
            capacity,
        } = value;
        let service_type = service_type
            .parse::<ServiceType>()
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        Ok(Service {
            service_id,
            service_name,
            service_type,
            description,
            price,
            capacity,
        })
    }
}
