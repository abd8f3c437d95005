use kernel::model::{
    id::ServiceId,
    service::{Service, ServiceType},
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesResponse {
    pub items: Vec<ServiceResponse>,
}

impl From<Vec<Service>> for ServicesResponse {
    fn from(value: Vec<Service>) -> Self {
        Self {
            items: value.into_iter().map(ServiceResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    pub service_id: ServiceId,
    pub service_name: String,
    pub service_type: ServiceType,
    pub description: String,
    pub price: i32,
    pub capacity: i32,
}

impl From<Service> for ServiceResponse {
    fn from(value: Service) -> Self {
        let Service {
            service_id,
            service_name,
            service_type,
            description,
            price,
            capacity,
        } = value;
        Self {
            service_id,
            service_name,
            service_type,
            description,
            price,
            capacity,
        }
    }
}
