use crate::model::service::{ServiceResponse, ServicesResponse};
use axum::{
    extract::{Path, State},
    Json,
};
use kernel::model::id::ServiceId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn show_service_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ServicesResponse>> {
    registry
        .service_repository()
        .find_all()
        .await
        .map(ServicesResponse::from)
        .map(Json)
}

pub async fn show_service(
    Path(service_id): Path<ServiceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ServiceResponse>> {
    registry
        .service_repository()
        .find_by_id(service_id)
        .await
        .and_then(|service| match service {
            Some(service) => Ok(Json(service.into())),
            None => Err(AppError::ServiceNotFound),
        })
}
