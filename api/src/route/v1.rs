use super::{reservation::build_reservation_routers, service::build_service_routers};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_service_routers())
        .merge(build_reservation_routers());
    Router::new().nest("/api/v1", router)
}
