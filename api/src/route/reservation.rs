use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::reservation::{
    cancel_reservation, create_reservation, show_owner_reservation_list, show_reservation,
};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let reservations_routers = Router::new()
        .route("/", post(create_reservation).get(show_owner_reservation_list))
        .route("/:reservation_id", get(show_reservation))
        .route("/:reservation_id/cancel", put(cancel_reservation));

    Router::new().nest("/reservations", reservations_routers)
}
