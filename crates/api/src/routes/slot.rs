use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/slots", post(handlers::slot::create_slots))
        .route(
            "/api/slots/availability",
            get(handlers::slot::get_available_slots),
        )
        .route("/api/slots/:id", put(handlers::slot::update_slot))
        .route("/api/slots/:id", delete(handlers::slot::delete_slot))
}
