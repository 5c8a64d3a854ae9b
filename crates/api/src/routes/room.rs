use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/rooms", post(handlers::room::create_room))
        .route("/api/rooms", get(handlers::room::get_rooms))
        .route("/api/rooms/:id", get(handlers::room::get_room))
        .route("/api/rooms/:id", put(handlers::room::update_room))
        .route("/api/rooms/:id", delete(handlers::room::delete_room))
}
