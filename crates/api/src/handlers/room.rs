use axum::{
    Json,
    extract::{Path, State},
};
use roomsync_core::{
    errors::BookingError,
    models::room::{CreateRoomRequest, RoomResponse, UpdateRoomRequest},
};
use roomsync_db::models::{DbRoom, NewRoom, RoomPatch};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

fn room_response(room: DbRoom) -> RoomResponse {
    RoomResponse {
        id: room.id,
        name: room.name,
        room_no: room.room_no,
        floor_no: room.floor_no,
        capacity: room.capacity,
        price_per_slot: room.price_per_slot,
        amenities: room.amenities,
        is_deleted: room.is_deleted,
        created_at: room.created_at,
    }
}

#[axum::debug_handler]
pub async fn create_room(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<Json<RoomResponse>, AppError> {
    // Create room in database
    let room = state
        .rooms
        .create(NewRoom {
            name: payload.name,
            room_no: payload.room_no,
            floor_no: payload.floor_no,
            capacity: payload.capacity,
            price_per_slot: payload.price_per_slot,
            amenities: payload.amenities,
        })
        .await
        .map_err(BookingError::Database)?;

    Ok(Json(room_response(room)))
}

#[axum::debug_handler]
pub async fn get_rooms(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<RoomResponse>>, AppError> {
    let rooms = state
        .rooms
        .find_all()
        .await
        .map_err(BookingError::Database)?;

    Ok(Json(rooms.into_iter().map(room_response).collect()))
}

#[axum::debug_handler]
pub async fn get_room(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RoomResponse>, AppError> {
    let room = state
        .rooms
        .find_by_id(id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Room with ID {} not found", id)))?;

    Ok(Json(room_response(room)))
}

#[axum::debug_handler]
pub async fn update_room(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoomRequest>,
) -> Result<Json<RoomResponse>, AppError> {
    // Absent fields keep their stored value
    let patch = RoomPatch {
        name: payload.name,
        room_no: payload.room_no,
        floor_no: payload.floor_no,
        capacity: payload.capacity,
        price_per_slot: payload.price_per_slot,
        amenities: payload.amenities,
    };

    let room = state
        .rooms
        .update(id, patch)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Room with ID {} not found", id)))?;

    Ok(Json(room_response(room)))
}

#[axum::debug_handler]
pub async fn delete_room(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RoomResponse>, AppError> {
    // Soft delete; the row survives for existing slot references
    let room = state
        .rooms
        .mark_deleted(id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Room with ID {} not found", id)))?;

    Ok(Json(room_response(room)))
}
