//! # Slot Handlers
//!
//! Booking slots are fixed one-hour intervals a room offers on a calendar
//! date. This module implements the slot lifecycle: batch generation from a
//! requested time window, availability listing, time-window updates, and
//! soft deletion.
//!
//! ## Slot generation
//!
//! A creation request carries a window `[start_time, end_time)`. The window
//! is cut into consecutive 60-minute pieces starting at `start_time`; a
//! trailing remainder shorter than a full hour is dropped, so 09:00-10:30
//! yields one slot. Before anything is written the handler checks that the
//! room exists and that no live slot for the same room and date overlaps
//! the requested window.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use roomsync_core::{
    errors::BookingError,
    models::{
        room::RoomResponse,
        slot::{
            AvailableSlotResponse, AvailableSlotsQuery, CreateSlotsRequest, SlotResponse,
            UpdateSlotRequest,
        },
    },
    slots::partition_into_hours,
};
use roomsync_db::models::{DbSlot, DbSlotWithRoom};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

fn slot_response(slot: DbSlot) -> SlotResponse {
    SlotResponse {
        id: slot.id,
        room_id: slot.room_id,
        date: slot.date,
        start_time: slot.start_time,
        end_time: slot.end_time,
        is_booked: slot.is_booked,
        is_deleted: slot.is_deleted,
    }
}

fn available_slot_response(slot: DbSlotWithRoom) -> AvailableSlotResponse {
    AvailableSlotResponse {
        id: slot.id,
        date: slot.date,
        start_time: slot.start_time,
        end_time: slot.end_time,
        is_booked: slot.is_booked,
        room: RoomResponse {
            id: slot.room_id,
            name: slot.room_name,
            room_no: slot.room_no,
            floor_no: slot.floor_no,
            capacity: slot.capacity,
            price_per_slot: slot.price_per_slot,
            amenities: slot.amenities,
            is_deleted: slot.room_is_deleted,
            created_at: slot.room_created_at,
        },
    }
}

#[axum::debug_handler]
pub async fn create_slots(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateSlotsRequest>,
) -> Result<Json<Vec<SlotResponse>>, AppError> {
    // Partition the window first so a malformed request fails before any
    // store access
    let windows = partition_into_hours(payload.start_time, payload.end_time)?;

    // The room must exist; soft-deleted rooms count as absent
    state
        .rooms
        .find_by_id(payload.room_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Room with ID {} not found", payload.room_id))
        })?;

    // Reject the whole request if any live slot overlaps the window
    let overlapping = state
        .slots
        .find_overlapping(
            payload.room_id,
            payload.date,
            payload.start_time,
            payload.end_time,
        )
        .await
        .map_err(BookingError::Database)?;

    if !overlapping.is_empty() {
        return Err(AppError(BookingError::Conflict(
            "A slot already exists for this time range".to_string(),
        )));
    }

    // The overlap check and the inserts below are not one atomic region:
    // two concurrent requests for the same room and date can both pass the
    // check and both insert.
    let mut created = Vec::with_capacity(windows.len());
    for window in windows {
        let slot = state
            .slots
            .create(payload.room_id, payload.date, window.start, window.end)
            .await
            .map_err(BookingError::Database)?;
        created.push(slot_response(slot));
    }

    Ok(Json(created))
}

#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<Vec<AvailableSlotResponse>>, AppError> {
    // Only free, live slots are ever listed here
    let slots = state
        .slots
        .find_available(query.date, query.room_id)
        .await
        .map_err(BookingError::Database)?;

    Ok(Json(
        slots.into_iter().map(available_slot_response).collect(),
    ))
}

#[axum::debug_handler]
pub async fn update_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSlotRequest>,
) -> Result<Json<SlotResponse>, AppError> {
    // Fetch the slot being rewritten
    let existing = state
        .slots
        .find_by_id(id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Slot with ID {} not found", id)))?;

    // Booked slots are frozen
    if existing.is_booked {
        return Err(AppError(BookingError::Conflict(
            "Cannot update a booked slot".to_string(),
        )));
    }

    // The collision re-check only runs when the patch carries the whole
    // window; a single-bound patch is written as-is.
    if let (Some(start_time), Some(end_time)) = (payload.start_time, payload.end_time) {
        let conflicting = state
            .slots
            .find_conflicting(existing.room_id, existing.date, existing.id, start_time, end_time)
            .await
            .map_err(BookingError::Database)?;

        if !conflicting.is_empty() {
            return Err(AppError(BookingError::Conflict(
                "Time conflict with another slot".to_string(),
            )));
        }
    }

    let updated = state
        .slots
        .update_times(id, payload.start_time, payload.end_time)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Slot with ID {} not found", id)))?;

    Ok(Json(slot_response(updated)))
}

#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SlotResponse>, AppError> {
    let existing = state
        .slots
        .find_by_id(id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Slot with ID {} not found", id)))?;

    // Deleting twice is an error, not a no-op
    if existing.is_deleted {
        return Err(AppError(BookingError::Conflict(
            "Slot is already deleted".to_string(),
        )));
    }

    let deleted = state
        .slots
        .mark_deleted(id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Slot with ID {} not found", id)))?;

    Ok(Json(slot_response(deleted)))
}
