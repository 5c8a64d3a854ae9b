use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRoom {
    pub id: Uuid,
    pub name: String,
    pub room_no: i32,
    pub floor_no: i32,
    pub capacity: i32,
    pub price_per_slot: i32,
    pub amenities: Vec<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlot {
    pub id: Uuid,
    pub room_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_booked: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

/// Availability row with the owning room joined in. Room columns carry a
/// `room_` prefix where they would collide with slot columns.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlotWithRoom {
    pub id: Uuid,
    pub room_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_booked: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub room_name: String,
    pub room_no: i32,
    pub floor_no: i32,
    pub capacity: i32,
    pub price_per_slot: i32,
    pub amenities: Vec<String>,
    pub room_is_deleted: bool,
    pub room_created_at: DateTime<Utc>,
}

/// Insert payload for a room; id and timestamps are filled by the store.
#[derive(Debug, Clone)]
pub struct NewRoom {
    pub name: String,
    pub room_no: i32,
    pub floor_no: i32,
    pub capacity: i32,
    pub price_per_slot: i32,
    pub amenities: Vec<String>,
}

/// Partial room update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct RoomPatch {
    pub name: Option<String>,
    pub room_no: Option<i32>,
    pub floor_no: Option<i32>,
    pub capacity: Option<i32>,
    pub price_per_slot: Option<i32>,
    pub amenities: Option<Vec<String>>,
}
