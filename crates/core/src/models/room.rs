use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    pub room_no: i32,
    pub floor_no: i32,
    pub capacity: i32,
    pub price_per_slot: i32,
    #[serde(default)]
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
    pub room_no: Option<i32>,
    pub floor_no: Option<i32>,
    pub capacity: Option<i32>,
    pub price_per_slot: Option<i32>,
    pub amenities: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomResponse {
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
