//! In-memory repositories for tests that drive the full handler flows
//! without a running database.
//!
//! The filters reuse the pure window predicates from `roomsync-core`, so
//! these answers and the Postgres answers agree on every conflict rule.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use roomsync_core::slots::{windows_conflict, windows_overlap};
use uuid::Uuid;

use crate::models::{DbRoom, DbSlot, DbSlotWithRoom, NewRoom, RoomPatch};
use crate::repositories::{RoomRepository, SlotRepository};

/// Backing store shared by the two in-memory repositories.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    rooms: Mutex<Vec<DbRoom>>,
    slots: Mutex<Vec<DbSlot>>,
}

impl InMemoryStore {
    /// A fresh store, ready to share between repositories.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Flags a slot as booked so availability and update paths can be
    /// exercised. Returns false when the slot does not exist.
    pub fn mark_booked(&self, slot_id: Uuid) -> bool {
        let mut slots = self.slots.lock().expect("slot store poisoned");
        match slots.iter_mut().find(|slot| slot.id == slot_id) {
            Some(slot) => {
                slot.is_booked = true;
                true
            }
            None => false,
        }
    }
}

pub struct InMemoryRoomRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryRoomRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create(&self, room: NewRoom) -> Result<DbRoom> {
        let db_room = DbRoom {
            id: Uuid::new_v4(),
            name: room.name,
            room_no: room.room_no,
            floor_no: room.floor_no,
            capacity: room.capacity,
            price_per_slot: room.price_per_slot,
            amenities: room.amenities,
            is_deleted: false,
            created_at: Utc::now(),
        };

        let mut rooms = self.store.rooms.lock().expect("room store poisoned");
        rooms.push(db_room.clone());

        Ok(db_room)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DbRoom>> {
        let rooms = self.store.rooms.lock().expect("room store poisoned");
        Ok(rooms
            .iter()
            .find(|room| room.id == id && !room.is_deleted)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<DbRoom>> {
        let rooms = self.store.rooms.lock().expect("room store poisoned");
        let mut visible: Vec<DbRoom> = rooms
            .iter()
            .filter(|room| !room.is_deleted)
            .cloned()
            .collect();
        visible.sort_by_key(|room| room.room_no);
        Ok(visible)
    }

    async fn update(&self, id: Uuid, patch: RoomPatch) -> Result<Option<DbRoom>> {
        let mut rooms = self.store.rooms.lock().expect("room store poisoned");
        let Some(room) = rooms.iter_mut().find(|room| room.id == id && !room.is_deleted) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            room.name = name;
        }
        if let Some(room_no) = patch.room_no {
            room.room_no = room_no;
        }
        if let Some(floor_no) = patch.floor_no {
            room.floor_no = floor_no;
        }
        if let Some(capacity) = patch.capacity {
            room.capacity = capacity;
        }
        if let Some(price_per_slot) = patch.price_per_slot {
            room.price_per_slot = price_per_slot;
        }
        if let Some(amenities) = patch.amenities {
            room.amenities = amenities;
        }

        Ok(Some(room.clone()))
    }

    async fn mark_deleted(&self, id: Uuid) -> Result<Option<DbRoom>> {
        let mut rooms = self.store.rooms.lock().expect("room store poisoned");
        let Some(room) = rooms.iter_mut().find(|room| room.id == id && !room.is_deleted) else {
            return Ok(None);
        };

        room.is_deleted = true;
        Ok(Some(room.clone()))
    }
}

pub struct InMemorySlotRepository {
    store: Arc<InMemoryStore>,
}

impl InMemorySlotRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SlotRepository for InMemorySlotRepository {
    async fn create(
        &self,
        room_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<DbSlot> {
        let slot = DbSlot {
            id: Uuid::new_v4(),
            room_id,
            date,
            start_time,
            end_time,
            is_booked: false,
            is_deleted: false,
            created_at: Utc::now(),
        };

        let mut slots = self.store.slots.lock().expect("slot store poisoned");
        slots.push(slot.clone());

        Ok(slot)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DbSlot>> {
        // Soft-deleted slots stay visible by id
        let slots = self.store.slots.lock().expect("slot store poisoned");
        Ok(slots.iter().find(|slot| slot.id == id).cloned())
    }

    async fn find_overlapping(
        &self,
        room_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Vec<DbSlot>> {
        let slots = self.store.slots.lock().expect("slot store poisoned");
        let mut hits: Vec<DbSlot> = slots
            .iter()
            .filter(|slot| {
                slot.room_id == room_id
                    && slot.date == date
                    && !slot.is_deleted
                    && windows_overlap(slot.start_time, slot.end_time, start_time, end_time)
            })
            .cloned()
            .collect();
        hits.sort_by_key(|slot| slot.start_time);
        Ok(hits)
    }

    async fn find_conflicting(
        &self,
        room_id: Uuid,
        date: NaiveDate,
        exclude_id: Uuid,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Vec<DbSlot>> {
        let slots = self.store.slots.lock().expect("slot store poisoned");
        let mut hits: Vec<DbSlot> = slots
            .iter()
            .filter(|slot| {
                slot.room_id == room_id
                    && slot.date == date
                    && slot.id != exclude_id
                    && !slot.is_deleted
                    && windows_conflict(slot.start_time, slot.end_time, start_time, end_time)
            })
            .cloned()
            .collect();
        hits.sort_by_key(|slot| slot.start_time);
        Ok(hits)
    }

    async fn find_available(
        &self,
        date: Option<NaiveDate>,
        room_id: Option<Uuid>,
    ) -> Result<Vec<DbSlotWithRoom>> {
        let rooms = self.store.rooms.lock().expect("room store poisoned");
        let slots = self.store.slots.lock().expect("slot store poisoned");

        let mut hits: Vec<DbSlotWithRoom> = slots
            .iter()
            .filter(|slot| {
                !slot.is_booked
                    && !slot.is_deleted
                    && date.is_none_or(|date| slot.date == date)
                    && room_id.is_none_or(|room_id| slot.room_id == room_id)
            })
            .filter_map(|slot| {
                let room = rooms.iter().find(|room| room.id == slot.room_id)?;
                Some(DbSlotWithRoom {
                    id: slot.id,
                    room_id: slot.room_id,
                    date: slot.date,
                    start_time: slot.start_time,
                    end_time: slot.end_time,
                    is_booked: slot.is_booked,
                    is_deleted: slot.is_deleted,
                    created_at: slot.created_at,
                    room_name: room.name.clone(),
                    room_no: room.room_no,
                    floor_no: room.floor_no,
                    capacity: room.capacity,
                    price_per_slot: room.price_per_slot,
                    amenities: room.amenities.clone(),
                    room_is_deleted: room.is_deleted,
                    room_created_at: room.created_at,
                })
            })
            .collect();
        hits.sort_by_key(|slot| (slot.date, slot.start_time));
        Ok(hits)
    }

    async fn update_times(
        &self,
        id: Uuid,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
    ) -> Result<Option<DbSlot>> {
        let mut slots = self.store.slots.lock().expect("slot store poisoned");
        let Some(slot) = slots.iter_mut().find(|slot| slot.id == id) else {
            return Ok(None);
        };

        if let Some(start_time) = start_time {
            slot.start_time = start_time;
        }
        if let Some(end_time) = end_time {
            slot.end_time = end_time;
        }

        Ok(Some(slot.clone()))
    }

    async fn mark_deleted(&self, id: Uuid) -> Result<Option<DbSlot>> {
        let mut slots = self.store.slots.lock().expect("slot store poisoned");
        let Some(slot) = slots.iter_mut().find(|slot| slot.id == id) else {
            return Ok(None);
        };

        slot.is_deleted = true;
        Ok(Some(slot.clone()))
    }
}
