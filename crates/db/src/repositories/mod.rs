pub mod room;
pub mod slot;

pub use room::PgRoomRepository;
pub use slot::PgSlotRepository;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use eyre::Result;
use uuid::Uuid;

use crate::models::{DbRoom, DbSlot, DbSlotWithRoom, NewRoom, RoomPatch};

/// Store behind the room lifecycle. Reads treat soft-deleted rooms as
/// absent.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, room: NewRoom) -> Result<DbRoom>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DbRoom>>;

    async fn find_all(&self) -> Result<Vec<DbRoom>>;

    /// Applies a partial update; `None` when the room is absent or deleted.
    async fn update(&self, id: Uuid, patch: RoomPatch) -> Result<Option<DbRoom>>;

    /// Flips the soft-delete flag, returning the updated row.
    async fn mark_deleted(&self, id: Uuid) -> Result<Option<DbRoom>>;
}

/// Store behind slot generation, availability and updates.
///
/// Unlike rooms, `find_by_id` here returns soft-deleted slots too; the
/// delete flow depends on seeing the flag to reject a repeat delete.
#[async_trait]
pub trait SlotRepository: Send + Sync {
    async fn create(
        &self,
        room_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<DbSlot>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DbSlot>>;

    /// Non-deleted slots of (room, date) whose window overlaps the given
    /// half-open `[start_time, end_time)` window.
    async fn find_overlapping(
        &self,
        room_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Vec<DbSlot>>;

    /// Non-deleted slots of (room, date), excluding `exclude_id`, that
    /// collide with the given window under the boundary-inclusive test
    /// applied on updates.
    async fn find_conflicting(
        &self,
        room_id: Uuid,
        date: NaiveDate,
        exclude_id: Uuid,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Vec<DbSlot>>;

    /// Free, non-deleted slots with the owning room joined in; both
    /// filters are optional.
    async fn find_available(
        &self,
        date: Option<NaiveDate>,
        room_id: Option<Uuid>,
    ) -> Result<Vec<DbSlotWithRoom>>;

    /// Rewrites the time window; `None` bounds keep their stored value.
    async fn update_times(
        &self,
        id: Uuid,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
    ) -> Result<Option<DbSlot>>;

    /// Flips the soft-delete flag, returning the updated row.
    async fn mark_deleted(&self, id: Uuid) -> Result<Option<DbSlot>>;
}
