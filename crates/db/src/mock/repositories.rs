use chrono::{NaiveDate, NaiveTime};
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbRoom, DbSlot, DbSlotWithRoom, NewRoom, RoomPatch};
use crate::repositories::{RoomRepository, SlotRepository};

// Mock repositories for testing
mock! {
    pub RoomRepo {}

    #[async_trait::async_trait]
    impl RoomRepository for RoomRepo {
        async fn create(&self, room: NewRoom) -> eyre::Result<DbRoom>;

        async fn find_by_id(&self, id: Uuid) -> eyre::Result<Option<DbRoom>>;

        async fn find_all(&self) -> eyre::Result<Vec<DbRoom>>;

        async fn update(&self, id: Uuid, patch: RoomPatch) -> eyre::Result<Option<DbRoom>>;

        async fn mark_deleted(&self, id: Uuid) -> eyre::Result<Option<DbRoom>>;
    }
}

mock! {
    pub SlotRepo {}

    #[async_trait::async_trait]
    impl SlotRepository for SlotRepo {
        async fn create(
            &self,
            room_id: Uuid,
            date: NaiveDate,
            start_time: NaiveTime,
            end_time: NaiveTime,
        ) -> eyre::Result<DbSlot>;

        async fn find_by_id(&self, id: Uuid) -> eyre::Result<Option<DbSlot>>;

        async fn find_overlapping(
            &self,
            room_id: Uuid,
            date: NaiveDate,
            start_time: NaiveTime,
            end_time: NaiveTime,
        ) -> eyre::Result<Vec<DbSlot>>;

        async fn find_conflicting(
            &self,
            room_id: Uuid,
            date: NaiveDate,
            exclude_id: Uuid,
            start_time: NaiveTime,
            end_time: NaiveTime,
        ) -> eyre::Result<Vec<DbSlot>>;

        async fn find_available(
            &self,
            date: Option<NaiveDate>,
            room_id: Option<Uuid>,
        ) -> eyre::Result<Vec<DbSlotWithRoom>>;

        async fn update_times(
            &self,
            id: Uuid,
            start_time: Option<NaiveTime>,
            end_time: Option<NaiveTime>,
        ) -> eyre::Result<Option<DbSlot>>;

        async fn mark_deleted(&self, id: Uuid) -> eyre::Result<Option<DbSlot>>;
    }
}
