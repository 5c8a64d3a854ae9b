use async_trait::async_trait;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::{DbRoom, NewRoom, RoomPatch};

use super::RoomRepository;

pub struct PgRoomRepository {
    pool: Pool<Postgres>,
}

impl PgRoomRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    async fn create(&self, room: NewRoom) -> Result<DbRoom> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        tracing::debug!(
            "Creating room: id={}, name={}, room_no={}",
            id,
            room.name,
            room.room_no
        );

        let room = sqlx::query_as::<_, DbRoom>(
            r#"
            INSERT INTO rooms (id, name, room_no, floor_no, capacity, price_per_slot, amenities, is_deleted, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, $8)
            RETURNING id, name, room_no, floor_no, capacity, price_per_slot, amenities, is_deleted, created_at
            "#,
        )
        .bind(id)
        .bind(room.name)
        .bind(room.room_no)
        .bind(room.floor_no)
        .bind(room.capacity)
        .bind(room.price_per_slot)
        .bind(room.amenities)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(room)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DbRoom>> {
        let room = sqlx::query_as::<_, DbRoom>(
            r#"
            SELECT id, name, room_no, floor_no, capacity, price_per_slot, amenities, is_deleted, created_at
            FROM rooms
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    async fn find_all(&self) -> Result<Vec<DbRoom>> {
        let rooms = sqlx::query_as::<_, DbRoom>(
            r#"
            SELECT id, name, room_no, floor_no, capacity, price_per_slot, amenities, is_deleted, created_at
            FROM rooms
            WHERE is_deleted = FALSE
            ORDER BY room_no ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    async fn update(&self, id: Uuid, patch: RoomPatch) -> Result<Option<DbRoom>> {
        tracing::debug!("Updating room: id={}", id);

        let room = sqlx::query_as::<_, DbRoom>(
            r#"
            UPDATE rooms
            SET name = COALESCE($2, name),
                room_no = COALESCE($3, room_no),
                floor_no = COALESCE($4, floor_no),
                capacity = COALESCE($5, capacity),
                price_per_slot = COALESCE($6, price_per_slot),
                amenities = COALESCE($7, amenities)
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING id, name, room_no, floor_no, capacity, price_per_slot, amenities, is_deleted, created_at
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.room_no)
        .bind(patch.floor_no)
        .bind(patch.capacity)
        .bind(patch.price_per_slot)
        .bind(patch.amenities)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    async fn mark_deleted(&self, id: Uuid) -> Result<Option<DbRoom>> {
        tracing::debug!("Soft-deleting room: id={}", id);

        let room = sqlx::query_as::<_, DbRoom>(
            r#"
            UPDATE rooms
            SET is_deleted = TRUE
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING id, name, room_no, floor_no, capacity, price_per_slot, amenities, is_deleted, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }
}
