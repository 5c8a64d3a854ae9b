use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::{DbSlot, DbSlotWithRoom};

use super::SlotRepository;

pub struct PgSlotRepository {
    pool: Pool<Postgres>,
}

impl PgSlotRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotRepository for PgSlotRepository {
    async fn create(
        &self,
        room_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<DbSlot> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        tracing::debug!(
            "Creating slot: id={}, room_id={}, date={}, window={}..{}",
            id,
            room_id,
            date,
            start_time,
            end_time
        );

        let slot = sqlx::query_as::<_, DbSlot>(
            r#"
            INSERT INTO slots (id, room_id, date, start_time, end_time, is_booked, is_deleted, created_at)
            VALUES ($1, $2, $3, $4, $5, FALSE, FALSE, $6)
            RETURNING id, room_id, date, start_time, end_time, is_booked, is_deleted, created_at
            "#,
        )
        .bind(id)
        .bind(room_id)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(slot)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DbSlot>> {
        let slot = sqlx::query_as::<_, DbSlot>(
            r#"
            SELECT id, room_id, date, start_time, end_time, is_booked, is_deleted, created_at
            FROM slots
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(slot)
    }

    async fn find_overlapping(
        &self,
        room_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Vec<DbSlot>> {
        tracing::debug!(
            "Checking overlaps: room_id={}, date={}, window={}..{}",
            room_id,
            date,
            start_time,
            end_time
        );

        // Half-open intervals: windows that only touch do not overlap
        let slots = sqlx::query_as::<_, DbSlot>(
            r#"
            SELECT id, room_id, date, start_time, end_time, is_booked, is_deleted, created_at
            FROM slots
            WHERE room_id = $1
              AND date = $2
              AND is_deleted = FALSE
              AND start_time < $4
              AND end_time > $3
            ORDER BY start_time ASC
            "#,
        )
        .bind(room_id)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .fetch_all(&self.pool)
        .await?;

        Ok(slots)
    }

    async fn find_conflicting(
        &self,
        room_id: Uuid,
        date: NaiveDate,
        exclude_id: Uuid,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Vec<DbSlot>> {
        let slots = sqlx::query_as::<_, DbSlot>(
            r#"
            SELECT id, room_id, date, start_time, end_time, is_booked, is_deleted, created_at
            FROM slots
            WHERE room_id = $1
              AND date = $2
              AND id <> $3
              AND is_deleted = FALSE
              AND (
                    (start_time >= $4 AND start_time < $5)
                 OR (end_time > $4 AND end_time <= $5)
                 OR (start_time <= $4 AND end_time >= $5)
              )
            ORDER BY start_time ASC
            "#,
        )
        .bind(room_id)
        .bind(date)
        .bind(exclude_id)
        .bind(start_time)
        .bind(end_time)
        .fetch_all(&self.pool)
        .await?;

        Ok(slots)
    }

    async fn find_available(
        &self,
        date: Option<NaiveDate>,
        room_id: Option<Uuid>,
    ) -> Result<Vec<DbSlotWithRoom>> {
        tracing::debug!("Listing available slots: date={:?}, room_id={:?}", date, room_id);

        let slots = sqlx::query_as::<_, DbSlotWithRoom>(
            r#"
            SELECT s.id, s.room_id, s.date, s.start_time, s.end_time, s.is_booked, s.is_deleted, s.created_at,
                   r.name AS room_name, r.room_no, r.floor_no, r.capacity, r.price_per_slot, r.amenities,
                   r.is_deleted AS room_is_deleted, r.created_at AS room_created_at
            FROM slots s
            JOIN rooms r ON r.id = s.room_id
            WHERE s.is_booked = FALSE
              AND s.is_deleted = FALSE
              AND ($1::date IS NULL OR s.date = $1)
              AND ($2::uuid IS NULL OR s.room_id = $2)
            ORDER BY s.date ASC, s.start_time ASC
            "#,
        )
        .bind(date)
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(slots)
    }

    async fn update_times(
        &self,
        id: Uuid,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
    ) -> Result<Option<DbSlot>> {
        tracing::debug!(
            "Updating slot times: id={}, start_time={:?}, end_time={:?}",
            id,
            start_time,
            end_time
        );

        let slot = sqlx::query_as::<_, DbSlot>(
            r#"
            UPDATE slots
            SET start_time = COALESCE($2, start_time),
                end_time = COALESCE($3, end_time)
            WHERE id = $1
            RETURNING id, room_id, date, start_time, end_time, is_booked, is_deleted, created_at
            "#,
        )
        .bind(id)
        .bind(start_time)
        .bind(end_time)
        .fetch_optional(&self.pool)
        .await?;

        Ok(slot)
    }

    async fn mark_deleted(&self, id: Uuid) -> Result<Option<DbSlot>> {
        tracing::debug!("Soft-deleting slot: id={}", id);

        let slot = sqlx::query_as::<_, DbSlot>(
            r#"
            UPDATE slots
            SET is_deleted = TRUE
            WHERE id = $1
            RETURNING id, room_id, date, start_time, end_time, is_booked, is_deleted, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(slot)
    }
}
