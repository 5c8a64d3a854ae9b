use axum::http::StatusCode;
use chrono::{NaiveDate, NaiveTime};
use mockall::predicate;
use pretty_assertions::assert_eq;
use roomsync_core::models::slot::{AvailableSlotResponse, SlotResponse};
use roomsync_db::mock::repositories::{MockRoomRepo, MockSlotRepo};
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

use crate::test_utils::{TestContext, create_room, mock_server};

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

#[tokio::test]
async fn test_create_slots_partitions_window_into_hours() {
    let ctx = TestContext::new();
    let room = create_room(&ctx.server, 101).await;

    // Request a three hour window
    let response = ctx
        .server
        .post("/api/slots")
        .json(&json!({
            "room_id": room.id,
            "date": "2026-06-15",
            "start_time": "09:00",
            "end_time": "12:00",
        }))
        .await;
    response.assert_status_ok();

    // Three consecutive one-hour slots come back
    let slots: Vec<SlotResponse> = response.json();
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0].start_time, time(9, 0));
    assert_eq!(slots[0].end_time, time(10, 0));
    assert_eq!(slots[1].start_time, time(10, 0));
    assert_eq!(slots[2].end_time, time(12, 0));
    assert!(slots.iter().all(|slot| !slot.is_booked && !slot.is_deleted));
    assert!(slots.iter().all(|slot| slot.room_id == room.id));
}

#[tokio::test]
async fn test_create_slots_drops_trailing_remainder() {
    let ctx = TestContext::new();
    let room = create_room(&ctx.server, 101).await;

    // 90 minutes only fill one slot
    let response = ctx
        .server
        .post("/api/slots")
        .json(&json!({
            "room_id": room.id,
            "date": "2026-06-15",
            "start_time": "09:00",
            "end_time": "10:30",
        }))
        .await;
    response.assert_status_ok();

    let slots: Vec<SlotResponse> = response.json();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start_time, time(9, 0));
    assert_eq!(slots[0].end_time, time(10, 0));
}

#[tokio::test]
async fn test_create_slots_sub_hour_window_creates_nothing() {
    let ctx = TestContext::new();
    let room = create_room(&ctx.server, 101).await;

    let response = ctx
        .server
        .post("/api/slots")
        .json(&json!({
            "room_id": room.id,
            "date": "2026-06-15",
            "start_time": "09:00",
            "end_time": "09:30",
        }))
        .await;
    response.assert_status_ok();

    let slots: Vec<SlotResponse> = response.json();
    assert!(slots.is_empty());
}

#[rstest]
#[case("11:00", "09:00")]
#[case("09:00", "09:00")]
#[tokio::test]
async fn test_create_slots_rejects_inverted_window(#[case] start: &str, #[case] end: &str) {
    let ctx = TestContext::new();
    let room = create_room(&ctx.server, 101).await;

    let response = ctx
        .server
        .post("/api/slots")
        .json(&json!({
            "room_id": room.id,
            "date": "2026-06-15",
            "start_time": start,
            "end_time": end,
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Validation failed before anything was written
    let response = ctx.server.get("/api/slots/availability").await;
    let available: Vec<AvailableSlotResponse> = response.json();
    assert!(available.is_empty());
}

#[tokio::test]
async fn test_create_slots_unknown_room_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/slots")
        .json(&json!({
            "room_id": Uuid::new_v4(),
            "date": "2026-06-15",
            "start_time": "09:00",
            "end_time": "10:00",
        }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_slots_deleted_room_counts_as_absent() {
    let ctx = TestContext::new();
    let room = create_room(&ctx.server, 101).await;

    ctx.server
        .delete(&format!("/api/rooms/{}", room.id))
        .await
        .assert_status_ok();

    let response = ctx
        .server
        .post("/api/slots")
        .json(&json!({
            "room_id": room.id,
            "date": "2026-06-15",
            "start_time": "09:00",
            "end_time": "10:00",
        }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_slots_rejects_overlapping_window() {
    let ctx = TestContext::new();
    let room = create_room(&ctx.server, 101).await;

    ctx.server
        .post("/api/slots")
        .json(&json!({
            "room_id": room.id,
            "date": "2026-06-15",
            "start_time": "09:00",
            "end_time": "11:00",
        }))
        .await
        .assert_status_ok();

    // A window straddling an existing slot is rejected as a whole
    let response = ctx
        .server
        .post("/api/slots")
        .json(&json!({
            "room_id": room.id,
            "date": "2026-06-15",
            "start_time": "10:30",
            "end_time": "12:30",
        }))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Conflict: A slot already exists for this time range");

    // Nothing from the rejected request leaked into the store
    let response = ctx.server.get("/api/slots/availability").await;
    let available: Vec<AvailableSlotResponse> = response.json();
    assert_eq!(available.len(), 2);
}

#[tokio::test]
async fn test_create_slots_touching_windows_are_allowed() {
    let ctx = TestContext::new();
    let room = create_room(&ctx.server, 101).await;

    ctx.server
        .post("/api/slots")
        .json(&json!({
            "room_id": room.id,
            "date": "2026-06-15",
            "start_time": "09:00",
            "end_time": "10:00",
        }))
        .await
        .assert_status_ok();

    // Back-to-back windows share a boundary without overlapping
    ctx.server
        .post("/api/slots")
        .json(&json!({
            "room_id": room.id,
            "date": "2026-06-15",
            "start_time": "10:00",
            "end_time": "11:00",
        }))
        .await
        .assert_status_ok();

    // Same window on another date is fine too
    ctx.server
        .post("/api/slots")
        .json(&json!({
            "room_id": room.id,
            "date": "2026-06-16",
            "start_time": "09:00",
            "end_time": "10:00",
        }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_deleted_window_can_be_reissued() {
    let ctx = TestContext::new();
    let room = create_room(&ctx.server, 101).await;

    let response = ctx
        .server
        .post("/api/slots")
        .json(&json!({
            "room_id": room.id,
            "date": "2026-06-15",
            "start_time": "09:00",
            "end_time": "10:00",
        }))
        .await;
    let slots: Vec<SlotResponse> = response.json();

    ctx.server
        .delete(&format!("/api/slots/{}", slots[0].id))
        .await
        .assert_status_ok();

    // The deleted slot no longer blocks its window
    ctx.server
        .post("/api/slots")
        .json(&json!({
            "room_id": room.id,
            "date": "2026-06-15",
            "start_time": "09:00",
            "end_time": "10:00",
        }))
        .await
        .assert_status_ok();
}

#[test_log::test(tokio::test)]
async fn test_availability_hides_booked_and_deleted_slots() {
    let ctx = TestContext::new();
    let room = create_room(&ctx.server, 101).await;

    let response = ctx
        .server
        .post("/api/slots")
        .json(&json!({
            "room_id": room.id,
            "date": "2026-06-15",
            "start_time": "09:00",
            "end_time": "12:00",
        }))
        .await;
    let slots: Vec<SlotResponse> = response.json();
    assert_eq!(slots.len(), 3);

    // Book the first slot directly in the store, delete the second via the API
    assert!(ctx.store.mark_booked(slots[0].id));
    ctx.server
        .delete(&format!("/api/slots/{}", slots[1].id))
        .await
        .assert_status_ok();

    let response = ctx.server.get("/api/slots/availability").await;
    response.assert_status_ok();

    let available: Vec<AvailableSlotResponse> = response.json();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, slots[2].id);
    assert_eq!(available[0].start_time, time(11, 0));

    // The owning room rides along in full
    assert_eq!(available[0].room.id, room.id);
    assert_eq!(available[0].room.name, room.name);
    assert_eq!(available[0].room.price_per_slot, room.price_per_slot);
}

#[test_log::test(tokio::test)]
async fn test_availability_filters_by_date_and_room() {
    let ctx = TestContext::new();
    let first_room = create_room(&ctx.server, 101).await;
    let second_room = create_room(&ctx.server, 102).await;

    for (room_id, date) in [
        (first_room.id, "2026-06-15"),
        (first_room.id, "2026-06-16"),
        (second_room.id, "2026-06-15"),
    ] {
        ctx.server
            .post("/api/slots")
            .json(&json!({
                "room_id": room_id,
                "date": date,
                "start_time": "09:00",
                "end_time": "10:00",
            }))
            .await
            .assert_status_ok();
    }

    // No filters: everything comes back
    let all: Vec<AvailableSlotResponse> = ctx.server.get("/api/slots/availability").await.json();
    assert_eq!(all.len(), 3);

    // Date filter
    let by_date: Vec<AvailableSlotResponse> = ctx
        .server
        .get("/api/slots/availability?date=2026-06-15")
        .await
        .json();
    assert_eq!(by_date.len(), 2);
    assert!(by_date
        .iter()
        .all(|slot| slot.date == NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()));

    // Room filter
    let by_room: Vec<AvailableSlotResponse> = ctx
        .server
        .get(&format!("/api/slots/availability?room_id={}", second_room.id))
        .await
        .json();
    assert_eq!(by_room.len(), 1);
    assert_eq!(by_room[0].room.id, second_room.id);

    // Both filters compose
    let by_both: Vec<AvailableSlotResponse> = ctx
        .server
        .get(&format!(
            "/api/slots/availability?date=2026-06-16&room_id={}",
            first_room.id
        ))
        .await
        .json();
    assert_eq!(by_both.len(), 1);
    assert_eq!(by_both[0].room.id, first_room.id);
}

#[tokio::test]
async fn test_update_slot_rewrites_window() {
    let ctx = TestContext::new();
    let room = create_room(&ctx.server, 101).await;

    let slots: Vec<SlotResponse> = ctx
        .server
        .post("/api/slots")
        .json(&json!({
            "room_id": room.id,
            "date": "2026-06-15",
            "start_time": "09:00",
            "end_time": "10:00",
        }))
        .await
        .json();

    let response = ctx
        .server
        .put(&format!("/api/slots/{}", slots[0].id))
        .json(&json!({
            "start_time": "14:00",
            "end_time": "15:00",
        }))
        .await;
    response.assert_status_ok();

    let updated: SlotResponse = response.json();
    assert_eq!(updated.id, slots[0].id);
    assert_eq!(updated.start_time, time(14, 0));
    assert_eq!(updated.end_time, time(15, 0));
}

#[tokio::test]
async fn test_update_slot_rejects_booked_slot() {
    let ctx = TestContext::new();
    let room = create_room(&ctx.server, 101).await;

    let slots: Vec<SlotResponse> = ctx
        .server
        .post("/api/slots")
        .json(&json!({
            "room_id": room.id,
            "date": "2026-06-15",
            "start_time": "09:00",
            "end_time": "10:00",
        }))
        .await
        .json();
    assert!(ctx.store.mark_booked(slots[0].id));

    let response = ctx
        .server
        .put(&format!("/api/slots/{}", slots[0].id))
        .json(&json!({"start_time": "11:00", "end_time": "12:00"}))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Conflict: Cannot update a booked slot");

    // Even an empty patch is refused on a booked slot
    let response = ctx
        .server
        .put(&format!("/api/slots/{}", slots[0].id))
        .json(&json!({}))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_slot_full_window_collision_is_rejected() {
    let ctx = TestContext::new();
    let room = create_room(&ctx.server, 101).await;

    let slots: Vec<SlotResponse> = ctx
        .server
        .post("/api/slots")
        .json(&json!({
            "room_id": room.id,
            "date": "2026-06-15",
            "start_time": "09:00",
            "end_time": "11:00",
        }))
        .await
        .json();
    assert_eq!(slots.len(), 2);

    // Shifting the second slot onto the first collides
    let response = ctx
        .server
        .put(&format!("/api/slots/{}", slots[1].id))
        .json(&json!({"start_time": "09:30", "end_time": "10:30"}))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Conflict: Time conflict with another slot");

    // A move to a free window on the same date succeeds
    let response = ctx
        .server
        .put(&format!("/api/slots/{}", slots[1].id))
        .json(&json!({"start_time": "13:00", "end_time": "14:00"}))
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_update_slot_single_bound_skips_collision_check() {
    let ctx = TestContext::new();
    let room = create_room(&ctx.server, 101).await;

    let slots: Vec<SlotResponse> = ctx
        .server
        .post("/api/slots")
        .json(&json!({
            "room_id": room.id,
            "date": "2026-06-15",
            "start_time": "09:00",
            "end_time": "11:00",
        }))
        .await
        .json();

    // A patch carrying only one bound is written without the collision
    // re-check, even though the result overlaps the first slot
    let response = ctx
        .server
        .put(&format!("/api/slots/{}", slots[1].id))
        .json(&json!({"start_time": "09:30"}))
        .await;
    response.assert_status_ok();

    let updated: SlotResponse = response.json();
    assert_eq!(updated.start_time, time(9, 30));
    assert_eq!(updated.end_time, time(11, 0));
}

#[tokio::test]
async fn test_update_unknown_slot_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .put(&format!("/api/slots/{}", Uuid::new_v4()))
        .json(&json!({"start_time": "09:00", "end_time": "10:00"}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_slot_flips_flag_once() {
    let ctx = TestContext::new();
    let room = create_room(&ctx.server, 101).await;

    let slots: Vec<SlotResponse> = ctx
        .server
        .post("/api/slots")
        .json(&json!({
            "room_id": room.id,
            "date": "2026-06-15",
            "start_time": "09:00",
            "end_time": "10:00",
        }))
        .await
        .json();

    // First delete succeeds and returns the flagged row
    let response = ctx
        .server
        .delete(&format!("/api/slots/{}", slots[0].id))
        .await;
    response.assert_status_ok();

    let deleted: SlotResponse = response.json();
    assert!(deleted.is_deleted);

    // Second delete is refused
    let response = ctx
        .server
        .delete(&format!("/api/slots/{}", slots[0].id))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Conflict: Slot is already deleted");
}

#[tokio::test]
async fn test_delete_unknown_slot_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .delete(&format!("/api/slots/{}", Uuid::new_v4()))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_repository_failure_surfaces_as_internal_error() {
    let rooms = MockRoomRepo::new();
    let mut slots = MockSlotRepo::new();

    let id = Uuid::new_v4();
    slots
        .expect_find_by_id()
        .with(predicate::eq(id))
        .returning(|_| Err(eyre::eyre!("connection reset")));

    let server = mock_server(rooms, slots);

    let response = server.delete(&format!("/api/slots/{id}")).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Database error:"));
}
