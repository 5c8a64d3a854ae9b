//! Pure slot-window logic: hour partitioning and the interval predicates
//! behind every conflict check.
//!
//! Booking windows are minute-granular, half-open `[start, end)` intervals
//! within a single calendar day. Nothing here touches I/O, so the Postgres
//! queries, the in-memory store, and the tests all share one source of
//! truth for the rules.

use chrono::NaiveTime;

use crate::errors::{BookingError, BookingResult};
use crate::time::{minutes_to_time, time_minutes};

/// Length of a generated booking slot.
pub const SLOT_DURATION_MINUTES: u32 = 60;

/// A single bookable sub-interval produced by [`partition_into_hours`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Splits `[start, end)` into consecutive 60-minute windows starting at
/// `start`.
///
/// Fails with a validation error when `end <= start`. A trailing remainder
/// shorter than a full hour is dropped, so a 90-minute request yields
/// exactly one window and a 30-minute request yields none.
pub fn partition_into_hours(start: NaiveTime, end: NaiveTime) -> BookingResult<Vec<SlotWindow>> {
    let start_minutes = time_minutes(start);
    let end_minutes = time_minutes(end);

    if end_minutes <= start_minutes {
        return Err(BookingError::Validation(
            "End time must be after start time".to_string(),
        ));
    }

    let slot_count = (end_minutes - start_minutes) / SLOT_DURATION_MINUTES;

    let mut windows = Vec::with_capacity(slot_count as usize);
    for index in 0..slot_count {
        let offset = start_minutes + index * SLOT_DURATION_MINUTES;
        let (Some(window_start), Some(window_end)) = (
            minutes_to_time(offset),
            minutes_to_time(offset + SLOT_DURATION_MINUTES),
        ) else {
            return Err(BookingError::Validation(
                "Time range must fall within a single day".to_string(),
            ));
        };
        windows.push(SlotWindow {
            start: window_start,
            end: window_end,
        });
    }

    Ok(windows)
}

/// Half-open overlap test: the two windows share at least one point of
/// `[start, end)` space. Windows that only touch at a boundary do not
/// overlap.
pub fn windows_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Collision test applied when a slot's window is rewritten: the existing
/// window starts inside the new one, ends inside it, or contains it
/// entirely. The containment arm is boundary-inclusive, so an identical
/// window always collides.
pub fn windows_conflict(
    existing_start: NaiveTime,
    existing_end: NaiveTime,
    new_start: NaiveTime,
    new_end: NaiveTime,
) -> bool {
    (existing_start >= new_start && existing_start < new_end)
        || (existing_end > new_start && existing_end <= new_end)
        || (existing_start <= new_start && existing_end >= new_end)
}
