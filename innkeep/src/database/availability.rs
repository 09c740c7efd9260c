//! Availability queries over committed booking periods.
//!
//! Booking period rows are the source of truth for availability; the
//! room's cached state never participates. Two periods conflict when
//! their half-open ranges overlap: `a.start < b.end AND b.start < a.end`.
//! Canceled and Completed periods never block, whatever their dates.

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection};

use crate::booking::{BookingPeriodId, DateRange};
use crate::error::{Error, Result};
use crate::room::RoomId;

use super::connection::Database;
use super::operations::date_to_text;

/// Rejects ranges that start in the past.
///
/// `DateRange` already guarantees `end > start`; availability additionally
/// requires the stay not to begin before `today`.
pub(crate) fn validate_future_range(range: DateRange, today: NaiveDate) -> Result<()> {
    if range.start() < today {
        return Err(Error::InvalidDateRange {
            start: range.start(),
            end: range.end(),
            reason: format!("start must not be before {today}"),
        });
    }
    Ok(())
}

/// Whether any blocking (Reserved or Blocked) period for the room overlaps
/// the range, optionally ignoring one period.
///
/// The exclusion lets an update re-check a reservation's new dates without
/// colliding with its own booking period.
pub(crate) fn has_blocking_overlap(
    conn: &Connection,
    room_id: RoomId,
    range: DateRange,
    exclude: Option<BookingPeriodId>,
) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM booking_periods
         WHERE room_id = ?1
           AND status IN ('reserved', 'blocked')
           AND start_at < ?2
           AND ?3 < end_at
           AND id <> ?4",
        params![
            room_id.value(),
            date_to_text(range.end()),
            date_to_text(range.start()),
            exclude.map_or(-1, BookingPeriodId::value),
        ],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Ids of all rooms with no blocking overlap for the range, ordered by id.
pub(crate) fn free_rooms(conn: &Connection, range: DateRange) -> Result<Vec<RoomId>> {
    let mut stmt = conn.prepare(
        "SELECT id FROM rooms
         WHERE id NOT IN (
             SELECT room_id FROM booking_periods
             WHERE status IN ('reserved', 'blocked')
               AND start_at < ?1
               AND ?2 < end_at
         )
         ORDER BY id",
    )?;
    let ids = stmt
        .query_map(
            params![date_to_text(range.end()), date_to_text(range.start())],
            |row| row.get::<_, i64>(0).map(RoomId::new),
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(ids)
}

/// Checks whether a room is free for a date range.
///
/// The range must not start in the past. Only committed Reserved and
/// Blocked periods count against the room.
///
/// # Errors
///
/// Returns [`Error::InvalidDateRange`] for past start dates,
/// [`Error::RoomNotFound`] if the room does not exist, or a database
/// error.
pub fn check_availability(db: &Database, room_id: RoomId, range: DateRange) -> Result<bool> {
    validate_future_range(range, Utc::now().date_naive())?;
    let conn = db.connection();
    if super::operations::get_room(conn, room_id)?.is_none() {
        return Err(Error::RoomNotFound(room_id));
    }
    Ok(!has_blocking_overlap(conn, room_id, range, None)?)
}

/// Lists every room free for a date range, ordered by id.
///
/// # Errors
///
/// Returns [`Error::InvalidDateRange`] for past start dates, or a
/// database error.
pub fn list_free_rooms(db: &Database, range: DateRange) -> Result<Vec<RoomId>> {
    validate_future_range(range, Utc::now().date_naive())?;
    free_rooms(db.connection(), range)
}
