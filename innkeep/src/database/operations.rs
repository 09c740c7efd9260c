//! Database CRUD operations for rooms, guests, reservations, and booking
//! periods.
//!
//! Row-level functions take a plain [`Connection`] so the coordinator can
//! run them inside one transaction; read-only queries are also exposed as
//! [`Database`] methods.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::booking::{BookingPeriod, BookingPeriodId, BookingStatus, DateRange};
use crate::error::{Error, Result};
use crate::guest::{Guest, GuestId, NewGuest};
use crate::reservation::{Reservation, ReservationId};
use crate::room::{BedType, Room, RoomId, RoomState, RoomType};

use super::connection::Database;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn date_to_text(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn text_to_date(text: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn text_to_decimal(text: &str) -> rusqlite::Result<Decimal> {
    text.parse::<Decimal>()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn conversion_err(e: Error) -> rusqlite::Error {
    rusqlite::Error::ToSqlConversionFailure(Box::new(e))
}

/// Deserializes a room from a row.
///
/// Expects fields in this order: id, floor, `number_of_beds`, `bed_type`,
/// `people_capacity`, `room_type`, `price_per_night`, state, `times_booked`.
fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    let id: i64 = row.get(0)?;
    let floor: i32 = row.get(1)?;
    let number_of_beds: i64 = row.get(2)?;
    let bed_type: String = row.get(3)?;
    let people_capacity: i64 = row.get(4)?;
    let room_type: String = row.get(5)?;
    let price: String = row.get(6)?;
    let state: String = row.get(7)?;
    let times_booked: i64 = row.get(8)?;

    Ok(Room::new(
        RoomId::new(id),
        floor,
        number_of_beds,
        BedType::parse(&bed_type).map_err(conversion_err)?,
        people_capacity,
        RoomType::parse(&room_type).map_err(conversion_err)?,
        text_to_decimal(&price)?,
        RoomState::parse(&state).map_err(conversion_err)?,
        times_booked,
    ))
}

/// Deserializes a guest from a row: id, name, email, `number_of_reservations`.
fn row_to_guest(row: &rusqlite::Row<'_>) -> rusqlite::Result<Guest> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let email: String = row.get(2)?;
    let number_of_reservations: i64 = row.get(3)?;
    Ok(Guest::new(
        GuestId::new(id),
        name,
        email,
        number_of_reservations,
    ))
}

/// Deserializes a reservation from a row: id, `guest_id`, `room_id`,
/// `people_count`, `start_at`, `end_at`, `total_price`.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let guest_id: i64 = row.get(1)?;
    let room_id: i64 = row.get(2)?;
    let people_count: i64 = row.get(3)?;
    let start_at: String = row.get(4)?;
    let end_at: String = row.get(5)?;
    let total_price: String = row.get(6)?;

    let range =
        DateRange::new(text_to_date(&start_at)?, text_to_date(&end_at)?).map_err(conversion_err)?;

    Reservation::new(
        ReservationId::new(id),
        GuestId::new(guest_id),
        RoomId::new(room_id),
        people_count,
        range,
        text_to_decimal(&total_price)?,
    )
    .map_err(conversion_err)
}

/// Deserializes a booking period from a row: id, `room_id`,
/// `reservation_id`, `start_at`, `end_at`, status.
fn row_to_booking_period(row: &rusqlite::Row<'_>) -> rusqlite::Result<BookingPeriod> {
    let id: i64 = row.get(0)?;
    let room_id: i64 = row.get(1)?;
    let reservation_id: Option<i64> = row.get(2)?;
    let start_at: String = row.get(3)?;
    let end_at: String = row.get(4)?;
    let status: String = row.get(5)?;

    let range =
        DateRange::new(text_to_date(&start_at)?, text_to_date(&end_at)?).map_err(conversion_err)?;

    Ok(BookingPeriod::new(
        BookingPeriodId::new(id),
        RoomId::new(room_id),
        reservation_id.map(ReservationId::new),
        range,
        BookingStatus::parse(&status).map_err(conversion_err)?,
    ))
}

const ROOM_COLUMNS: &str =
    "id, floor, number_of_beds, bed_type, people_capacity, room_type, price_per_night, state, times_booked";

const RESERVATION_COLUMNS: &str =
    "id, guest_id, room_id, people_count, start_at, end_at, total_price";

const PERIOD_COLUMNS: &str = "id, room_id, reservation_id, start_at, end_at, status";

// --- rooms ---

pub(crate) fn insert_room(
    conn: &Connection,
    room: &crate::room::NewRoom,
    price_per_night: Decimal,
    state: RoomState,
) -> Result<RoomId> {
    conn.execute(
        "INSERT INTO rooms (floor, number_of_beds, bed_type, people_capacity, room_type, price_per_night, state)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            room.floor,
            room.number_of_beds,
            room.bed_type.as_str(),
            room.people_capacity,
            room.room_type.as_str(),
            price_per_night.to_string(),
            state.as_str(),
        ],
    )?;
    Ok(RoomId::new(conn.last_insert_rowid()))
}

pub(crate) fn get_room(conn: &Connection, id: RoomId) -> Result<Option<Room>> {
    conn.query_row(
        &format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = ?1"),
        [id.value()],
        row_to_room,
    )
    .optional()
    .map_err(Error::from)
}

pub(crate) fn list_rooms(conn: &Connection) -> Result<Vec<Room>> {
    let mut stmt = conn.prepare(&format!("SELECT {ROOM_COLUMNS} FROM rooms ORDER BY id"))?;
    let rooms = stmt
        .query_map([], row_to_room)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rooms)
}

pub(crate) fn list_rooms_by_state(conn: &Connection, state: RoomState) -> Result<Vec<Room>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ROOM_COLUMNS} FROM rooms WHERE state = ?1 ORDER BY id"
    ))?;
    let rooms = stmt
        .query_map([state.as_str()], row_to_room)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rooms)
}

pub(crate) fn set_room_state(conn: &Connection, id: RoomId, state: RoomState) -> Result<bool> {
    let rows = conn.execute(
        "UPDATE rooms SET state = ?1 WHERE id = ?2",
        params![state.as_str(), id.value()],
    )?;
    Ok(rows > 0)
}

pub(crate) fn bump_times_booked(conn: &Connection, id: RoomId) -> Result<bool> {
    let rows = conn.execute(
        "UPDATE rooms SET times_booked = times_booked + 1 WHERE id = ?1",
        [id.value()],
    )?;
    Ok(rows > 0)
}

pub(crate) fn delete_room_row(conn: &Connection, id: RoomId) -> Result<bool> {
    let rows = conn.execute("DELETE FROM rooms WHERE id = ?1", [id.value()])?;
    Ok(rows > 0)
}

/// Removes all booking periods and reservations referencing a room.
///
/// Periods go first so their reservation references are gone before the
/// reservation rows are.
pub(crate) fn purge_room_history(conn: &Connection, id: RoomId) -> Result<()> {
    conn.execute(
        "DELETE FROM booking_periods WHERE room_id = ?1",
        [id.value()],
    )?;
    conn.execute("DELETE FROM reservations WHERE room_id = ?1", [id.value()])?;
    Ok(())
}

/// Number of non-terminal booking periods for a room.
pub(crate) fn active_period_count(conn: &Connection, id: RoomId) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM booking_periods
         WHERE room_id = ?1 AND status IN ('reserved', 'blocked')",
        [id.value()],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Recomputes a room's cached state from its non-terminal booking periods.
///
/// Blocked wins over Reserved; no non-terminal period means Free. Rooms in
/// Maintenance are left alone, that state is set and cleared by staff.
pub(crate) fn refresh_room_state(conn: &Connection, id: RoomId) -> Result<()> {
    let room = get_room(conn, id)?.ok_or(Error::RoomNotFound(id))?;
    if room.state() == RoomState::Maintenance {
        return Ok(());
    }

    let blocked: i64 = conn.query_row(
        "SELECT COUNT(*) FROM booking_periods WHERE room_id = ?1 AND status = 'blocked'",
        [id.value()],
        |row| row.get(0),
    )?;
    let reserved: i64 = conn.query_row(
        "SELECT COUNT(*) FROM booking_periods WHERE room_id = ?1 AND status = 'reserved'",
        [id.value()],
        |row| row.get(0),
    )?;

    let state = if blocked > 0 {
        RoomState::Blocked
    } else if reserved > 0 {
        RoomState::Reserved
    } else {
        RoomState::Free
    };
    set_room_state(conn, id, state)?;
    Ok(())
}

// --- guests ---

pub(crate) fn insert_guest(conn: &Connection, guest: &NewGuest) -> Result<GuestId> {
    conn.execute(
        "INSERT INTO guests (name, email) VALUES (?1, ?2)",
        params![guest.name, guest.email],
    )?;
    Ok(GuestId::new(conn.last_insert_rowid()))
}

pub(crate) fn get_guest(conn: &Connection, id: GuestId) -> Result<Option<Guest>> {
    conn.query_row(
        "SELECT id, name, email, number_of_reservations FROM guests WHERE id = ?1",
        [id.value()],
        row_to_guest,
    )
    .optional()
    .map_err(Error::from)
}

pub(crate) fn bump_guest_reservations(
    conn: &Connection,
    id: GuestId,
    delta: i64,
) -> Result<bool> {
    let rows = conn.execute(
        "UPDATE guests SET number_of_reservations = MAX(0, number_of_reservations + ?1) WHERE id = ?2",
        params![delta, id.value()],
    )?;
    Ok(rows > 0)
}

// --- reservations ---

pub(crate) fn insert_reservation(
    conn: &Connection,
    guest_id: GuestId,
    room_id: RoomId,
    people_count: i64,
    range: DateRange,
    total_price: Decimal,
) -> Result<ReservationId> {
    conn.execute(
        "INSERT INTO reservations (guest_id, room_id, people_count, start_at, end_at, total_price)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            guest_id.value(),
            room_id.value(),
            people_count,
            date_to_text(range.start()),
            date_to_text(range.end()),
            total_price.to_string(),
        ],
    )?;
    Ok(ReservationId::new(conn.last_insert_rowid()))
}

pub(crate) fn get_reservation(
    conn: &Connection,
    id: ReservationId,
) -> Result<Option<Reservation>> {
    conn.query_row(
        &format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1"),
        [id.value()],
        row_to_reservation,
    )
    .optional()
    .map_err(Error::from)
}

pub(crate) fn update_reservation_row(
    conn: &Connection,
    reservation: &Reservation,
) -> Result<bool> {
    let rows = conn.execute(
        "UPDATE reservations
         SET guest_id = ?1, room_id = ?2, people_count = ?3, start_at = ?4, end_at = ?5, total_price = ?6
         WHERE id = ?7",
        params![
            reservation.guest_id().value(),
            reservation.room_id().value(),
            reservation.people_count(),
            date_to_text(reservation.range().start()),
            date_to_text(reservation.range().end()),
            reservation.total_price().to_string(),
            reservation.id().value(),
        ],
    )?;
    Ok(rows > 0)
}

pub(crate) fn delete_reservation_row(conn: &Connection, id: ReservationId) -> Result<bool> {
    let rows = conn.execute("DELETE FROM reservations WHERE id = ?1", [id.value()])?;
    Ok(rows > 0)
}

pub(crate) fn reservations_by_room(conn: &Connection, room_id: RoomId) -> Result<Vec<Reservation>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE room_id = ?1 ORDER BY start_at"
    ))?;
    let reservations = stmt
        .query_map([room_id.value()], row_to_reservation)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(reservations)
}

pub(crate) fn reservations_by_guest(
    conn: &Connection,
    guest_id: GuestId,
) -> Result<Vec<Reservation>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE guest_id = ?1 ORDER BY start_at"
    ))?;
    let reservations = stmt
        .query_map([guest_id.value()], row_to_reservation)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(reservations)
}

// --- booking periods ---

pub(crate) fn insert_booking_period(
    conn: &Connection,
    room_id: RoomId,
    reservation_id: ReservationId,
    range: DateRange,
    status: BookingStatus,
) -> Result<BookingPeriodId> {
    conn.execute(
        "INSERT INTO booking_periods (room_id, reservation_id, start_at, end_at, status)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            room_id.value(),
            reservation_id.value(),
            date_to_text(range.start()),
            date_to_text(range.end()),
            status.as_str(),
        ],
    )?;
    Ok(BookingPeriodId::new(conn.last_insert_rowid()))
}

pub(crate) fn get_booking_period(
    conn: &Connection,
    id: BookingPeriodId,
) -> Result<Option<BookingPeriod>> {
    conn.query_row(
        &format!("SELECT {PERIOD_COLUMNS} FROM booking_periods WHERE id = ?1"),
        [id.value()],
        row_to_booking_period,
    )
    .optional()
    .map_err(Error::from)
}

pub(crate) fn booking_period_for_reservation(
    conn: &Connection,
    reservation_id: ReservationId,
) -> Result<Option<BookingPeriod>> {
    conn.query_row(
        &format!("SELECT {PERIOD_COLUMNS} FROM booking_periods WHERE reservation_id = ?1"),
        [reservation_id.value()],
        row_to_booking_period,
    )
    .optional()
    .map_err(Error::from)
}

pub(crate) fn set_booking_status(
    conn: &Connection,
    id: BookingPeriodId,
    status: BookingStatus,
) -> Result<bool> {
    let rows = conn.execute(
        "UPDATE booking_periods SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id.value()],
    )?;
    Ok(rows > 0)
}

pub(crate) fn update_booking_period_row(
    conn: &Connection,
    id: BookingPeriodId,
    room_id: RoomId,
    range: DateRange,
) -> Result<bool> {
    let rows = conn.execute(
        "UPDATE booking_periods SET room_id = ?1, start_at = ?2, end_at = ?3 WHERE id = ?4",
        params![
            room_id.value(),
            date_to_text(range.start()),
            date_to_text(range.end()),
            id.value(),
        ],
    )?;
    Ok(rows > 0)
}

pub(crate) fn delete_booking_period_row(conn: &Connection, id: BookingPeriodId) -> Result<bool> {
    let rows = conn.execute("DELETE FROM booking_periods WHERE id = ?1", [id.value()])?;
    Ok(rows > 0)
}

pub(crate) fn booking_periods_by_room(
    conn: &Connection,
    room_id: RoomId,
) -> Result<Vec<BookingPeriod>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PERIOD_COLUMNS} FROM booking_periods WHERE room_id = ?1 ORDER BY start_at"
    ))?;
    let periods = stmt
        .query_map([room_id.value()], row_to_booking_period)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(periods)
}

pub(crate) fn booking_periods_by_status(
    conn: &Connection,
    status: BookingStatus,
) -> Result<Vec<BookingPeriod>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PERIOD_COLUMNS} FROM booking_periods WHERE status = ?1 ORDER BY start_at"
    ))?;
    let periods = stmt
        .query_map([status.as_str()], row_to_booking_period)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(periods)
}

/// Reserved periods whose stay has fully elapsed as of `today`.
pub(crate) fn elapsed_reserved_periods(
    conn: &Connection,
    today: NaiveDate,
) -> Result<Vec<BookingPeriod>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PERIOD_COLUMNS} FROM booking_periods
         WHERE status = 'reserved' AND end_at <= ?1
         ORDER BY end_at"
    ))?;
    let periods = stmt
        .query_map([date_to_text(today)], row_to_booking_period)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(periods)
}

impl Database {
    /// Fetches a room by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room(&self, id: RoomId) -> Result<Option<Room>> {
        get_room(self.connection(), id)
    }

    /// Lists all rooms ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms(&self) -> Result<Vec<Room>> {
        list_rooms(self.connection())
    }

    /// Lists rooms whose cached state matches `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms_by_state(&self, state: RoomState) -> Result<Vec<Room>> {
        list_rooms_by_state(self.connection(), state)
    }

    /// Fetches a guest by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_guest(&self, id: GuestId) -> Result<Option<Guest>> {
        get_guest(self.connection(), id)
    }

    /// Fetches a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(&self, id: ReservationId) -> Result<Option<Reservation>> {
        get_reservation(self.connection(), id)
    }

    /// Lists a room's reservations ordered by check-in date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn reservations_by_room(&self, room_id: RoomId) -> Result<Vec<Reservation>> {
        reservations_by_room(self.connection(), room_id)
    }

    /// Lists a guest's reservations ordered by check-in date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn reservations_by_guest(&self, guest_id: GuestId) -> Result<Vec<Reservation>> {
        reservations_by_guest(self.connection(), guest_id)
    }

    /// Fetches a booking period by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_booking_period(&self, id: BookingPeriodId) -> Result<Option<BookingPeriod>> {
        get_booking_period(self.connection(), id)
    }

    /// Fetches the booking period paired with a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn booking_period_for_reservation(
        &self,
        reservation_id: ReservationId,
    ) -> Result<Option<BookingPeriod>> {
        booking_period_for_reservation(self.connection(), reservation_id)
    }

    /// Lists a room's booking periods ordered by check-in date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn booking_periods_by_room(&self, room_id: RoomId) -> Result<Vec<BookingPeriod>> {
        booking_periods_by_room(self.connection(), room_id)
    }

    /// Lists all booking periods in a given status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn booking_periods_by_status(&self, status: BookingStatus) -> Result<Vec<BookingPeriod>> {
        booking_periods_by_status(self.connection(), status)
    }
}
