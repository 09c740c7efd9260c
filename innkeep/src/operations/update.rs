//! Reservation updates.
//!
//! An update may move the stay to another room, other dates, or change
//! the party size. The availability re-check excludes the reservation's
//! own booking period, so unchanged or shrinking dates never conflict
//! with themselves.

use chrono::Utc;

use crate::booking::{BookingStatus, DateRange};
use crate::database::availability;
use crate::database::operations as db_ops;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::pricing;
use crate::reservation::{validate_people_count, Reservation, ReservationId};
use crate::room::RoomId;

/// Partial changes to apply to a reservation. Unset fields keep their
/// current values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReservationPatch {
    room_id: Option<RoomId>,
    range: Option<DateRange>,
    people_count: Option<i64>,
}

impl ReservationPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the reservation to another room.
    #[must_use]
    pub fn with_room(mut self, room_id: RoomId) -> Self {
        self.room_id = Some(room_id);
        self
    }

    /// Changes the stay's dates.
    #[must_use]
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Changes the party size.
    #[must_use]
    pub fn with_people_count(mut self, count: i64) -> Self {
        self.people_count = Some(count);
        self
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.room_id.is_none() && self.range.is_none() && self.people_count.is_none()
    }
}

/// Applies a patch to a reservation atomically.
///
/// The new room and dates are re-checked for availability excluding the
/// reservation's own booking period; the total price is recomputed from
/// the (possibly new) room's nightly price and the (possibly new) number
/// of nights; the booking period row is kept in step. A reservation whose
/// stay has started is immutable. An empty patch leaves the reservation
/// unchanged.
///
/// # Errors
///
/// - [`Error::ReservationNotFound`] for an unknown id
/// - [`Error::ReservationCurrentlyActive`] once the stay has started
/// - [`Error::IllegalTransition`] if the booking period is terminal
/// - [`Error::InvalidDateRange`] / [`Error::InvalidPeopleCount`] for bad
///   new values
/// - [`Error::RoomNotFound`] for an unknown target room
/// - [`Error::RoomNotAvailable`] if the target is taken for the new dates
pub fn update_reservation(
    db: &mut Database,
    id: ReservationId,
    patch: &ReservationPatch,
) -> Result<Reservation> {
    let today = Utc::now().date_naive();
    let tx = db.begin_transaction()?;

    let current = db_ops::get_reservation(&tx, id)?.ok_or(Error::ReservationNotFound(id))?;
    if current.has_started(today) {
        return Err(Error::ReservationCurrentlyActive(id));
    }

    let period = db_ops::booking_period_for_reservation(&tx, id)?.ok_or_else(|| {
        Error::Validation {
            field: "booking_period".to_string(),
            message: format!("reservation {id} has no booking period"),
        }
    })?;
    if period.status().is_terminal() {
        // A canceled or completed booking cannot be brought back by editing.
        return Err(Error::IllegalTransition {
            from: period.status(),
            to: BookingStatus::Reserved,
        });
    }

    if patch.is_empty() {
        return Ok(current);
    }

    let room_id = patch.room_id.unwrap_or_else(|| current.room_id());
    let range = patch.range.unwrap_or_else(|| current.range());
    let people_count = patch.people_count.unwrap_or_else(|| current.people_count());

    validate_people_count(people_count)?;
    availability::validate_future_range(range, today)?;

    let room = db_ops::get_room(&tx, room_id)?.ok_or(Error::RoomNotFound(room_id))?;
    if availability::has_blocking_overlap(&tx, room_id, range, Some(period.id()))? {
        return Err(Error::RoomNotAvailable {
            room_id,
            start: range.start(),
            end: range.end(),
        });
    }

    let total = pricing::total_price(room.price_per_night(), range.nights())?;
    let updated = Reservation::new(id, current.guest_id(), room_id, people_count, range, total)?;

    db_ops::update_reservation_row(&tx, &updated)?;
    db_ops::update_booking_period_row(&tx, period.id(), room_id, range)?;

    if room_id != current.room_id() {
        db_ops::refresh_room_state(&tx, room_id)?;
        db_ops::refresh_room_state(&tx, current.room_id())?;
    }

    tx.commit()?;

    log::debug!(
        "updated reservation {id}: room {room_id}, {range}, {people_count} people, total {total}"
    );

    Ok(updated)
}
