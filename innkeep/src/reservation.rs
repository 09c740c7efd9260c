//! Reservation entities.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::booking::DateRange;
use crate::error::{Error, Result};
use crate::guest::GuestId;
use crate::room::RoomId;

/// Identifier for a reservation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Creates a reservation id from a raw row id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored reservation: a guest holding a room for a date range at a
/// fixed total price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    guest_id: GuestId,
    room_id: RoomId,
    people_count: i64,
    range: DateRange,
    total_price: Decimal,
}

impl Reservation {
    /// Assembles a reservation, validating the people count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPeopleCount`] unless `people_count` is
    /// between 1 and 4.
    pub fn new(
        id: ReservationId,
        guest_id: GuestId,
        room_id: RoomId,
        people_count: i64,
        range: DateRange,
        total_price: Decimal,
    ) -> Result<Self> {
        validate_people_count(people_count)?;
        Ok(Self {
            id,
            guest_id,
            room_id,
            people_count,
            range,
            total_price,
        })
    }

    /// The reservation's row id.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// The guest holding the reservation.
    #[must_use]
    pub const fn guest_id(&self) -> GuestId {
        self.guest_id
    }

    /// The reserved room.
    #[must_use]
    pub const fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Number of people staying.
    #[must_use]
    pub const fn people_count(&self) -> i64 {
        self.people_count
    }

    /// The stay's date range.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        self.range
    }

    /// Number of nights.
    #[must_use]
    pub fn nights(&self) -> i64 {
        self.range.nights()
    }

    /// Total price for the whole stay.
    #[must_use]
    pub const fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Whether the stay is in progress on `today`: the guest has checked
    /// in and not yet checked out.
    #[must_use]
    pub fn is_underway(&self, today: NaiveDate) -> bool {
        self.range.contains(today)
    }

    /// Whether the stay has started on or before `today` (in progress or
    /// already over).
    #[must_use]
    pub fn has_started(&self, today: NaiveDate) -> bool {
        self.range.start() <= today
    }
}

/// Validates a people count against the 1-to-4 rule shared by
/// reservations and room capacities.
///
/// # Errors
///
/// Returns [`Error::InvalidPeopleCount`] when out of range.
pub fn validate_people_count(count: i64) -> Result<()> {
    if (1..=4).contains(&count) {
        Ok(())
    } else {
        Err(Error::InvalidPeopleCount { count })
    }
}
