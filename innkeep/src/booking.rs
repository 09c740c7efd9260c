//! Booking periods: date ranges, statuses, and the status state machine.
//!
//! A booking period is the unit of room occupancy. Availability is decided
//! from committed booking period rows, never from the room's cached state.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::reservation::ReservationId;
use crate::room::RoomId;

/// Identifier for a booking period row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingPeriodId(i64);

impl BookingPeriodId {
    /// Creates a booking period id from a raw row id.
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

impl fmt::Display for BookingPeriodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A half-open range of calendar dates: `[start, end)`.
///
/// The end date is the check-out day and is never occupied, so a stay
/// ending on a given day and another starting that same day do not
/// conflict.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::DateRange;
///
/// let june = |d| NaiveDate::from_ymd_opt(2030, 6, d).unwrap();
/// let a = DateRange::new(june(1), june(5)).unwrap();
/// let b = DateRange::new(june(5), june(9)).unwrap();
/// assert_eq!(a.nights(), 4);
/// assert!(!a.overlaps(&b));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a date range, requiring `end > start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDateRange`] if `end <= start` (a stay is
    /// at least one night).
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end <= start {
            return Err(Error::InvalidDateRange {
                start,
                end,
                reason: "end must be after start".to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// The check-in date (first occupied night).
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// The check-out date (exclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of nights in the range.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Whether two ranges share at least one occupied night.
    ///
    /// Half-open semantics: `self.start < other.end && other.start < self.end`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether a given day falls inside the range (check-out day excluded).
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day < self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Lifecycle status of a booking period.
///
/// Allowed transitions:
///
/// - Reserved → Canceled
/// - Reserved → Completed
/// - Reserved ↔ Blocked
///
/// Canceled and Completed are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Active, confirmed booking. The initial status.
    Reserved,
    /// Administratively held; still occupies the room's dates.
    Blocked,
    /// Canceled before the stay. Terminal.
    Canceled,
    /// Stay finished. Terminal.
    Completed,
}

impl BookingStatus {
    /// Whether this status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Canceled | Self::Completed)
    }

    /// Whether a period in this status makes its dates unavailable.
    #[must_use]
    pub const fn blocks_availability(self) -> bool {
        matches!(self, Self::Reserved | Self::Blocked)
    }

    /// Whether the state machine allows moving from `self` to `to`.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::BookingStatus;
    ///
    /// assert!(BookingStatus::Reserved.can_transition(BookingStatus::Canceled));
    /// assert!(BookingStatus::Blocked.can_transition(BookingStatus::Reserved));
    /// assert!(!BookingStatus::Canceled.can_transition(BookingStatus::Reserved));
    /// assert!(!BookingStatus::Blocked.can_transition(BookingStatus::Completed));
    /// ```
    #[must_use]
    pub const fn can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Reserved, Self::Canceled | Self::Completed | Self::Blocked)
                | (Self::Blocked, Self::Reserved)
        )
    }

    /// Stable text form used for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::Blocked => "blocked",
            Self::Canceled => "canceled",
            Self::Completed => "completed",
        }
    }

    /// Decodes the stable text form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStoredValue`] for unknown text.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "reserved" => Ok(Self::Reserved),
            "blocked" => Ok(Self::Blocked),
            "canceled" => Ok(Self::Canceled),
            "completed" => Ok(Self::Completed),
            _ => Err(Error::InvalidStoredValue {
                kind: "booking status",
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored booking period: one room, one reservation, one date range.
///
/// `reservation` is `None` only for historical periods whose reservation
/// has since been deleted; a live period always carries its reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPeriod {
    id: BookingPeriodId,
    room_id: RoomId,
    reservation_id: Option<ReservationId>,
    range: DateRange,
    status: BookingStatus,
}

impl BookingPeriod {
    /// Assembles a booking period from stored fields.
    #[must_use]
    pub const fn new(
        id: BookingPeriodId,
        room_id: RoomId,
        reservation_id: Option<ReservationId>,
        range: DateRange,
        status: BookingStatus,
    ) -> Self {
        Self {
            id,
            room_id,
            reservation_id,
            range,
            status,
        }
    }

    /// The period's row id.
    #[must_use]
    pub const fn id(&self) -> BookingPeriodId {
        self.id
    }

    /// The room this period occupies.
    #[must_use]
    pub const fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// The reservation this period belongs to, if it still exists.
    #[must_use]
    pub const fn reservation_id(&self) -> Option<ReservationId> {
        self.reservation_id
    }

    /// The occupied date range.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        self.range
    }

    /// The current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> BookingStatus {
        self.status
    }

    /// Whether the period currently makes its dates unavailable.
    #[must_use]
    pub const fn blocks_availability(&self) -> bool {
        self.status.blocks_availability()
    }
}
