//! Error types for the innkeep library.
//!
//! This module provides a comprehensive error hierarchy for all operations
//! in the innkeep library, using `thiserror` for ergonomic error handling.

use chrono::NaiveDate;
use thiserror::Error;

use crate::booking::{BookingPeriodId, BookingStatus};
use crate::guest::GuestId;
use crate::reservation::ReservationId;
use crate::room::RoomId;

/// Result type alias for operations that may fail with an innkeep error.
///
/// # Examples
///
/// ```
/// use innkeep::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the innkeep library.
///
/// This enum encompasses all possible error conditions that can occur
/// during reservation and booking operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An invalid date range was provided.
    #[error("invalid date range {start} to {end}: {reason}")]
    InvalidDateRange {
        /// The start of the range.
        start: NaiveDate,
        /// The end of the range.
        end: NaiveDate,
        /// The reason the range is invalid.
        reason: String,
    },

    /// An invalid number of people was provided for a reservation.
    #[error("invalid people count {count}: a reservation is for 1 to 4 people")]
    InvalidPeopleCount {
        /// The invalid people count.
        count: i64,
    },

    /// An invalid hotel floor was provided.
    #[error("invalid floor {floor}: floors are numbered from 1")]
    InvalidFloor {
        /// The invalid floor number.
        floor: i32,
    },

    /// An invalid people capacity was provided for a room.
    #[error("invalid people capacity {capacity}: rooms hold 1 to 4 people")]
    InvalidCapacity {
        /// The invalid capacity value.
        capacity: i64,
    },

    /// The room is not free for the requested dates.
    #[error("room {room_id} is not available from {start} to {end}")]
    RoomNotAvailable {
        /// The contested room.
        room_id: RoomId,
        /// The requested check-in date.
        start: NaiveDate,
        /// The requested check-out date.
        end: NaiveDate,
    },

    /// The requested room does not exist.
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    /// The requested guest does not exist.
    #[error("guest not found: {0}")]
    GuestNotFound(GuestId),

    /// The requested reservation does not exist.
    #[error("reservation not found: {0}")]
    ReservationNotFound(ReservationId),

    /// The requested booking period does not exist.
    #[error("booking period not found: {0}")]
    BookingPeriodNotFound(BookingPeriodId),

    /// A booking period status transition is not allowed.
    #[error("illegal booking status transition from {from} to {to}")]
    IllegalTransition {
        /// The current status.
        from: BookingStatus,
        /// The requested status.
        to: BookingStatus,
    },

    /// Attempted to delete a booking period that has not reached a
    /// terminal status.
    #[error("cannot delete active booking period {0}")]
    CannotDeleteActiveBooking(BookingPeriodId),

    /// The reservation's stay is underway and the reservation can no
    /// longer be changed or deleted.
    #[error("reservation {0} is currently in progress")]
    ReservationCurrentlyActive(ReservationId),

    /// Attempted to delete a room that is not free.
    #[error("room {0} cannot be deleted while occupied or blocked")]
    RoomOccupied(RoomId),

    /// A stored enum value could not be decoded.
    #[error("invalid stored {kind} value: '{value}'")]
    InvalidStoredValue {
        /// The kind of value (room type, bed type, status, ...).
        kind: &'static str,
        /// The raw stored text.
        value: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A JSON configuration error occurred.
    #[error("configuration error: {0}")]
    ConfigurationJson(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: u32,
        /// The schema version found in the database.
        found: u32,
    },
}

impl Error {
    /// Check if the error means a requested entity does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::{Error, RoomId};
    ///
    /// let err = Error::RoomNotFound(RoomId::new(42));
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RoomNotFound(_)
                | Self::GuestNotFound(_)
                | Self::ReservationNotFound(_)
                | Self::BookingPeriodNotFound(_)
        )
    }

    /// Check if the error is a booking conflict (the room was taken for
    /// the requested dates).
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::RoomNotAvailable { .. })
    }

    /// Check if the error rejects bad caller input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::InvalidDateRange { .. }
                | Self::InvalidPeopleCount { .. }
                | Self::InvalidFloor { .. }
                | Self::InvalidCapacity { .. }
        )
    }

    /// Check if the error rejects an operation because of the current
    /// lifecycle state of an entity.
    #[must_use]
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            Self::IllegalTransition { .. }
                | Self::CannotDeleteActiveBooking(_)
                | Self::ReservationCurrentlyActive(_)
                | Self::RoomOccupied(_)
        )
    }
}
