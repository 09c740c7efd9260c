#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # innkeep
//!
//! A library for hotel room reservations with conflict-free booking
//! periods.
//!
//! The engine prices rooms from their attributes, answers availability
//! queries over committed booking periods with half-open date semantics,
//! drives each booking period through a small status state machine, and
//! coordinates reservation creation, update, and deletion as atomic
//! units against an embedded `SQLite` store. Under concurrent creation
//! for the same room and overlapping dates, at most one reservation
//! wins; the other fails with [`Error::RoomNotAvailable`].
//!
//! ## Core Types
//!
//! - [`Room`], [`RoomType`], [`BedType`], [`RoomState`]: room inventory
//! - [`Guest`]: registered guests
//! - [`DateRange`], [`BookingStatus`], [`BookingPeriod`]: occupancy
//! - [`Reservation`]: a guest holding a room at a fixed total price
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use innkeep::DateRange;
//!
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2030, 6, 5).unwrap(),
//! )
//! .unwrap();
//! assert_eq!(range.nights(), 4);
//! ```

pub mod booking;
pub mod config;
pub mod database;
pub mod error;
pub mod guest;
pub mod operations;
pub mod pricing;
pub mod reservation;
pub mod room;

// Re-export key types at crate root for convenience
pub use booking::{BookingPeriod, BookingPeriodId, BookingStatus, DateRange};
pub use config::{Config, ConfigBuilder};
pub use database::{check_availability, list_free_rooms, Database, DatabaseConfig};
pub use error::{Error, Result};
pub use guest::{Guest, GuestId, NewGuest};
pub use operations::{CreateReservationOptions, GuestRef, ReservationPatch};
pub use reservation::{Reservation, ReservationId};
pub use room::{BedType, NewRoom, Room, RoomId, RoomState, RoomType};
