//! Reservation creation.
//!
//! Creating a reservation is the conflict-sensitive operation: the
//! availability re-check, the reservation row, its booking period, and
//! the room and guest bookkeeping all happen in one immediate write
//! transaction. Under concurrency, SQLite's single-writer lock serializes
//! contenders; whoever commits first wins and the loser's in-transaction
//! re-check sees the winner's period and fails with
//! [`Error::RoomNotAvailable`].

use chrono::Utc;

use crate::booking::{BookingStatus, DateRange};
use crate::database::availability;
use crate::database::operations as db_ops;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::guest::{GuestId, NewGuest};
use crate::pricing;
use crate::reservation::{validate_people_count, Reservation};
use crate::room::RoomId;

/// Who the reservation is for: an existing guest or one to be created
/// as part of the same transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestRef {
    /// An already-registered guest.
    Existing(GuestId),
    /// A new guest, inserted atomically with the reservation.
    New(NewGuest),
}

/// Options for creating a reservation.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use innkeep::database::{Database, DatabaseConfig};
/// use innkeep::operations::{create_reservation, CreateReservationOptions, GuestRef};
/// use innkeep::{DateRange, NewGuest, RoomId};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2030, 6, 5).unwrap(),
/// )
/// .unwrap();
///
/// let options = CreateReservationOptions::new(
///     GuestRef::New(NewGuest::new("Ada Lovelace", "ada@example.com")),
///     RoomId::new(1),
///     range,
/// )
/// .with_people_count(2);
///
/// let reservation = create_reservation(&mut db, options).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReservationOptions {
    guest: GuestRef,
    room_id: RoomId,
    range: DateRange,
    people_count: i64,
}

impl CreateReservationOptions {
    /// Creates options for one person; adjust with
    /// [`with_people_count`](Self::with_people_count).
    #[must_use]
    pub fn new(guest: GuestRef, room_id: RoomId, range: DateRange) -> Self {
        Self {
            guest,
            room_id,
            range,
            people_count: 1,
        }
    }

    /// Sets the number of people staying (1 to 4).
    #[must_use]
    pub fn with_people_count(mut self, count: i64) -> Self {
        self.people_count = count;
        self
    }
}

/// Creates a reservation, its booking period, and the associated
/// bookkeeping in one atomic unit.
///
/// The requested room must be in the free set for the requested dates at
/// the moment the write transaction holds the lock; the check runs inside
/// the transaction, so a concurrent creation for the same room and
/// overlapping dates cannot also succeed.
///
/// # Errors
///
/// - [`Error::InvalidDateRange`] if the stay starts in the past
/// - [`Error::InvalidPeopleCount`] for a people count outside 1 to 4
/// - [`Error::Validation`] for blank new-guest fields
/// - [`Error::RoomNotFound`] / [`Error::GuestNotFound`] for unknown ids
/// - [`Error::RoomNotAvailable`] if the room is taken for the dates
/// - [`Error::Database`] if the store fails; nothing is persisted then
pub fn create_reservation(
    db: &mut Database,
    options: CreateReservationOptions,
) -> Result<Reservation> {
    let today = Utc::now().date_naive();
    availability::validate_future_range(options.range, today)?;
    validate_people_count(options.people_count)?;
    if let GuestRef::New(ref guest) = options.guest {
        guest.validate()?;
    }

    let tx = db.begin_transaction()?;

    let room = db_ops::get_room(&tx, options.room_id)?
        .ok_or(Error::RoomNotFound(options.room_id))?;

    // The authoritative conflict check: membership in the free set,
    // evaluated while holding the write lock.
    let free = availability::free_rooms(&tx, options.range)?;
    if !free.contains(&options.room_id) {
        return Err(Error::RoomNotAvailable {
            room_id: options.room_id,
            start: options.range.start(),
            end: options.range.end(),
        });
    }

    let total = pricing::total_price(room.price_per_night(), options.range.nights())?;

    let guest_id = match options.guest {
        GuestRef::Existing(id) => {
            db_ops::get_guest(&tx, id)?.ok_or(Error::GuestNotFound(id))?;
            id
        }
        GuestRef::New(ref guest) => db_ops::insert_guest(&tx, guest)?,
    };

    let reservation_id = db_ops::insert_reservation(
        &tx,
        guest_id,
        room.id(),
        options.people_count,
        options.range,
        total,
    )?;
    db_ops::insert_booking_period(
        &tx,
        room.id(),
        reservation_id,
        options.range,
        BookingStatus::Reserved,
    )?;

    db_ops::refresh_room_state(&tx, room.id())?;
    db_ops::bump_times_booked(&tx, room.id())?;
    db_ops::bump_guest_reservations(&tx, guest_id, 1)?;

    tx.commit()?;

    log::debug!(
        "reserved room {} for guest {guest_id}, {} ({} nights, total {total})",
        room.id(),
        options.range,
        options.range.nights(),
    );

    Reservation::new(
        reservation_id,
        guest_id,
        room.id(),
        options.people_count,
        options.range,
        total,
    )
}
