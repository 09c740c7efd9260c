//! Booking period status transitions and deletion.
//!
//! Every transition is validated against the state machine, applied in an
//! immediate transaction, and followed by a recomputation of the room's
//! cached state.

use chrono::NaiveDate;

use crate::booking::{BookingPeriod, BookingPeriodId, BookingStatus};
use crate::database::operations as db_ops;
use crate::database::Database;
use crate::error::{Error, Result};

fn apply_transition(
    db: &mut Database,
    id: BookingPeriodId,
    to: BookingStatus,
) -> Result<BookingPeriod> {
    let tx = db.begin_transaction()?;

    let period = db_ops::get_booking_period(&tx, id)?.ok_or(Error::BookingPeriodNotFound(id))?;
    if !period.status().can_transition(to) {
        return Err(Error::IllegalTransition {
            from: period.status(),
            to,
        });
    }

    db_ops::set_booking_status(&tx, id, to)?;
    db_ops::refresh_room_state(&tx, period.room_id())?;

    tx.commit()?;

    log::debug!("booking period {id}: {} -> {to}", period.status());

    Ok(BookingPeriod::new(
        id,
        period.room_id(),
        period.reservation_id(),
        period.range(),
        to,
    ))
}

/// Cancels a Reserved booking period.
///
/// # Errors
///
/// Returns [`Error::BookingPeriodNotFound`] for an unknown id, or
/// [`Error::IllegalTransition`] unless the period is Reserved.
pub fn cancel_booking_period(db: &mut Database, id: BookingPeriodId) -> Result<BookingPeriod> {
    apply_transition(db, id, BookingStatus::Canceled)
}

/// Completes a Reserved booking period.
///
/// # Errors
///
/// Returns [`Error::BookingPeriodNotFound`] for an unknown id, or
/// [`Error::IllegalTransition`] unless the period is Reserved.
pub fn complete_booking_period(db: &mut Database, id: BookingPeriodId) -> Result<BookingPeriod> {
    apply_transition(db, id, BookingStatus::Completed)
}

/// Administratively blocks a Reserved booking period.
///
/// # Errors
///
/// Returns [`Error::BookingPeriodNotFound`] for an unknown id, or
/// [`Error::IllegalTransition`] unless the period is Reserved.
pub fn block_booking_period(db: &mut Database, id: BookingPeriodId) -> Result<BookingPeriod> {
    apply_transition(db, id, BookingStatus::Blocked)
}

/// Lifts a block, returning the period to Reserved.
///
/// # Errors
///
/// Returns [`Error::BookingPeriodNotFound`] for an unknown id, or
/// [`Error::IllegalTransition`] unless the period is Blocked.
pub fn unblock_booking_period(db: &mut Database, id: BookingPeriodId) -> Result<BookingPeriod> {
    apply_transition(db, id, BookingStatus::Reserved)
}

/// Deletes a booking period that has reached a terminal status.
///
/// # Errors
///
/// Returns [`Error::BookingPeriodNotFound`] for an unknown id, or
/// [`Error::CannotDeleteActiveBooking`] while the period is Reserved or
/// Blocked.
pub fn delete_booking_period(db: &mut Database, id: BookingPeriodId) -> Result<()> {
    let tx = db.begin_transaction()?;

    let period = db_ops::get_booking_period(&tx, id)?.ok_or(Error::BookingPeriodNotFound(id))?;
    if !period.status().is_terminal() {
        return Err(Error::CannotDeleteActiveBooking(id));
    }

    db_ops::delete_booking_period_row(&tx, id)?;
    db_ops::refresh_room_state(&tx, period.room_id())?;

    tx.commit()?;
    Ok(())
}

/// Completes every Reserved period whose stay has fully elapsed as of
/// `today`, refreshing the affected rooms. Returns how many periods were
/// completed.
///
/// Blocked periods are skipped; a block has to be lifted explicitly.
///
/// # Errors
///
/// Returns a database error; no periods are completed then.
pub fn complete_elapsed_periods(db: &mut Database, today: NaiveDate) -> Result<usize> {
    let tx = db.begin_transaction()?;

    let elapsed = db_ops::elapsed_reserved_periods(&tx, today)?;
    let mut rooms = Vec::new();
    for period in &elapsed {
        db_ops::set_booking_status(&tx, period.id(), BookingStatus::Completed)?;
        if !rooms.contains(&period.room_id()) {
            rooms.push(period.room_id());
        }
    }
    for room_id in rooms {
        db_ops::refresh_room_state(&tx, room_id)?;
    }

    tx.commit()?;

    if !elapsed.is_empty() {
        log::debug!("completed {} elapsed booking period(s)", elapsed.len());
    }

    Ok(elapsed.len())
}
