//! Reservation deletion.

use chrono::Utc;

use crate::booking::BookingStatus;
use crate::database::operations as db_ops;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::ReservationId;

/// Deletes a reservation that is not currently underway.
///
/// A future booking's Reserved period is marked Canceled and kept as
/// unlinked history; terminal periods are left untouched. The guest's
/// reservation counter is decremented and the room's cached state is
/// recomputed, becoming Free only when no other active period remains
/// for that room.
///
/// # Errors
///
/// - [`Error::ReservationNotFound`] for an unknown id
/// - [`Error::ReservationCurrentlyActive`] while the guest is checked in
///   (`start <= today < end`)
/// - [`Error::IllegalTransition`] if the booking period is Blocked; the
///   block has to be lifted first
pub fn delete_reservation(db: &mut Database, id: ReservationId) -> Result<()> {
    let today = Utc::now().date_naive();
    let tx = db.begin_transaction()?;

    let reservation =
        db_ops::get_reservation(&tx, id)?.ok_or(Error::ReservationNotFound(id))?;
    if reservation.is_underway(today) {
        return Err(Error::ReservationCurrentlyActive(id));
    }

    if let Some(period) = db_ops::booking_period_for_reservation(&tx, id)? {
        match period.status() {
            BookingStatus::Blocked => {
                return Err(Error::IllegalTransition {
                    from: BookingStatus::Blocked,
                    to: BookingStatus::Canceled,
                });
            }
            BookingStatus::Reserved => {
                db_ops::set_booking_status(&tx, period.id(), BookingStatus::Canceled)?;
            }
            BookingStatus::Canceled | BookingStatus::Completed => {}
        }
    }

    db_ops::delete_reservation_row(&tx, id)?;
    db_ops::bump_guest_reservations(&tx, reservation.guest_id(), -1)?;
    db_ops::refresh_room_state(&tx, reservation.room_id())?;

    tx.commit()?;

    log::debug!("deleted reservation {id} for room {}", reservation.room_id());

    Ok(())
}
