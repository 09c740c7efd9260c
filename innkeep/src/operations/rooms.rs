//! Room and guest management.

use crate::database::operations as db_ops;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::guest::{Guest, NewGuest};
use crate::pricing;
use crate::room::{NewRoom, Room, RoomId, RoomState};

/// Creates a room, computing its nightly price from its attributes.
///
/// New rooms start Free with an empty booking history.
///
/// # Errors
///
/// Returns [`Error::InvalidFloor`], [`Error::InvalidCapacity`], or
/// [`Error::Validation`] if the attributes violate the room rules, or a
/// database error.
pub fn create_room(db: &mut Database, room: &NewRoom) -> Result<Room> {
    room.validate()?;
    let price = pricing::nightly_price(
        room.room_type,
        room.bed_type,
        room.floor,
        room.people_capacity,
    )?;

    let tx = db.begin_transaction()?;
    let id = db_ops::insert_room(&tx, room, price, RoomState::Free)?;
    tx.commit()?;

    log::debug!("created room {id} ({}, {price}/night)", room.room_type);

    Ok(Room::new(
        id,
        room.floor,
        room.number_of_beds,
        room.bed_type,
        room.people_capacity,
        room.room_type,
        price,
        RoomState::Free,
        0,
    ))
}

/// Sets a room's cached state directly.
///
/// Meant for staff actions such as taking a room into or out of
/// Maintenance; booking operations maintain the state themselves.
///
/// # Errors
///
/// Returns [`Error::RoomNotFound`] for an unknown id.
pub fn change_room_state(db: &mut Database, id: RoomId, state: RoomState) -> Result<()> {
    let tx = db.begin_transaction()?;
    if !db_ops::set_room_state(&tx, id, state)? {
        return Err(Error::RoomNotFound(id));
    }
    tx.commit()?;
    Ok(())
}

/// Deletes a room, and with it its booking history.
///
/// Only Free rooms with no active booking period can be removed from the
/// inventory; their terminal periods and past reservations go with them.
///
/// # Errors
///
/// Returns [`Error::RoomNotFound`] for an unknown id, or
/// [`Error::RoomOccupied`] while the room is not Free or still has an
/// active booking period.
pub fn delete_room(db: &mut Database, id: RoomId) -> Result<()> {
    let tx = db.begin_transaction()?;

    let room = db_ops::get_room(&tx, id)?.ok_or(Error::RoomNotFound(id))?;
    if room.state() != RoomState::Free || db_ops::active_period_count(&tx, id)? > 0 {
        return Err(Error::RoomOccupied(id));
    }

    db_ops::purge_room_history(&tx, id)?;
    db_ops::delete_room_row(&tx, id)?;

    tx.commit()?;

    log::debug!("deleted room {id}");

    Ok(())
}

/// Registers a guest.
///
/// # Errors
///
/// Returns [`Error::Validation`] for blank fields, or a database error.
pub fn create_guest(db: &mut Database, guest: &NewGuest) -> Result<Guest> {
    guest.validate()?;

    let tx = db.begin_transaction()?;
    let id = db_ops::insert_guest(&tx, guest)?;
    tx.commit()?;

    Ok(Guest::new(id, guest.name.clone(), guest.email.clone(), 0))
}
