//! High-level operations over the reservation store.
//!
//! Each operation runs as one immediate write transaction: the checks it
//! performs and the rows it touches commit or roll back together.

mod delete;
mod reserve;
mod rooms;
mod status;
mod update;

pub use delete::delete_reservation;
pub use reserve::{create_reservation, CreateReservationOptions, GuestRef};
pub use rooms::{change_room_state, create_guest, create_room, delete_room};
pub use status::{
    block_booking_period, cancel_booking_period, complete_booking_period,
    complete_elapsed_periods, delete_booking_period, unblock_booking_period,
};
pub use update::{update_reservation, ReservationPatch};
