//! End-to-end reservation lifecycle tests: create, update, status
//! transitions, and deletion, with the bookkeeping each step implies.

mod common;

use common::{ada, standard_room, stay, test_db};
use innkeep::operations::{
    block_booking_period, cancel_booking_period, complete_booking_period,
    complete_elapsed_periods, create_guest, create_reservation, delete_booking_period,
    delete_reservation, unblock_booking_period, update_reservation, CreateReservationOptions,
    GuestRef, ReservationPatch,
};
use innkeep::{
    BookingStatus, DateRange, Error, GuestId, NewGuest, ReservationId, RoomId, RoomState,
};
use rust_decimal::Decimal;

#[test]
fn create_reservation_with_new_guest() {
    let (mut db, _dir) = test_db();
    let room = standard_room(&mut db);

    let reservation = create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::New(ada()), room.id(), stay(1, 5))
            .with_people_count(2),
    )
    .unwrap();

    assert_eq!(reservation.room_id(), room.id());
    assert_eq!(reservation.nights(), 4);
    assert_eq!(
        reservation.total_price(),
        room.price_per_night() * Decimal::from(4)
    );

    // One booking period, Reserved, paired with the reservation.
    let period = db
        .booking_period_for_reservation(reservation.id())
        .unwrap()
        .unwrap();
    assert_eq!(period.status(), BookingStatus::Reserved);
    assert_eq!(period.range(), reservation.range());
    assert_eq!(period.room_id(), room.id());

    // Room and guest bookkeeping.
    let room = db.get_room(room.id()).unwrap().unwrap();
    assert_eq!(room.state(), RoomState::Reserved);
    assert_eq!(room.times_booked(), 1);

    let guest = db.get_guest(reservation.guest_id()).unwrap().unwrap();
    assert_eq!(guest.name(), "Ada Lovelace");
    assert_eq!(guest.number_of_reservations(), 1);
}

#[test]
fn create_reservation_with_existing_guest() {
    let (mut db, _dir) = test_db();
    let room = standard_room(&mut db);
    let guest = create_guest(&mut db, &ada()).unwrap();

    let reservation = create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::Existing(guest.id()), room.id(), stay(1, 3)),
    )
    .unwrap();

    assert_eq!(reservation.guest_id(), guest.id());
    assert_eq!(reservation.people_count(), 1);
    assert_eq!(
        db.get_guest(guest.id())
            .unwrap()
            .unwrap()
            .number_of_reservations(),
        1
    );
}

#[test]
fn create_rejects_unknown_guest_and_room() {
    let (mut db, _dir) = test_db();
    let room = standard_room(&mut db);

    let err = create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::Existing(GuestId::new(99)), room.id(), stay(1, 3)),
    )
    .unwrap_err();
    assert!(matches!(err, Error::GuestNotFound(_)));

    let err = create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::New(ada()), RoomId::new(99), stay(1, 3)),
    )
    .unwrap_err();
    assert!(matches!(err, Error::RoomNotFound(_)));
}

#[test]
fn create_rejects_bad_people_count() {
    let (mut db, _dir) = test_db();
    let room = standard_room(&mut db);

    for count in [0, 5, -1] {
        let err = create_reservation(
            &mut db,
            CreateReservationOptions::new(GuestRef::New(ada()), room.id(), stay(1, 3))
                .with_people_count(count),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidPeopleCount { .. }));
    }
}

#[test]
fn create_rejects_past_start() {
    let (mut db, _dir) = test_db();
    let room = standard_room(&mut db);

    let past = DateRange::new(
        chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        chrono::NaiveDate::from_ymd_opt(2020, 1, 5).unwrap(),
    )
    .unwrap();

    let err = create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::New(ada()), room.id(), past),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidDateRange { .. }));
}

#[test]
fn overlapping_reservation_is_rejected_and_rolled_back() {
    let (mut db, _dir) = test_db();
    let room = standard_room(&mut db);

    create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::New(ada()), room.id(), stay(10, 15)),
    )
    .unwrap();

    let err = create_reservation(
        &mut db,
        CreateReservationOptions::new(
            GuestRef::New(NewGuest::new("Grace Hopper", "grace@example.com")),
            room.id(),
            stay(12, 18),
        ),
    )
    .unwrap_err();
    assert!(err.is_conflict());

    // The failed attempt left nothing behind, including its new guest.
    assert_eq!(db.reservations_by_room(room.id()).unwrap().len(), 1);
    assert_eq!(db.booking_periods_by_room(room.id()).unwrap().len(), 1);
    assert_eq!(
        db.get_room(room.id()).unwrap().unwrap().times_booked(),
        1
    );
}

#[test]
fn failed_period_write_leaves_no_reservation_behind() {
    let (mut db, _dir) = test_db();
    let room = standard_room(&mut db);

    // Make the booking period insert fail after the reservation row has
    // been tentatively written.
    db.connection()
        .execute_batch(
            "CREATE TRIGGER period_write_outage BEFORE INSERT ON booking_periods
             BEGIN SELECT RAISE(ABORT, 'disk full'); END",
        )
        .unwrap();

    let err = create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::New(ada()), room.id(), stay(10, 15)),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Database(_)));

    // Everything written before the failure rolled back with it.
    assert!(db.reservations_by_room(room.id()).unwrap().is_empty());
    assert!(db.booking_periods_by_room(room.id()).unwrap().is_empty());
    let room = db.get_room(room.id()).unwrap().unwrap();
    assert_eq!(room.state(), RoomState::Free);
    assert_eq!(room.times_booked(), 0);
    let guests: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM guests", [], |row| row.get(0))
        .unwrap();
    assert_eq!(guests, 0);
}

#[test]
fn adjacent_reservations_share_changeover_day() {
    let (mut db, _dir) = test_db();
    let room = standard_room(&mut db);

    create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::New(ada()), room.id(), stay(10, 15)),
    )
    .unwrap();
    create_reservation(
        &mut db,
        CreateReservationOptions::new(
            GuestRef::New(NewGuest::new("Grace Hopper", "grace@example.com")),
            room.id(),
            stay(15, 20),
        ),
    )
    .unwrap();

    assert_eq!(db.reservations_by_room(room.id()).unwrap().len(), 2);
}

#[test]
fn update_moves_dates_and_reprices() {
    let (mut db, _dir) = test_db();
    let room = standard_room(&mut db);

    let reservation = create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::New(ada()), room.id(), stay(1, 5)),
    )
    .unwrap();

    let updated = update_reservation(
        &mut db,
        reservation.id(),
        &ReservationPatch::new().with_range(stay(1, 11)),
    )
    .unwrap();

    assert_eq!(updated.nights(), 10);
    assert_eq!(
        updated.total_price(),
        room.price_per_night() * Decimal::from(10)
    );

    // The booking period follows the reservation.
    let period = db
        .booking_period_for_reservation(reservation.id())
        .unwrap()
        .unwrap();
    assert_eq!(period.range(), updated.range());
}

#[test]
fn update_does_not_conflict_with_itself() {
    let (mut db, _dir) = test_db();
    let room = standard_room(&mut db);

    let reservation = create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::New(ada()), room.id(), stay(10, 15)),
    )
    .unwrap();

    // Shrinking inside the current dates overlaps the old period; the
    // self-exclusion makes it legal.
    let updated = update_reservation(
        &mut db,
        reservation.id(),
        &ReservationPatch::new().with_range(stay(11, 14)),
    )
    .unwrap();
    assert_eq!(updated.nights(), 3);
}

#[test]
fn update_conflicts_with_other_reservations() {
    let (mut db, _dir) = test_db();
    let room = standard_room(&mut db);

    create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::New(ada()), room.id(), stay(10, 15)),
    )
    .unwrap();
    let second = create_reservation(
        &mut db,
        CreateReservationOptions::new(
            GuestRef::New(NewGuest::new("Grace Hopper", "grace@example.com")),
            room.id(),
            stay(20, 25),
        ),
    )
    .unwrap();

    let err = update_reservation(
        &mut db,
        second.id(),
        &ReservationPatch::new().with_range(stay(12, 22)),
    )
    .unwrap_err();
    assert!(err.is_conflict());

    // Unchanged after the failed update.
    let unchanged = db.get_reservation(second.id()).unwrap().unwrap();
    assert_eq!(unchanged.range(), stay(20, 25));
}

#[test]
fn update_moves_to_another_room() {
    let (mut db, _dir) = test_db();
    let first = standard_room(&mut db);
    let second = standard_room(&mut db);

    let reservation = create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::New(ada()), first.id(), stay(1, 5)),
    )
    .unwrap();

    let updated = update_reservation(
        &mut db,
        reservation.id(),
        &ReservationPatch::new().with_room(second.id()),
    )
    .unwrap();
    assert_eq!(updated.room_id(), second.id());

    // The old room is released, the new one held.
    assert_eq!(
        db.get_room(first.id()).unwrap().unwrap().state(),
        RoomState::Free
    );
    assert_eq!(
        db.get_room(second.id()).unwrap().unwrap().state(),
        RoomState::Reserved
    );
    let period = db
        .booking_period_for_reservation(reservation.id())
        .unwrap()
        .unwrap();
    assert_eq!(period.room_id(), second.id());
}

#[test]
fn update_with_empty_patch_changes_nothing() {
    let (mut db, _dir) = test_db();
    let room = standard_room(&mut db);

    let reservation = create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::New(ada()), room.id(), stay(1, 5)),
    )
    .unwrap();

    let unchanged =
        update_reservation(&mut db, reservation.id(), &ReservationPatch::new()).unwrap();
    assert_eq!(unchanged, reservation);

    // The guards still apply to an empty patch.
    let err =
        update_reservation(&mut db, ReservationId::new(42), &ReservationPatch::new()).unwrap_err();
    assert!(matches!(err, Error::ReservationNotFound(_)));
}

#[test]
fn update_rejects_unknown_reservation() {
    let (mut db, _dir) = test_db();
    let err = update_reservation(
        &mut db,
        ReservationId::new(42),
        &ReservationPatch::new().with_people_count(2),
    )
    .unwrap_err();
    assert!(matches!(err, Error::ReservationNotFound(_)));
}

#[test]
fn update_rejects_canceled_booking() {
    let (mut db, _dir) = test_db();
    let room = standard_room(&mut db);

    let reservation = create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::New(ada()), room.id(), stay(1, 5)),
    )
    .unwrap();
    let period = db
        .booking_period_for_reservation(reservation.id())
        .unwrap()
        .unwrap();
    cancel_booking_period(&mut db, period.id()).unwrap();

    let err = update_reservation(
        &mut db,
        reservation.id(),
        &ReservationPatch::new().with_people_count(2),
    )
    .unwrap_err();
    assert!(matches!(err, Error::IllegalTransition { .. }));
}

#[test]
fn status_transitions_follow_state_machine() {
    let (mut db, _dir) = test_db();
    let room = standard_room(&mut db);

    let reservation = create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::New(ada()), room.id(), stay(1, 5)),
    )
    .unwrap();
    let period_id = db
        .booking_period_for_reservation(reservation.id())
        .unwrap()
        .unwrap()
        .id();

    // Reserved -> Blocked -> Reserved -> Completed.
    let period = block_booking_period(&mut db, period_id).unwrap();
    assert_eq!(period.status(), BookingStatus::Blocked);
    assert_eq!(
        db.get_room(room.id()).unwrap().unwrap().state(),
        RoomState::Blocked
    );

    // A blocked period cannot jump to a terminal status.
    let err = complete_booking_period(&mut db, period_id).unwrap_err();
    assert!(matches!(err, Error::IllegalTransition { .. }));
    let err = cancel_booking_period(&mut db, period_id).unwrap_err();
    assert!(matches!(err, Error::IllegalTransition { .. }));

    unblock_booking_period(&mut db, period_id).unwrap();
    let period = complete_booking_period(&mut db, period_id).unwrap();
    assert_eq!(period.status(), BookingStatus::Completed);
    assert_eq!(
        db.get_room(room.id()).unwrap().unwrap().state(),
        RoomState::Free
    );

    // Terminal statuses admit nothing further.
    let err = cancel_booking_period(&mut db, period_id).unwrap_err();
    assert!(matches!(err, Error::IllegalTransition { .. }));
    let err = unblock_booking_period(&mut db, period_id).unwrap_err();
    assert!(matches!(err, Error::IllegalTransition { .. }));
}

#[test]
fn delete_booking_period_requires_terminal_status() {
    let (mut db, _dir) = test_db();
    let room = standard_room(&mut db);

    let reservation = create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::New(ada()), room.id(), stay(1, 5)),
    )
    .unwrap();
    let period_id = db
        .booking_period_for_reservation(reservation.id())
        .unwrap()
        .unwrap()
        .id();

    let err = delete_booking_period(&mut db, period_id).unwrap_err();
    assert!(matches!(err, Error::CannotDeleteActiveBooking(_)));

    cancel_booking_period(&mut db, period_id).unwrap();
    delete_booking_period(&mut db, period_id).unwrap();
    assert!(db.get_booking_period(period_id).unwrap().is_none());
}

#[test]
fn delete_reservation_cancels_future_booking() {
    let (mut db, _dir) = test_db();
    let room = standard_room(&mut db);

    let reservation = create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::New(ada()), room.id(), stay(10, 15)),
    )
    .unwrap();
    let guest_id = reservation.guest_id();
    let period_id = db
        .booking_period_for_reservation(reservation.id())
        .unwrap()
        .unwrap()
        .id();

    delete_reservation(&mut db, reservation.id()).unwrap();

    assert!(db.get_reservation(reservation.id()).unwrap().is_none());
    assert_eq!(
        db.get_room(room.id()).unwrap().unwrap().state(),
        RoomState::Free
    );
    assert_eq!(
        db.get_guest(guest_id)
            .unwrap()
            .unwrap()
            .number_of_reservations(),
        0
    );

    // The period survives as canceled, unlinked history.
    let period = db.get_booking_period(period_id).unwrap().unwrap();
    assert_eq!(period.status(), BookingStatus::Canceled);
    assert_eq!(period.reservation_id(), None);
}

#[test]
fn delete_keeps_room_reserved_while_other_bookings_remain() {
    let (mut db, _dir) = test_db();
    let room = standard_room(&mut db);

    let first = create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::New(ada()), room.id(), stay(1, 5)),
    )
    .unwrap();
    create_reservation(
        &mut db,
        CreateReservationOptions::new(
            GuestRef::New(NewGuest::new("Grace Hopper", "grace@example.com")),
            room.id(),
            stay(10, 15),
        ),
    )
    .unwrap();

    delete_reservation(&mut db, first.id()).unwrap();

    assert_eq!(
        db.get_room(room.id()).unwrap().unwrap().state(),
        RoomState::Reserved
    );
}

#[test]
fn delete_rejects_blocked_booking() {
    let (mut db, _dir) = test_db();
    let room = standard_room(&mut db);

    let reservation = create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::New(ada()), room.id(), stay(1, 5)),
    )
    .unwrap();
    let period_id = db
        .booking_period_for_reservation(reservation.id())
        .unwrap()
        .unwrap()
        .id();
    block_booking_period(&mut db, period_id).unwrap();

    let err = delete_reservation(&mut db, reservation.id()).unwrap_err();
    assert!(matches!(err, Error::IllegalTransition { .. }));
}

#[test]
fn sweep_completes_elapsed_periods() {
    let (mut db, _dir) = test_db();
    let room = standard_room(&mut db);

    let reservation = create_reservation(
        &mut db,
        CreateReservationOptions::new(GuestRef::New(ada()), room.id(), stay(1, 5)),
    )
    .unwrap();
    let period_id = db
        .booking_period_for_reservation(reservation.id())
        .unwrap()
        .unwrap()
        .id();

    // Before checkout day nothing has elapsed.
    assert_eq!(complete_elapsed_periods(&mut db, common::june(4)).unwrap(), 0);

    let completed = complete_elapsed_periods(&mut db, common::june(5)).unwrap();
    assert_eq!(completed, 1);
    assert_eq!(
        db.get_booking_period(period_id).unwrap().unwrap().status(),
        BookingStatus::Completed
    );
    assert_eq!(
        db.get_room(room.id()).unwrap().unwrap().state(),
        RoomState::Free
    );

    // Idempotent once everything is terminal.
    assert_eq!(complete_elapsed_periods(&mut db, common::june(6)).unwrap(), 0);
}
