//! Shared helpers for integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use innkeep::database::{Database, DatabaseConfig};
use innkeep::operations::create_room;
use innkeep::{BedType, NewGuest, NewRoom, Room, RoomType};
use tempfile::TempDir;

/// Opens a fresh database in a temporary directory. The directory must be
/// kept alive for the database's lifetime.
pub fn test_db() -> (Database, TempDir) {
    let dir = TempDir::new().unwrap();
    let db = Database::open(DatabaseConfig::new(dir.path().join("innkeep.db"))).unwrap();
    (db, dir)
}

/// A day in June 2033; far enough out that stays never start in the past.
pub fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2033, 6, day).unwrap()
}

/// A half-open June 2033 stay.
pub fn stay(from: u32, to: u32) -> innkeep::DateRange {
    innkeep::DateRange::new(june(from), june(to)).unwrap()
}

/// A plain second-floor standard room for two.
pub fn standard_room(db: &mut Database) -> Room {
    create_room(
        db,
        &NewRoom {
            floor: 2,
            number_of_beds: 2,
            bed_type: BedType::Single,
            people_capacity: 2,
            room_type: RoomType::Standard,
        },
    )
    .unwrap()
}

/// A guest fixture.
pub fn ada() -> NewGuest {
    NewGuest::new("Ada Lovelace", "ada@example.com")
}
