//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! for the innkeep reservation store.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the rooms table.
///
/// The nightly price is computed once at creation and stored as exact
/// decimal text. The state column is a cached projection of the room's
/// booking periods and is never consulted for availability.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        floor INTEGER NOT NULL,
        number_of_beds INTEGER NOT NULL,
        bed_type TEXT NOT NULL,
        people_capacity INTEGER NOT NULL,
        room_type TEXT NOT NULL,
        price_per_night TEXT NOT NULL,
        state TEXT NOT NULL,
        times_booked INTEGER NOT NULL DEFAULT 0
    )";

/// SQL statement to create the guests table.
pub const CREATE_GUESTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS guests (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        number_of_reservations INTEGER NOT NULL DEFAULT 0
    )";

/// SQL statement to create the reservations table.
///
/// Dates are ISO-8601 text in half-open `[start_at, end_at)` form; the
/// total price is exact decimal text.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        guest_id INTEGER NOT NULL REFERENCES guests(id),
        room_id INTEGER NOT NULL REFERENCES rooms(id),
        people_count INTEGER NOT NULL,
        start_at TEXT NOT NULL,
        end_at TEXT NOT NULL,
        total_price TEXT NOT NULL
    )";

/// SQL statement to create the booking periods table.
///
/// The UNIQUE constraint on `reservation_id` enforces the one-to-one
/// pairing with reservations at the storage layer. The reference is
/// nulled rather than cascaded on reservation deletion so that terminal
/// periods survive as history.
pub const CREATE_BOOKING_PERIODS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS booking_periods (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_id INTEGER NOT NULL REFERENCES rooms(id),
        reservation_id INTEGER UNIQUE REFERENCES reservations(id) ON DELETE SET NULL,
        start_at TEXT NOT NULL,
        end_at TEXT NOT NULL,
        status TEXT NOT NULL
    )";

/// SQL statement to create an index on booking period room ids.
///
/// This index speeds up the overlap scan behind every availability check.
pub const CREATE_PERIOD_ROOM_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_booking_periods_room ON booking_periods(room_id)";

/// SQL statement to create an index on booking period statuses.
///
/// This index speeds up the completion sweep and status listings.
pub const CREATE_PERIOD_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_booking_periods_status ON booking_periods(status)";

/// SQL statement to create an index on reservation guest ids.
pub const CREATE_RESERVATION_GUEST_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_guest ON reservations(guest_id)";

/// SQL statement to create an index on reservation room ids.
pub const CREATE_RESERVATION_ROOM_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_room ON reservations(room_id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
