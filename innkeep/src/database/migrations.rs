//! Database schema management and migrations.
//!
//! This module handles database schema initialization, version checking,
//! and migrations.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_BOOKING_PERIODS_TABLE, CREATE_GUESTS_TABLE, CREATE_METADATA_TABLE,
    CREATE_PERIOD_ROOM_INDEX, CREATE_PERIOD_STATUS_INDEX, CREATE_RESERVATIONS_TABLE,
    CREATE_RESERVATION_GUEST_INDEX, CREATE_RESERVATION_ROOM_INDEX, CREATE_ROOMS_TABLE,
    CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// This function creates all tables, indices, and metadata for a fresh
/// database. It should only be called on a database that has not been
/// initialized yet.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```no_run
/// use rusqlite::Connection;
/// use innkeep::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;

    // Entity tables; booking periods reference rooms and reservations.
    conn.execute(CREATE_ROOMS_TABLE, [])?;
    conn.execute(CREATE_GUESTS_TABLE, [])?;
    conn.execute(CREATE_RESERVATIONS_TABLE, [])?;
    conn.execute(CREATE_BOOKING_PERIODS_TABLE, [])?;

    conn.execute(CREATE_PERIOD_ROOM_INDEX, [])?;
    conn.execute(CREATE_PERIOD_STATUS_INDEX, [])?;
    conn.execute(CREATE_RESERVATION_GUEST_INDEX, [])?;
    conn.execute(CREATE_RESERVATION_ROOM_INDEX, [])?;

    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;

    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than
/// "no rows returned" (which indicates version 0).
///
/// # Returns
///
/// - `Ok(0)` if the metadata table doesn't exist or has no version
/// - `Ok(version)` if a version is found
/// - `Err(_)` if a database error occurs
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => {
            // "no such table" means a completely fresh database file
            if let rusqlite::Error::SqliteFailure(ref sqlite_err, _) = e {
                if sqlite_err.code == rusqlite::ErrorCode::Unknown {
                    return Ok(0);
                }
            }
            Err(e.into())
        }
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// A version of 0 means a fresh database and triggers initialization.
/// Any other mismatch with [`CURRENT_SCHEMA_VERSION`] is an error.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] if the stored version does
/// not match, or a database error if initialization fails.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        initialize_schema(conn)?;
    } else if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: u32::try_from(CURRENT_SCHEMA_VERSION).unwrap_or(0),
            found: u32::try_from(version).unwrap_or(0),
        });
    }

    Ok(())
}
