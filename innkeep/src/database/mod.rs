//! Database layer: connection management, schema, CRUD, and availability
//! queries over `SQLite`.

pub mod availability;
pub mod config;
pub mod connection;
pub mod migrations;
pub(crate) mod operations;
mod schema;

pub use availability::{check_availability, list_free_rooms};
pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::Database;
