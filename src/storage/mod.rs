//! Storage module for persisting fetched resources
//!
//! This module handles all database operations for the scraper:
//! - SQLite schema creation and recreation
//! - Point lookups by host and path
//! - Inserting resources together with their headers
//! - Enumerating the store for export

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use std::path::Path;

/// Opens the store at `path`, creating the schema if the file is new
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Store ready for reads and writes
/// * `Err(StorageError)` - Failed to initialize storage
pub fn open_storage(path: &Path) -> StorageResult<SqliteStorage> {
    let mut storage = SqliteStorage::new(path);
    storage.create(false)?;
    Ok(storage)
}
