//! Storage traits and error types
//!
//! This module defines the trait interface for resource stores and
//! associated error types.

use crate::resource::Resource;
use crate::url::{Uri, Url};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Corrupt record for {uri}: {reason}")]
    CorruptRecord { uri: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable mapping from [`Uri`] to [`Resource`]
///
/// Records are keyed by host and path only. Query strings and fragments are
/// not part of the key, so two URLs that differ only there share one record.
pub trait Storage {
    /// Initializes the store
    ///
    /// An existing store is left untouched unless `recreate` is set, in which
    /// case it is destroyed and rebuilt empty.
    fn create(&mut self, recreate: bool) -> StorageResult<()>;

    /// Looks up a resource by URI
    ///
    /// Returns `None` when the URI was never stored.
    fn get(&self, uri: &Uri) -> StorageResult<Option<Resource>>;

    /// Inserts a resource under `url.uri`
    ///
    /// Uniqueness is not checked; callers must `get` first.
    fn insert(&mut self, url: &Url, resource: &Resource) -> StorageResult<()>;

    /// Lists every stored resource, in no particular order
    fn items(&self) -> StorageResult<Vec<(Uri, Resource)>>;
}
