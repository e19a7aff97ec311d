//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.
//! Each operation opens its own connection and drops it before returning, so
//! no handle is held between calls.

use crate::resource::{Headers, Resource};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::url::{Uri, Url};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};

/// SQLite storage backend
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    path: PathBuf,
}

impl SqliteStorage {
    /// Creates a store handle for the database file at `path`
    ///
    /// Nothing is opened or created until [`Storage::create`] or another
    /// operation runs.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens an existing database file; never creates one
    fn connect(&self) -> StorageResult<Connection> {
        self.open(OpenFlags::SQLITE_OPEN_READ_WRITE)
    }

    fn open(&self, flags: OpenFlags) -> StorageResult<Connection> {
        let conn =
            Connection::open_with_flags(&self.path, flags | OpenFlags::SQLITE_OPEN_NO_MUTEX)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }
}

impl Storage for SqliteStorage {
    fn create(&mut self, recreate: bool) -> StorageResult<()> {
        if recreate && self.path.exists() {
            tracing::info!("Recreating store {}", self.path.display());
            std::fs::remove_file(&self.path)?;
        }

        let conn = self.open(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE)?;
        if schema_exists(&conn)? {
            tracing::debug!("Store {} already exists", self.path.display());
            return Ok(());
        }

        initialize_schema(&conn)?;
        tracing::info!("Created store {}", self.path.display());
        Ok(())
    }

    fn get(&self, uri: &Uri) -> StorageResult<Option<Resource>> {
        let conn = self.connect()?;

        let row: Option<(i64, i64, Vec<u8>)> = conn
            .query_row(
                "SELECT id, status, data FROM url WHERE host = ?1 AND path = ?2
                 ORDER BY id LIMIT 1",
                params![uri.host, uri.path],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        match row {
            Some((id, status, data)) => Ok(Some(Resource {
                status: decode_status(uri, status)?,
                headers: load_headers(&conn, id)?,
                data,
            })),
            None => Ok(None),
        }
    }

    fn insert(&mut self, url: &Url, resource: &Resource) -> StorageResult<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO url (host, path, status, data) VALUES (?1, ?2, ?3, ?4)",
            params![url.uri.host, url.uri.path, resource.status, resource.data],
        )?;
        let url_id = tx.last_insert_rowid();

        {
            let mut stmt =
                tx.prepare("INSERT INTO header (url_id, name, value) VALUES (?1, ?2, ?3)")?;
            for (name, value) in resource.headers.iter() {
                stmt.execute(params![url_id, name, value])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn items(&self) -> StorageResult<Vec<(Uri, Resource)>> {
        let conn = self.connect()?;

        let mut stmt = conn.prepare("SELECT id, host, path, status, data FROM url ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    Uri {
                        host: row.get(1)?,
                        path: row.get(2)?,
                    },
                    row.get::<_, i64>(3)?,
                    row.get::<_, Vec<u8>>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut items = Vec::with_capacity(rows.len());
        for (id, uri, status, data) in rows {
            let resource = Resource {
                status: decode_status(&uri, status)?,
                headers: load_headers(&conn, id)?,
                data,
            };
            items.push((uri, resource));
        }

        Ok(items)
    }
}

/// Loads the header rows of one `url` record
///
/// A record without header rows (e.g. left by an interrupted insert) yields
/// an empty map.
fn load_headers(conn: &Connection, url_id: i64) -> StorageResult<Headers> {
    let mut stmt = conn.prepare("SELECT name, value FROM header WHERE url_id = ?1 ORDER BY id")?;
    let headers = stmt
        .query_map(params![url_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<Result<Headers, _>>()?;
    Ok(headers)
}

/// Whether the `url` table is present, so an empty or foreign file is not
/// mistaken for an initialized store
fn schema_exists(conn: &Connection) -> StorageResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'url'",
        [],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn decode_status(uri: &Uri, status: i64) -> StorageResult<u16> {
    u16::try_from(status).map_err(|_| StorageError::CorruptRecord {
        uri: uri.to_string(),
        reason: format!("status {} out of range", status),
    })
}
