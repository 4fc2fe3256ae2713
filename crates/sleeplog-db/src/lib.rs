//! Storage layer for the sleep tracker.
//!
//! Provides a string-keyed key-value store on top of `rusqlite`, used as the
//! persistence backend of [`sleeplog_core::EntryStore`].
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! This means a `Database` instance can be moved between threads but cannot be shared
//! across threads without external synchronization.
//!
//! # Schema
//!
//! A single `kv` table holds every value, namespaced so several logical
//! stores can share one file. The sleep tracker uses the `SleepData`
//! namespace. Values are opaque TEXT; the entry store keeps a JSON array under
//! one key and a handful of scalar strings under others.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use sleeplog_core::{KeyValueStore, StoreError};
use thiserror::Error;

/// Namespace used for sleep data.
pub const DEFAULT_NAMESPACE: &str = "SleepData";

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        Self::backend(err)
    }
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
    namespace: String,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn,
            namespace: DEFAULT_NAMESPACE.to_string(),
        };
        db.init()?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn,
            namespace: DEFAULT_NAMESPACE.to_string(),
        };
        db.init()?;
        Ok(db)
    }

    /// Switches to another namespace within the same file.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- kv table: string-keyed values grouped by namespace
            -- updated_at: ISO 8601 format (e.g., '2026-10-16T10:30:00Z')
            CREATE TABLE IF NOT EXISTS kv (
                namespace TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now')),
                PRIMARY KEY (namespace, key)
            );
            ",
        )?;
        Ok(())
    }

    /// Returns the value stored under `key` in the current namespace.
    pub fn get_value(&self, key: &str) -> Result<Option<String>, DbError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE namespace = ?1 AND key = ?2",
                params![self.namespace, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), DbError> {
        self.conn.execute(
            "
            INSERT INTO kv (namespace, key, value)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(namespace, key) DO UPDATE SET
                value = excluded.value,
                updated_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now')
            ",
            params![self.namespace, key, value],
        )?;
        Ok(())
    }

    /// Removes `key`. Returns whether a value was removed.
    pub fn remove_value(&mut self, key: &str) -> Result<bool, DbError> {
        let removed = self.conn.execute(
            "DELETE FROM kv WHERE namespace = ?1 AND key = ?2",
            params![self.namespace, key],
        )?;
        Ok(removed > 0)
    }

    /// Lists the keys in the current namespace, sorted.
    pub fn keys(&self) -> Result<Vec<String>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv WHERE namespace = ?1 ORDER BY key")?;
        let keys = stmt
            .query_map(params![self.namespace], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.get_value(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Ok(self.set_value(key, value)?)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.remove_value(key)?;
        Ok(())
    }
}
