//! Entry storage over a string-keyed persistence backend.
//!
//! The whole collection lives under a single key as a JSON array. Every
//! append is a full read-modify-write cycle: load, push, apply the retention
//! window, serialize, replace. Four scalar keys mirror the newest submission;
//! they are written for compatibility and never read back as the source of
//! truth.
//!
//! # Thread Safety
//!
//! [`EntryStore::append`] takes `&mut self`, so a single store cannot be
//! appended to concurrently. To share one store across threads, wrap it in a
//! `Mutex<EntryStore<_>>` so the read-modify-write cycle stays serialized;
//! otherwise the last writer silently drops concurrent appends.

use std::collections::HashMap;

use chrono::{Local, NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::entry::{SleepEntry, StoredEntry, parse_date};
use crate::retention::RetentionWindow;

/// Key holding the JSON array of entries.
pub const ENTRIES_KEY: &str = "SLEEP_ENTRIES";
/// Mirror of the newest entry's date.
pub const DATE_KEY: &str = "DATE_KEY";
/// Mirror of the newest entry's sleep time.
pub const SLEEP_TIME_KEY: &str = "SLEEP_TIME_KEY";
/// Mirror of the newest entry's wake time.
pub const WAKE_UP_TIME_KEY: &str = "WAKE_UP_TIME_KEY";
/// Mirror of the newest entry's duration label.
pub const SLEEP_DURATION_KEY: &str = "SLEEP_DURATION_KEY";

const ALL_KEYS: [&str; 5] = [
    ENTRIES_KEY,
    DATE_KEY,
    SLEEP_TIME_KEY,
    WAKE_UP_TIME_KEY,
    SLEEP_DURATION_KEY,
];

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The stored payload could not be deserialized.
    #[error("stored value under {key} is corrupt")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The entries could not be serialized.
    #[error("failed to serialize entries")]
    Serialize(#[source] serde_json::Error),
    /// The persistence backend failed.
    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a backend-specific error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }

    /// Whether this error is a corrupt payload rather than an I/O failure.
    pub const fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}

/// A string-keyed get/set store.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory key-value store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// The most recent submission as mirrored in the scalar keys.
///
/// Values are the raw stored strings; the duration is empty when none was
/// derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastSubmission {
    pub date: String,
    pub sleep_time: String,
    pub wake_time: String,
    pub duration: String,
}

/// A persisted record whose date parsed. The other fields are kept as stored.
struct Record {
    date: NaiveDate,
    stored: StoredEntry,
}

/// Append-one/read-all store of sleep entries.
///
/// See the [module documentation](self) for thread safety considerations.
#[derive(Debug)]
pub struct EntryStore<S> {
    backend: S,
    window: RetentionWindow,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Creates a store with the default 14-day retention window.
    pub fn new(backend: S) -> Self {
        Self::with_window(backend, RetentionWindow::default())
    }

    pub const fn with_window(backend: S, window: RetentionWindow) -> Self {
        Self { backend, window }
    }

    pub const fn window(&self) -> RetentionWindow {
        self.window
    }

    pub const fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_inner(self) -> S {
        self.backend
    }

    /// Reads every persisted record whose date parses.
    ///
    /// Time and duration fields are returned exactly as stored, so records
    /// written by older versions survive a rewrite even when only their date
    /// can be read.
    fn load_records(&self) -> Result<Vec<Record>, StoreError> {
        let Some(payload) = self.backend.get(ENTRIES_KEY)? else {
            return Ok(Vec::new());
        };
        if payload.trim().is_empty() {
            return Ok(Vec::new());
        }

        let stored: Vec<StoredEntry> =
            serde_json::from_str(&payload).map_err(|source| StoreError::Corrupt {
                key: ENTRIES_KEY,
                source,
            })?;

        Ok(stored
            .into_iter()
            .filter_map(|stored| match parse_date(&stored.date) {
                Ok(date) => Some(Record { date, stored }),
                Err(err) => {
                    tracing::warn!(%err, "dropping sleep entry with unreadable date");
                    None
                }
            })
            .collect())
    }

    fn load_records_or_empty(&self) -> Result<Vec<Record>, StoreError> {
        match self.load_records() {
            Err(err @ StoreError::Corrupt { .. }) => {
                tracing::warn!(error = %err, "stored entries are corrupt, treating as empty");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Reads every persisted entry.
    ///
    /// Returns an empty vector when nothing has been stored. A payload that is
    /// not a JSON array of entries is [`StoreError::Corrupt`]. Records whose
    /// times or duration do not parse are left out of the result but stay
    /// stored; records whose date does not parse are dropped on the next write.
    pub fn load_all(&self) -> Result<Vec<SleepEntry>, StoreError> {
        let records = self.load_records()?;
        let total = records.len();
        let entries: Vec<SleepEntry> = records
            .into_iter()
            .filter_map(|record| match SleepEntry::try_from(record.stored) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(%err, "skipping unreadable sleep entry");
                    None
                }
            })
            .collect();
        tracing::debug!(total, loaded = entries.len(), "loaded sleep entries");
        Ok(entries)
    }

    /// Like [`load_all`](Self::load_all), but recovers a corrupt payload to an
    /// empty collection. Backend failures are still returned.
    pub fn load_all_or_empty(&self) -> Result<Vec<SleepEntry>, StoreError> {
        match self.load_all() {
            Err(err @ StoreError::Corrupt { .. }) => {
                tracing::warn!(error = %err, "stored entries are corrupt, treating as empty");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Number of persisted records with a readable date.
    pub fn stored_count(&self) -> Result<usize, StoreError> {
        Ok(self.load_records_or_empty()?.len())
    }

    /// Entries inside the retention window as of `now`.
    pub fn recent(&self, now: NaiveDateTime) -> Result<Vec<SleepEntry>, StoreError> {
        Ok(self.window.retain(self.load_all_or_empty()?, now))
    }

    /// Appends an entry, filtering the collection against the current local time.
    pub fn append(&mut self, entry: SleepEntry) -> Result<usize, StoreError> {
        self.append_at(entry, Local::now().naive_local())
    }

    /// Appends an entry and rewrites the collection, keeping only records
    /// dated inside the retention window as of `now`.
    ///
    /// Retention looks at the date alone; the other fields of existing
    /// records are written back unchanged. Entries are not deduplicated.
    /// The mirror keys are updated only after the collection is written, and
    /// only when the new entry itself is kept. Returns the number of records
    /// stored.
    pub fn append_at(&mut self, entry: SleepEntry, now: NaiveDateTime) -> Result<usize, StoreError> {
        let mut records = self.load_records_or_empty()?;
        let before = records.len() + 1;
        let kept_new = self.window.contains(entry.date(), now);
        records.push(Record {
            date: entry.date(),
            stored: StoredEntry::from(entry),
        });

        let kept: Vec<StoredEntry> = records
            .into_iter()
            .filter(|record| self.window.contains(record.date, now))
            .map(|record| record.stored)
            .collect();

        let payload = serde_json::to_string(&kept).map_err(StoreError::Serialize)?;
        self.backend.set(ENTRIES_KEY, &payload)?;
        tracing::debug!(stored = kept.len(), dropped = before - kept.len(), "wrote sleep entries");

        match kept.last() {
            Some(newest) if kept_new => self.write_mirror(newest)?,
            _ => tracing::debug!("new entry is outside the retention window, mirror keys unchanged"),
        }
        Ok(kept.len())
    }

    fn write_mirror(&mut self, newest: &StoredEntry) -> Result<(), StoreError> {
        self.backend.set(DATE_KEY, &newest.date)?;
        self.backend.set(SLEEP_TIME_KEY, &newest.sleep_time)?;
        self.backend.set(WAKE_UP_TIME_KEY, &newest.wake_time)?;
        self.backend.set(SLEEP_DURATION_KEY, &newest.duration)
    }

    /// Reads the mirrored last submission, if one was recorded.
    pub fn last_submitted(&self) -> Result<Option<LastSubmission>, StoreError> {
        let Some(date) = self.backend.get(DATE_KEY)? else {
            return Ok(None);
        };
        Ok(Some(LastSubmission {
            date,
            sleep_time: self.backend.get(SLEEP_TIME_KEY)?.unwrap_or_default(),
            wake_time: self.backend.get(WAKE_UP_TIME_KEY)?.unwrap_or_default(),
            duration: self.backend.get(SLEEP_DURATION_KEY)?.unwrap_or_default(),
        }))
    }

    /// Removes every key owned by the store.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        for key in ALL_KEYS {
            self.backend.remove(key)?;
        }
        Ok(())
    }
}
