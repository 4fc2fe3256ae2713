//! Sleep entries and their persisted representation.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::duration::{Rollover, duration_between};
use crate::types::{SleepDuration, ValidationError};

/// Date format used at the storage and display boundary (e.g. `Oct 16, 2026`).
pub const DATE_FORMAT: &str = "%b %d, %Y";

/// Time-of-day format used at the storage and display boundary (24-hour `HH:mm`).
pub const TIME_FORMAT: &str = "%H:%M";

/// Parses a date in `MMM dd, yyyy` form.
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: "date" });
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        value: s.to_string(),
    })
}

/// Parses a 24-hour `HH:mm` time of day.
pub fn parse_time(s: &str) -> Result<NaiveTime, ValidationError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: "time" });
    }
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT).map_err(|_| ValidationError::InvalidTime {
        value: s.to_string(),
    })
}

/// One recorded sleep session.
///
/// Entries are created once, at submission time, and never mutated. The
/// duration is derived from the other fields when the entry is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredEntry", into = "StoredEntry")]
pub struct SleepEntry {
    date: NaiveDate,
    sleep_time: NaiveTime,
    wake_time: NaiveTime,
    duration: Option<SleepDuration>,
}

impl SleepEntry {
    /// Builds an entry, deriving its duration under the given rollover policy.
    pub fn new(
        date: NaiveDate,
        sleep_time: NaiveTime,
        wake_time: NaiveTime,
        rollover: Rollover,
    ) -> Self {
        Self {
            date,
            sleep_time,
            wake_time,
            duration: duration_between(date, sleep_time, wake_time, rollover),
        }
    }

    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    pub const fn sleep_time(&self) -> NaiveTime {
        self.sleep_time
    }

    pub const fn wake_time(&self) -> NaiveTime {
        self.wake_time
    }

    /// The derived duration, or `None` when wake time was not after sleep time.
    pub const fn duration(&self) -> Option<SleepDuration> {
        self.duration
    }

    /// The duration label as shown to the user; empty when no duration was derived.
    pub fn duration_label(&self) -> String {
        self.duration.map(|d| d.to_string()).unwrap_or_default()
    }
}

/// Wire form of a [`SleepEntry`] as kept in the persisted JSON array.
///
/// Every field is a formatted string; an entry without a duration stores an
/// empty `duration`. Older records may lack the wake time or carry a duration
/// such as `7 hours 30 minutes`; those load here unchanged even though they
/// do not convert to a [`SleepEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEntry {
    pub date: String,
    #[serde(default)]
    pub sleep_time: String,
    #[serde(rename = "wakeUpTime", default)]
    pub wake_time: String,
    #[serde(default)]
    pub duration: String,
}

impl From<SleepEntry> for StoredEntry {
    fn from(entry: SleepEntry) -> Self {
        Self {
            date: entry.date.format(DATE_FORMAT).to_string(),
            sleep_time: entry.sleep_time.format(TIME_FORMAT).to_string(),
            wake_time: entry.wake_time.format(TIME_FORMAT).to_string(),
            duration: entry.duration_label(),
        }
    }
}

impl TryFrom<StoredEntry> for SleepEntry {
    type Error = ValidationError;

    fn try_from(stored: StoredEntry) -> Result<Self, Self::Error> {
        // The stored label is what was derived when the entry was created, so
        // it is kept rather than recomputed under the current rollover policy.
        let duration = if stored.duration.trim().is_empty() {
            None
        } else {
            Some(stored.duration.parse()?)
        };
        Ok(Self {
            date: parse_date(&stored.date)?,
            sleep_time: parse_time(&stored.sleep_time)?,
            wake_time: parse_time(&stored.wake_time)?,
            duration,
        })
    }
}
