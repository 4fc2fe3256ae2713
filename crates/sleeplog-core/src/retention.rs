//! Retention policy for stored sleep entries.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::entry::SleepEntry;

/// Number of days of entries kept by default.
pub const RETENTION_DAYS: u32 = 14;

/// A trailing window of whole days ending at a reference instant.
///
/// An entry is inside the window when its date, taken at midnight, is strictly
/// after `reference - days`. With the default 14 days and a reference of
/// today at midnight, an entry from 13 days ago is kept and one from 14 days
/// ago is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionWindow {
    days: u32,
}

impl Default for RetentionWindow {
    fn default() -> Self {
        Self::days(RETENTION_DAYS)
    }
}

impl RetentionWindow {
    /// Creates a window spanning the given number of days.
    pub const fn days(days: u32) -> Self {
        Self { days }
    }

    /// Length of the window in days.
    pub const fn len_days(self) -> u32 {
        self.days
    }

    /// The exclusive lower bound for the given reference instant.
    pub fn cutoff(self, reference: NaiveDateTime) -> NaiveDateTime {
        reference
            .checked_sub_days(Days::new(u64::from(self.days)))
            .unwrap_or(NaiveDateTime::MIN)
    }

    /// Whether an entry dated `date` is inside the window.
    pub fn contains(self, date: NaiveDate, reference: NaiveDateTime) -> bool {
        date.and_time(NaiveTime::MIN) > self.cutoff(reference)
    }

    /// Keeps only the entries inside the window, preserving their order.
    pub fn retain(self, entries: Vec<SleepEntry>, reference: NaiveDateTime) -> Vec<SleepEntry> {
        entries
            .into_iter()
            .filter(|entry| self.contains(entry.date(), reference))
            .collect()
    }
}

/// Filters entries through the default 14-day window.
pub fn retain_recent(entries: Vec<SleepEntry>, reference: NaiveDateTime) -> Vec<SleepEntry> {
    RetentionWindow::default().retain(entries, reference)
}
