//! In-progress state of a new sleep entry.
//!
//! The form owns its field values. Selecting a date or time, from a picker or
//! from typed text, recomputes the derived duration so the duration shown on
//! the form always matches the fields it was computed from.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::duration::{Rollover, duration_between};
use crate::entry::{SleepEntry, parse_date, parse_time};
use crate::notice::Notice;
use crate::store::{EntryStore, KeyValueStore, StoreError};
use crate::types::{SleepDuration, ValidationError};

/// Errors from editing or submitting the form.
#[derive(Debug, Error)]
pub enum FormError {
    /// One or more required fields were empty on submit.
    #[error("Please fill in all fields")]
    MissingFields,

    /// A typed date or time did not parse.
    #[error("Invalid date or time format")]
    InvalidFormat(#[source] ValidationError),

    /// The entry could not be stored.
    #[error("failed to save sleep entry")]
    Store(#[from] StoreError),
}

impl FormError {
    /// The transient message to show for this error, if it is user-facing.
    pub const fn notice(&self) -> Option<Notice> {
        match self {
            Self::MissingFields => Some(Notice::MissingFields),
            Self::InvalidFormat(_) => Some(Notice::InvalidFormat),
            Self::Store(_) => None,
        }
    }
}

/// The new-sleep-entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    date: Option<NaiveDate>,
    sleep_time: Option<NaiveTime>,
    wake_time: Option<NaiveTime>,
    duration: Option<SleepDuration>,
    rollover: Rollover,
}

impl EntryForm {
    pub fn new(rollover: Rollover) -> Self {
        Self {
            rollover,
            ..Self::default()
        }
    }

    pub const fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub const fn sleep_time(&self) -> Option<NaiveTime> {
        self.sleep_time
    }

    pub const fn wake_time(&self) -> Option<NaiveTime> {
        self.wake_time
    }

    /// The duration derived from the current fields, if any.
    pub const fn duration(&self) -> Option<SleepDuration> {
        self.duration
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
        self.recompute();
    }

    pub fn select_sleep_time(&mut self, time: NaiveTime) {
        self.sleep_time = Some(time);
        self.recompute();
    }

    pub fn select_wake_time(&mut self, time: NaiveTime) {
        self.wake_time = Some(time);
        self.recompute();
    }

    /// Sets the date from `MMM dd, yyyy` text. Blank text clears the field.
    pub fn enter_date(&mut self, text: &str) -> Result<(), FormError> {
        let parsed = Self::parse_field(text, parse_date);
        self.date = parsed.as_ref().ok().copied().flatten();
        self.recompute();
        parsed.map(|_| ())
    }

    /// Sets the sleep time from `HH:mm` text. Blank text clears the field.
    pub fn enter_sleep_time(&mut self, text: &str) -> Result<(), FormError> {
        let parsed = Self::parse_field(text, parse_time);
        self.sleep_time = parsed.as_ref().ok().copied().flatten();
        self.recompute();
        parsed.map(|_| ())
    }

    /// Sets the wake time from `HH:mm` text. Blank text clears the field.
    pub fn enter_wake_time(&mut self, text: &str) -> Result<(), FormError> {
        let parsed = Self::parse_field(text, parse_time);
        self.wake_time = parsed.as_ref().ok().copied().flatten();
        self.recompute();
        parsed.map(|_| ())
    }

    /// Clears every field.
    pub fn reset(&mut self) {
        *self = Self::new(self.rollover);
    }

    /// Whether every required field has a value.
    pub const fn is_complete(&self) -> bool {
        self.date.is_some() && self.sleep_time.is_some() && self.wake_time.is_some()
    }

    /// Builds the entry and appends it to `store`, then clears the form.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        store: &mut EntryStore<S>,
    ) -> Result<SleepEntry, FormError> {
        let entry = self.build()?;
        store.append(entry.clone())?;
        self.finish(&entry);
        Ok(entry)
    }

    /// Like [`submit`](Self::submit) with an explicit reference instant for retention.
    pub fn submit_at<S: KeyValueStore>(
        &mut self,
        store: &mut EntryStore<S>,
        now: NaiveDateTime,
    ) -> Result<SleepEntry, FormError> {
        let entry = self.build()?;
        store.append_at(entry.clone(), now)?;
        self.finish(&entry);
        Ok(entry)
    }

    fn build(&self) -> Result<SleepEntry, FormError> {
        let (Some(date), Some(sleep_time), Some(wake_time)) =
            (self.date, self.sleep_time, self.wake_time)
        else {
            return Err(FormError::MissingFields);
        };
        Ok(SleepEntry::new(date, sleep_time, wake_time, self.rollover))
    }

    fn finish(&mut self, entry: &SleepEntry) {
        tracing::info!(
            date = %entry.date(),
            duration = %entry.duration_label(),
            "sleep entry saved"
        );
        self.reset();
    }

    fn recompute(&mut self) {
        self.duration = match (self.date, self.sleep_time, self.wake_time) {
            (Some(date), Some(sleep), Some(wake)) => duration_between(date, sleep, wake, self.rollover),
            _ => None,
        };
    }

    fn parse_field<T>(
        text: &str,
        parse: fn(&str) -> Result<T, ValidationError>,
    ) -> Result<Option<T>, FormError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        parse(text).map(Some).map_err(FormError::InvalidFormat)
    }
}
