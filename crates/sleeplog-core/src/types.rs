//! Core type definitions with validation.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A date did not match the `MMM dd, yyyy` format.
    #[error("invalid date: {value}")]
    InvalidDate { value: String },

    /// A time of day did not match the `HH:mm` format.
    #[error("invalid time of day: {value}")]
    InvalidTime { value: String },

    /// A duration label did not look like `N hours`.
    #[error("invalid duration label: {value}")]
    InvalidDurationLabel { value: String },
}

/// Pre-compiled regex for persisted duration labels.
static DURATION_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+hours?$").unwrap());

/// A sleep duration truncated to whole hours.
///
/// Displays and persists as a label such as `7 hours`. The label always uses
/// the plural form, matching what earlier versions of the app wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SleepDuration(u32);

impl SleepDuration {
    /// Creates a duration from a whole number of hours.
    pub const fn from_hours(hours: u32) -> Self {
        Self(hours)
    }

    /// Returns the number of whole hours.
    pub const fn hours(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SleepDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hours", self.0)
    }
}

impl FromStr for SleepDuration {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidDurationLabel {
            value: s.to_string(),
        };
        let caps = DURATION_LABEL_RE.captures(s.trim()).ok_or_else(invalid)?;
        let hours = caps[1].parse().map_err(|_| invalid())?;
        Ok(Self(hours))
    }
}

impl TryFrom<String> for SleepDuration {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SleepDuration> for String {
    fn from(duration: SleepDuration) -> Self {
        duration.to_string()
    }
}
