//! Sleep duration calculation.
//!
//! A duration is derived from a calendar date plus a sleep and a wake time of
//! day, truncated to whole hours. By default both times are placed on the same
//! date, so a session that crosses midnight gets no duration. With
//! [`Rollover::NextDay`] a wake time earlier than the sleep time is placed on
//! the following day instead.

use chrono::{Days, NaiveDate, NaiveTime};
use thiserror::Error;

use crate::entry::{parse_date, parse_time};
use crate::types::SleepDuration;

/// Errors from computing a duration out of raw user input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DurationError {
    /// A required input was blank.
    #[error("{field} is required")]
    Blank { field: &'static str },

    /// The date or one of the times did not parse.
    #[error("Invalid date or time format")]
    InvalidFormat,
}

/// How a wake time that is not after the sleep time is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rollover {
    /// Both times are on the entry date; no duration when wake is not after sleep.
    #[default]
    SameDay,
    /// A wake time before the sleep time falls on the next day.
    NextDay,
}

impl Rollover {
    /// Picks the policy from the `allow_overnight` setting.
    pub const fn from_allow_overnight(allow_overnight: bool) -> Self {
        if allow_overnight {
            Self::NextDay
        } else {
            Self::SameDay
        }
    }
}

/// Computes the whole-hour duration between sleep and wake on `date`.
///
/// Returns `None` when the wake instant is not strictly after the sleep
/// instant under the given rollover policy.
pub fn duration_between(
    date: NaiveDate,
    sleep_time: NaiveTime,
    wake_time: NaiveTime,
    rollover: Rollover,
) -> Option<SleepDuration> {
    let sleep_at = date.and_time(sleep_time);
    let mut wake_at = date.and_time(wake_time);

    if wake_at <= sleep_at {
        match rollover {
            Rollover::NextDay if wake_time < sleep_time => {
                wake_at = wake_at.checked_add_days(Days::new(1))?;
            }
            _ => return None,
        }
    }

    let hours = (wake_at - sleep_at).num_hours();
    u32::try_from(hours).ok().map(SleepDuration::from_hours)
}

/// Computes a duration from the raw date and time strings entered on the form.
///
/// The date must be in `MMM dd, yyyy` form and both times in 24-hour `HH:mm`.
/// `Ok(None)` means the inputs were valid but no duration could be derived.
pub fn compute_duration(
    date: &str,
    sleep_time: &str,
    wake_time: &str,
    rollover: Rollover,
) -> Result<Option<SleepDuration>, DurationError> {
    for (field, value) in [("date", date), ("sleep time", sleep_time), ("wake time", wake_time)] {
        if value.trim().is_empty() {
            return Err(DurationError::Blank { field });
        }
    }

    let date = parse_date(date).map_err(|_| DurationError::InvalidFormat)?;
    let sleep_time = parse_time(sleep_time).map_err(|_| DurationError::InvalidFormat)?;
    let wake_time = parse_time(wake_time).map_err(|_| DurationError::InvalidFormat)?;

    Ok(duration_between(date, sleep_time, wake_time, rollover))
}
