//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use regex::Regex;

/// Pre-compiled regex for relative date parsing.
static RELATIVE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+days?\s+ago$").unwrap());

/// Parse a shorthand date relative to `today`.
///
/// Supports:
/// - ISO 8601: "2026-10-16"
/// - Keywords: "today", "yesterday"
/// - Relative: "3 days ago"
///
/// Returns `None` for anything else so the caller can fall back to the
/// `MMM dd, yyyy` form.
pub fn parse_date_shorthand(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }

    match s.to_ascii_lowercase().as_str() {
        "today" => return Some(today),
        "yesterday" => return today.checked_sub_days(Days::new(1)),
        _ => {}
    }

    let caps = RELATIVE_DATE_RE.captures(s)?;
    let n: u64 = caps[1].parse().ok()?;
    today.checked_sub_days(Days::new(n))
}
