//! List command for viewing recent sleep entries.
//!
//! This module implements `sleeplog list`, which shows every stored entry
//! inside the retention window, either one line per entry or as JSON.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;
use sleeplog_core::{DATE_FORMAT, EntryStore, KeyValueStore, SleepEntry, TIME_FORMAT};

/// Formats entries for human-readable output.
pub fn format_entries(entries: &[SleepEntry], retention_days: u32) -> String {
    let mut output = String::new();
    if entries.is_empty() {
        writeln!(output, "No sleep entries in the last {retention_days} days.").unwrap();
        return output;
    }

    for entry in entries {
        writeln!(
            output,
            "Date: {}, Sleep Time: {}, Wake Up Time: {}, Duration: {}",
            entry.date().format(DATE_FORMAT),
            entry.sleep_time().format(TIME_FORMAT),
            entry.wake_time().format(TIME_FORMAT),
            entry.duration().map_or_else(|| "n/a".to_string(), |d| d.to_string()),
        )
        .unwrap();
    }
    output
}

#[derive(Serialize)]
struct ListJson<'a> {
    retention_days: u32,
    entries: &'a [SleepEntry],
}

/// Formats entries as pretty-printed JSON.
pub fn format_entries_json(entries: &[SleepEntry], retention_days: u32) -> Result<String> {
    let list = ListJson {
        retention_days,
        entries,
    };
    Ok(serde_json::to_string_pretty(&list)?)
}

/// Runs the list command.
pub fn run<W: Write, S: KeyValueStore>(
    writer: &mut W,
    store: &EntryStore<S>,
    now: NaiveDateTime,
    json: bool,
) -> Result<()> {
    let entries = store.recent(now)?;
    let retention_days = store.window().len_days();
    tracing::debug!(count = entries.len(), "listing sleep entries");

    if json {
        writeln!(writer, "{}", format_entries_json(&entries, retention_days)?)?;
    } else {
        write!(writer, "{}", format_entries(&entries, retention_days))?;
    }
    Ok(())
}
