//! Last command for showing the most recent submission.

use std::io::Write;

use anyhow::Result;
use sleeplog_core::{EntryStore, KeyValueStore};

pub fn run<W: Write, S: KeyValueStore>(writer: &mut W, store: &EntryStore<S>) -> Result<()> {
    let Some(last) = store.last_submitted()? else {
        writeln!(writer, "No sleep entry submitted yet.")?;
        return Ok(());
    };

    writeln!(writer, "Last sleep entry")?;
    writeln!(writer, "Date: {}", last.date)?;
    writeln!(writer, "Sleep Time: {}", last.sleep_time)?;
    writeln!(writer, "Wake Up Time: {}", last.wake_time)?;
    if last.duration.is_empty() {
        writeln!(writer, "Duration: n/a")?;
    } else {
        writeln!(writer, "Duration: {}", last.duration)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{NaiveDate, NaiveTime};
    use insta::assert_snapshot;
    use sleeplog_core::{MemoryStore, Rollover, SleepEntry};

    #[test]
    fn last_without_submissions() {
        let store = EntryStore::new(MemoryStore::new());
        let mut output = Vec::new();
        run(&mut output, &store).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "No sleep entry submitted yet.\n");
    }

    #[test]
    fn last_shows_mirrored_entry() {
        let mut store = EntryStore::new(MemoryStore::new());
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let entry = SleepEntry::new(
            date,
            NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            Rollover::SameDay,
        );
        store
            .append_at(entry, date.and_hms_opt(9, 0, 0).unwrap())
            .unwrap();

        let mut output = Vec::new();
        run(&mut output, &store).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Last sleep entry
        Date: Oct 16, 2026
        Sleep Time: 00:00
        Wake Up Time: 08:00
        Duration: 8 hours
        ");
    }
}
