//! New sleep entry command.
//!
//! Fills an [`EntryForm`] from the command-line values, the same way the
//! picker dialogs would, and submits it to the entry store.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDateTime;
use sleeplog_core::{
    DATE_FORMAT, EntryForm, EntryStore, KeyValueStore, Notice, Rollover, SleepEntry, TIME_FORMAT,
};

use super::util::parse_date_shorthand;

/// Raw values given for the form fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddArgs<'a> {
    pub date: Option<&'a str>,
    pub sleep: Option<&'a str>,
    pub wake: Option<&'a str>,
}

/// Renders the form with its current values.
pub fn render_form<W: Write>(writer: &mut W, form: &EntryForm) -> Result<()> {
    let date = form
        .date()
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default();
    let sleep = form
        .sleep_time()
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_default();
    let wake = form
        .wake_time()
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_default();
    let duration = form.duration().map(|d| d.to_string()).unwrap_or_default();

    writeln!(writer, "New sleep entry")?;
    write_field(writer, "Date of sleep", &date)?;
    write_field(writer, "Time of sleep", &sleep)?;
    write_field(writer, "Wake up time", &wake)?;
    write_field(writer, "Sleep duration", &duration)?;
    Ok(())
}

fn write_field<W: Write>(writer: &mut W, label: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        writeln!(writer, "{label}:")?;
    } else {
        writeln!(writer, "{label}: {value}")?;
    }
    Ok(())
}

/// Fills the form from `args`, submits it, and reports the saved entry.
///
/// A missing date means today. Missing times leave the field empty, which
/// the form rejects on submit.
pub fn run<W: Write, S: KeyValueStore>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    args: AddArgs<'_>,
    rollover: Rollover,
    now: NaiveDateTime,
) -> Result<SleepEntry> {
    let mut form = EntryForm::new(rollover);

    match args.date {
        None => form.select_date(now.date()),
        Some(text) => match parse_date_shorthand(text, now.date()) {
            Some(date) => form.select_date(date),
            None => form.enter_date(text)?,
        },
    }
    form.enter_sleep_time(args.sleep.unwrap_or_default())?;
    form.enter_wake_time(args.wake.unwrap_or_default())?;

    let entry = form.submit_at(store, now)?;

    let duration = entry.duration_label();
    if duration.is_empty() {
        writeln!(writer, "Sleep duration: not computed (wake up time is not after time of sleep)")?;
    } else {
        writeln!(writer, "Sleep duration: {duration}")?;
    }
    writeln!(writer, "{}", Notice::EntrySaved)?;
    Ok(entry)
}
