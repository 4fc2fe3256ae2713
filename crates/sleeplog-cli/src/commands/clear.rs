//! Clear command for wiping stored sleep data.

use std::io::Write;

use anyhow::{Context, Result};
use sleeplog_core::{EntryStore, KeyValueStore};

pub fn run<W: Write, S: KeyValueStore>(writer: &mut W, store: &mut EntryStore<S>) -> Result<()> {
    let count = store.stored_count()?;
    store.clear().context("failed to clear sleep data")?;
    tracing::info!(count, "cleared sleep data");
    let noun = if count == 1 { "entry" } else { "entries" };
    writeln!(writer, "Removed {count} sleep {noun}.")?;
    Ok(())
}
