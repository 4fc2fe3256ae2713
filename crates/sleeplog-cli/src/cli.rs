//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sleeplog_core::Route;

/// Personal sleep tracker.
///
/// Records sleep sessions, derives how long you slept, and keeps the last two
/// weeks of entries.
#[derive(Debug, Parser)]
#[command(name = "sleeplog", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the home screen.
    Home,

    /// Learn about the benefits of good sleep.
    Benefits,

    /// Add a new sleep entry.
    Add {
        /// Date of sleep ("Oct 16, 2026" or 2026-10-16). Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// Time of sleep, 24-hour HH:MM.
        #[arg(long)]
        sleep: Option<String>,

        /// Wake up time, 24-hour HH:MM.
        #[arg(long)]
        wake: Option<String>,
    },

    /// View sleep entries from the retention window.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the most recently submitted entry.
    Last,

    /// Delete all stored sleep data.
    Clear,

    /// Open a screen by route name (home, sleep_benefits, new_sleep_entry, view_sleep_data).
    Open {
        /// Route name.
        route: Route,
    },

    /// Sign in with an identity token.
    SignIn {
        /// Token from the identity provider. Falls back to the configured `id_token`.
        #[arg(long, env = "SLEEPLOG_ID_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
}
