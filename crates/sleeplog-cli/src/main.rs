use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use sleeplog_core::{EntryForm, EntryStore, Route};
use sleeplog_db::Database;
use tracing_subscriber::EnvFilter;

use sleeplog_cli::commands::{add, benefits, clear, home, last, list, sign_in};
use sleeplog_cli::identity::ConfiguredTokenProvider;
use sleeplog_cli::{Cli, Commands, Config};

/// Load config and open the entry store, ensuring the database directory exists.
fn open_store(config_path: Option<&Path>) -> Result<(EntryStore<Database>, Config)> {
    let config = load_config(config_path)?;

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = Database::open(&config.database_path).context("failed to open database")?;
    let store = EntryStore::with_window(db, config.retention_window());
    Ok((store, config))
}

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let now = Local::now().naive_local();

    match &cli.command {
        None | Some(Commands::Home) => home::run(&mut out)?,
        Some(Commands::Benefits) => benefits::run(&mut out)?,
        Some(Commands::Add { date, sleep, wake }) => {
            let (mut store, config) = open_store(cli.config.as_deref())?;
            let args = add::AddArgs {
                date: date.as_deref(),
                sleep: sleep.as_deref(),
                wake: wake.as_deref(),
            };
            add::run(&mut out, &mut store, args, config.rollover(), now)?;
        }
        Some(Commands::List { json }) => {
            let (store, _config) = open_store(cli.config.as_deref())?;
            list::run(&mut out, &store, now, *json)?;
        }
        Some(Commands::Last) => {
            let (store, _config) = open_store(cli.config.as_deref())?;
            last::run(&mut out, &store)?;
        }
        Some(Commands::Clear) => {
            let (mut store, _config) = open_store(cli.config.as_deref())?;
            clear::run(&mut out, &mut store)?;
        }
        Some(Commands::Open { route }) => match route {
            Route::Home => home::run(&mut out)?,
            Route::SleepBenefits => benefits::run(&mut out)?,
            Route::NewSleepEntry => {
                let config = load_config(cli.config.as_deref())?;
                add::render_form(&mut out, &EntryForm::new(config.rollover()))?;
            }
            Route::ViewSleepData => {
                let (store, _config) = open_store(cli.config.as_deref())?;
                list::run(&mut out, &store, now, false)?;
            }
        },
        Some(Commands::SignIn { token }) => {
            let config = load_config(cli.config.as_deref())?;
            let provider =
                ConfiguredTokenProvider::new(token.as_deref(), config.id_token.as_deref());
            sign_in::run(&mut out, &provider)?;
        }
    }

    out.flush()?;
    Ok(())
}
