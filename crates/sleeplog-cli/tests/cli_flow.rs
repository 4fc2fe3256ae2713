//! End-to-end tests for the sleeplog binary.
//!
//! Each test points the binary at a fresh database through a temp config
//! file and drives it like a user would: add → list → last → clear.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use chrono::{Days, Local};
use tempfile::{NamedTempFile, TempDir};

fn sleeplog_binary() -> &'static str {
    env!("CARGO_BIN_EXE_sleeplog")
}

/// A temp HOME plus a config file pointing at a database inside it.
struct Env {
    home: TempDir,
    config: NamedTempFile,
}

impl Env {
    fn new() -> Self {
        Self::with_settings("")
    }

    fn with_settings(extra: &str) -> Self {
        let home = TempDir::new().unwrap();
        let db_path = home.path().join("data/sleeplog.db");
        let mut config = NamedTempFile::new().unwrap();
        writeln!(config, "database_path = \"{}\"", db_path.display()).unwrap();
        writeln!(config, "{extra}").unwrap();
        config.flush().unwrap();
        Self { home, config }
    }

    fn db_path(&self) -> std::path::PathBuf {
        self.home.path().join("data/sleeplog.db")
    }

    fn run(&self, args: &[&str]) -> Output {
        run_in(self.home.path(), self.config.path(), args)
    }
}

fn run_in(home: &Path, config: &Path, args: &[&str]) -> Output {
    Command::new(sleeplog_binary())
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("SLEEPLOG_ID_TOKEN")
        .env_remove("SLEEPLOG_ALLOW_OVERNIGHT")
        .env_remove("SLEEPLOG_RETENTION_DAYS")
        .env_remove("SLEEPLOG_DATABASE_PATH")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("failed to run sleeplog")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn days_ago(n: u64) -> String {
    Local::now()
        .date_naive()
        .checked_sub_days(Days::new(n))
        .unwrap()
        .format("%Y-%m-%d")
        .to_string()
}

#[test]
fn test_no_subcommand_shows_home() {
    let env = Env::new();
    let output = env.run(&[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("Welcome to Better Sleep"));
}

#[test]
fn test_add_then_list() {
    let env = Env::new();

    let output = env.run(&["add", "--date", &days_ago(1), "--sleep", "00:30", "--wake", "07:30"]);
    assert!(output.status.success(), "add failed: {}", stderr(&output));
    assert_eq!(stdout(&output), "Sleep duration: 7 hours\nSleep entry saved\n");
    assert!(env.db_path().exists(), "database should be created");

    let output = env.run(&["list"]);
    assert!(output.status.success(), "list failed: {}", stderr(&output));
    let listed = stdout(&output);
    assert_eq!(listed.lines().count(), 1);
    assert!(listed.contains("Sleep Time: 00:30, Wake Up Time: 07:30, Duration: 7 hours"));
}

#[test]
fn test_duplicate_entries_are_kept() {
    let env = Env::new();
    let args = ["add", "--sleep", "01:00", "--wake", "08:00"];

    assert!(env.run(&args).status.success());
    assert!(env.run(&args).status.success());

    let output = env.run(&["list", "--json"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["entries"].as_array().unwrap().len(), 2);
}

#[test]
fn test_old_entries_are_dropped_on_write() {
    let env = Env::new();

    assert!(
        env.run(&["add", "--date", &days_ago(20), "--sleep", "01:00", "--wake", "08:00"])
            .status
            .success()
    );
    assert!(
        env.run(&["add", "--date", &days_ago(2), "--sleep", "01:00", "--wake", "09:00"])
            .status
            .success()
    );

    let output = env.run(&["list", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let entries = value["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["duration"], "8 hours");
}

#[test]
fn test_missing_fields_fail_with_notice() {
    let env = Env::new();
    let output = env.run(&["add", "--sleep", "22:00"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Please fill in all fields"));

    let output = env.run(&["list"]);
    assert!(stdout(&output).starts_with("No sleep entries in the last 14 days."));
}

#[test]
fn test_invalid_time_fails_with_notice() {
    let env = Env::new();
    let output = env.run(&["add", "--sleep", "10pm", "--wake", "06:00"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid date or time format"));
}

#[test]
fn test_overnight_setting() {
    let same_day = Env::new();
    let output = same_day.run(&["add", "--sleep", "23:00", "--wake", "07:00"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Sleep duration: not computed"));

    let overnight = Env::with_settings("allow_overnight = true");
    let output = overnight.run(&["add", "--sleep", "23:00", "--wake", "07:00"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Sleep duration: 8 hours"));
}

#[test]
fn test_zero_retention_is_rejected() {
    let env = Env::with_settings("retention_days = 0");
    let output = env.run(&["add", "--sleep", "01:00", "--wake", "08:00"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to load configuration"));
    assert!(!env.db_path().exists());
}

#[test]
fn test_last_and_clear() {
    let env = Env::new();

    let output = env.run(&["last"]);
    assert_eq!(stdout(&output), "No sleep entry submitted yet.\n");

    assert!(env.run(&["add", "--sleep", "02:00", "--wake", "08:00"]).status.success());
    let output = env.run(&["last"]);
    assert!(stdout(&output).contains("Duration: 6 hours"));

    let output = env.run(&["clear"]);
    assert_eq!(stdout(&output), "Removed 1 sleep entry.\n");
    let output = env.run(&["last"]);
    assert_eq!(stdout(&output), "No sleep entry submitted yet.\n");
}

#[test]
fn test_open_routes() {
    let env = Env::new();

    let output = env.run(&["open", "sleep_benefits"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Benefits of Good Sleep"));

    let output = env.run(&["open", "new_sleep_entry"]);
    assert!(stdout(&output).starts_with("New sleep entry\nDate of sleep:\n"));

    let output = env.run(&["open", "view_sleep_data"]);
    assert!(stdout(&output).starts_with("No sleep entries"));

    let output = env.run(&["open", "settings"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown route: settings"));
}

#[test]
fn test_sign_in() {
    let env = Env::new();

    let output = env.run(&["sign-in"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Sign-in failed. Please try again."));

    let output = env.run(&["sign-in", "--token", "opaque-token"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Welcome to Better Sleep"));
}
