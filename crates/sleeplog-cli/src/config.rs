//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use sleeplog_core::{RETENTION_DAYS, RetentionWindow, Rollover};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,
    /// Days of entries kept on every write. Must be at least 1.
    pub retention_days: u32,
    /// Place a wake time earlier than the sleep time on the following day.
    pub allow_overnight: bool,
    /// Identity token handed through on sign-in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("retention_days", &self.retention_days)
            .field("allow_overnight", &self.allow_overnight)
            .field("id_token", &self.id_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("sleeplog.db"),
            retention_days: RETENTION_DAYS,
            allow_overnight: false,
            id_token: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (SLEEPLOG_*)
        figment = figment.merge(Env::prefixed("SLEEPLOG_"));

        let config: Self = figment.extract()?;
        // A zero-day window keeps nothing, so every write would empty the store.
        if config.retention_days == 0 {
            return Err(figment::Error::from(
                "retention_days must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Rollover policy for duration calculation.
    pub const fn rollover(&self) -> Rollover {
        Rollover::from_allow_overnight(self.allow_overnight)
    }

    /// Retention window applied by the entry store.
    pub const fn retention_window(&self) -> RetentionWindow {
        RetentionWindow::days(self.retention_days)
    }
}

/// Returns the platform-specific config directory for sleeplog.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sleeplog"))
}

/// Returns the platform-specific data directory for sleeplog.
///
/// On Linux: `~/.local/share/sleeplog`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("sleeplog"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_sleeplog() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "sleeplog");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_db() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.database_path, data_dir.join("sleeplog.db"));
        assert_eq!(config.retention_days, 14);
        assert!(!config.allow_overnight);
        assert_eq!(config.rollover(), Rollover::SameDay);
        assert_eq!(config.retention_window(), RetentionWindow::default());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "database_path = \"/tmp/sleep.db\"\nretention_days = 7\nallow_overnight = true"
        )
        .unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/sleep.db"));
        assert_eq!(config.retention_window(), RetentionWindow::days(7));
        assert_eq!(config.rollover(), Rollover::NextDay);
    }

    #[test]
    fn test_zero_retention_days_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "retention_days = 0").unwrap();
        file.flush().unwrap();

        let err = Config::load_from(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("retention_days must be at least 1"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config {
            id_token: Some("secret-token".to_string()),
            ..Config::default()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-token"));
    }
}
