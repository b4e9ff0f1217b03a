use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::reminder::ticker;
use crate::theme::ThemeConfig;

const APP_DIR: &str = "medication-reminder";

/// Why the config file was ignored.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings read from `<config_dir>/medication-reminder/config.toml`.
///
/// Every key is optional; a missing or unreadable file yields the defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: PathBuf,
    pub check_interval_secs: u64,
    pub tray: bool,
    pub start_hidden: bool,
    pub log_level: String,
    pub log_file: PathBuf,
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        let data = data_dir();
        Self {
            database: data.join("medication.db"),
            check_interval_secs: 15,
            tray: true,
            start_hidden: false,
            log_level: "info".to_string(),
            log_file: data.join("medication-reminder.log"),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Read the config file, falling back to defaults.
    ///
    /// Runs before logging is set up, so a failure is handed back for the
    /// caller to log.
    pub fn load() -> (Self, Option<ConfigError>) {
        match config_path() {
            Some(path) if path.exists() => match Self::load_from(&path) {
                Ok(config) => (config, None),
                Err(e) => (Self::default(), Some(e)),
            },
            _ => (Self::default(), None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(content)?;
        config.check_interval_secs = ticker::clamp_interval(config.check_interval_secs);
        Ok(config)
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
