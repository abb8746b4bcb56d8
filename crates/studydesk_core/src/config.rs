//! TOML configuration for the application shell.
//!
//! # Responsibility
//! - Load `config.toml`, creating it with defaults on first run.
//! - Resolve default data, database and log locations.
//!
//! # Invariants
//! - Missing sections and fields fall back to defaults.
//! - `validate()` runs on every load; an invalid file is an error, not a
//!   silent default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const APP_DIR_NAME: &str = "studydesk";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "studydesk.sqlite3";

pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_ADVISOR_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_ADVISOR_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_CHIME_INTERVAL_SECS: u64 = 60;
pub const MAX_CHIME_INTERVAL_SECS: u64 = 24 * 60 * 60;
pub const MAX_ADVISOR_TIMEOUT_SECS: u64 = 10 * 60;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    /// Absolute log directory; defaults under the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: crate::logging::default_log_level().to_string(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Inline key; prefer `api_key_env` so the key stays out of the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub api_key_env: String,
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            endpoint: DEFAULT_ADVISOR_ENDPOINT.to_string(),
            model: DEFAULT_ADVISOR_MODEL.to_string(),
            timeout_secs: 15,
        }
    }
}

impl AdvisorConfig {
    /// Inline key if set, otherwise the environment variable named by
    /// `api_key_env`. Blank values count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        let non_blank = |key: &str| {
            let key = key.trim();
            (!key.is_empty()).then(|| key.to_string())
        };
        self.api_key
            .as_deref()
            .and_then(non_blank)
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .as_deref()
                    .and_then(non_blank)
            })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    pub enabled: bool,
    pub chime_interval_secs: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            chime_interval_secs: DEFAULT_CHIME_INTERVAL_SECS,
        }
    }
}

impl NotificationsConfig {
    pub fn chime_interval(&self) -> Duration {
        Duration::from_secs(self.chime_interval_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub advisor: AdvisorConfig,
    pub notifications: NotificationsConfig,
}

impl AppConfig {
    /// Per-user config directory, e.g. `~/.config/studydesk` on Linux.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
    }

    pub fn default_config_path() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE_NAME)
    }

    /// Per-user data directory, e.g. `~/.local/share/studydesk` on Linux.
    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
    }

    pub fn from_toml(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, writing a default file first if it does not exist.
    pub fn load_or_create(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            let defaults = Self::default();
            defaults.save(path)?;
            return Ok(defaults);
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text).map_err(io_err)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !matches!(
            self.logging.level.trim().to_ascii_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "warning" | "error"
        ) {
            return Err(ConfigError::Invalid(format!(
                "logging.level `{}` is not one of trace|debug|info|warn|error",
                self.logging.level
            )));
        }
        if !(1..=MAX_CHIME_INTERVAL_SECS).contains(&self.notifications.chime_interval_secs) {
            return Err(ConfigError::Invalid(format!(
                "notifications.chime_interval_secs must be within 1..={MAX_CHIME_INTERVAL_SECS}, got {}",
                self.notifications.chime_interval_secs
            )));
        }
        if !(1..=MAX_ADVISOR_TIMEOUT_SECS).contains(&self.advisor.timeout_secs) {
            return Err(ConfigError::Invalid(format!(
                "advisor.timeout_secs must be within 1..={MAX_ADVISOR_TIMEOUT_SECS}, got {}",
                self.advisor.timeout_secs
            )));
        }
        Ok(())
    }

    pub fn db_path(&self) -> PathBuf {
        self.storage
            .db_path
            .clone()
            .unwrap_or_else(|| Self::data_dir().join(DB_FILE_NAME))
    }

    pub fn log_dir(&self) -> PathBuf {
        self.logging
            .dir
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("logs"))
    }
}
