//! Configuration type definitions
//!
//! Every section is optional in YAML; an empty file yields a configuration that
//! talks to a backend on `localhost:5000` and keeps the session id in the
//! platform's local data directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::ConfigError;
use crate::timer::{DEFAULT_MINUTES, PRESET_MINUTES};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AuroMindConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Unset means requests run until the transport gives up.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StorageConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimerConfig {
    #[serde(default = "default_timer_minutes")]
    pub default_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_minutes: default_timer_minutes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timer_minutes() -> u32 {
    DEFAULT_MINUTES
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("auromind.log")
}

impl AuroMindConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.backend.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "backend.base_url must be an http(s) URL, got '{}'",
                self.backend.base_url
            )));
        }

        if self.backend.request_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "backend.request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        if !PRESET_MINUTES.contains(&self.timer.default_minutes) {
            return Err(ConfigError::Invalid(format!(
                "timer.default_minutes must be one of {:?}, got {}",
                PRESET_MINUTES, self.timer.default_minutes
            )));
        }

        Ok(())
    }
}
