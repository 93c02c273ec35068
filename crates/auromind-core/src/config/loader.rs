//! Configuration loader for YAML files and environment overrides

use std::env;
use std::path::Path;

use tokio::fs;

use crate::config::types::AuroMindConfig;
use crate::errors::ConfigError;

pub const SERVER_URL_ENV: &str = "AUROMIND_SERVER_URL";
pub const STORAGE_PATH_ENV: &str = "AUROMIND_STORAGE_PATH";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file, or defaults when the file does not exist.
    pub async fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<AuroMindConfig, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            let mut config = AuroMindConfig::default();
            Self::apply_env_overrides(&mut config, |key| env::var(key).ok());
            config.validate()?;
            return Ok(config);
        }
        Self::from_file(path).await
    }

    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<AuroMindConfig, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let mut config = Self::parse(&content)?;
        Self::apply_env_overrides(&mut config, |key| env::var(key).ok());
        config.validate()?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a YAML string, without environment overrides
    pub fn from_str(content: &str) -> Result<AuroMindConfig, ConfigError> {
        let config = Self::parse(content)?;
        config.validate()?;
        Ok(config)
    }

    fn parse(content: &str) -> Result<AuroMindConfig, ConfigError> {
        if content.trim().is_empty() {
            return Ok(AuroMindConfig::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Applies `AUROMIND_*` variables found through `lookup`.
    pub fn apply_env_overrides<F>(config: &mut AuroMindConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(SERVER_URL_ENV).filter(|v| !v.is_empty()) {
            config.backend.base_url = url;
        }
        if let Some(path) = lookup(STORAGE_PATH_ENV).filter(|v| !v.is_empty()) {
            config.storage.path = Some(path.into());
        }
    }
}
