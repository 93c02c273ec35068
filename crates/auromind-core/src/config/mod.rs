//! Configuration module
//!
//! YAML file first, then `AUROMIND_*` environment variables; the binary applies
//! its command-line flags last.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;


use crate::errors::ConfigError;
use std::path::Path;

/// Load a configuration from a YAML file
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<AuroMindConfig, ConfigError> {
    ConfigLoader::from_file(path).await
}
