//! Error types for the companion core
//!
//! Chat failures are split by where they happened (HTTP status, transport, body)
//! so callers can log them precisely, even though the send path folds all three
//! into the same fallback reply.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Backend returned HTTP {status}")]
    Remote { status: u16 },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("Storage location unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Read { path: String, message: String },
    #[error("Failed to parse YAML config: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("Presets cannot be changed while the timer is running")]
    Running,
    #[error("Unsupported preset: {0} minutes")]
    InvalidPreset(u32),
}
