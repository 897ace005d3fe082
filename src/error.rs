//! Error types for specguard
//!
//! The diff, lint and score entry points never fail. Errors only come from
//! reading documents, picking a diff engine, or loading configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for specguard operations
pub type Result<T> = std::result::Result<T, SpecError>;

/// Specguard errors
#[derive(Error, Debug)]
pub enum SpecError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported schema format: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}
