//! Error types for configuration and flow sources
//!
//! Composition itself cannot fail; only reading inputs can.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading engine configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for '{key}': {reason}")]
    Invalid { key: String, reason: String },
}

impl ConfigError {
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by a flow source while producing a document
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse document TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported document format for {path} (expected .toml or .json)")]
    UnknownFormat { path: PathBuf },

    #[error("duplicate page template id '{id}'")]
    DuplicateTemplate { id: String },

    #[error("page template #{index} has an empty id")]
    EmptyTemplateId { index: usize },
}

impl SourceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors from the load-then-compose pipeline
#[derive(Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("source error: {0}")]
    Source(#[from] SourceError),
}
