//! Centralized error types for scribe.

use thiserror::Error;

/// Main error type for core operations.
#[derive(Error, Debug)]
pub enum ScribeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid ignore pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for core operations.
pub type ScribeResult<T> = Result<T, ScribeError>;

impl ScribeError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
