//! Error types for TDE

use thiserror::Error;

/// Result type alias for TDE operations
pub type Result<T> = std::result::Result<T, TdeError>;

/// Main error type for TDE
#[derive(Error, Debug)]
pub enum TdeError {
    /// The request was rejected or answered with a non-2xx status
    #[error("Network error: {0}")]
    Network(String),

    /// Required input was missing before anything was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// A response body was not the JSON shape we expected
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TdeError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
