//! Error types for the TDE CLI
//!
//! Every variant carries a message a user can act on. [`CliError::kind`]
//! folds them into the three classes the dashboard distinguishes: network,
//! validation, and parse failures.

use tde_common::TdeError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Broad class of a failure, used to pick how it is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Validation,
    Parse,
    Other,
}

#[derive(Error, Debug)]
pub enum CliError {
    /// The backend answered with a non-2xx status
    #[error("Server error{}: {message}", status_suffix(.status))]
    Network { status: Option<u16>, message: String },

    /// The request never got an answer
    #[error("Network request failed: {0}. Check your connection and the server URL (TDE_API_BASE_URL).")]
    Http(#[from] reqwest::Error),

    /// Required input is missing or malformed; nothing was sent
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The backend answered 2xx with a body we could not understand
    #[error("Unexpected response from server: {0}")]
    Parse(String),

    /// A single-flight action was triggered while already running
    #[error("A {0} is already in progress. Wait for it to finish before trying again.")]
    InFlight(&'static str),

    #[error("Clipboard unavailable: {0}. Re-run without --copy and copy the snippet from the terminal.")]
    Clipboard(String),

    #[error("Configuration error: {0}. Check your environment variables or config file.")]
    Config(String),

    #[error("Failed to parse config file: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("File operation failed: {0}. Check the path and file permissions.")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt cancelled: {0}")]
    Prompt(#[from] inquire::InquireError),

    #[error(transparent)]
    Common(#[from] TdeError),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl CliError {
    pub fn network(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Network {
            status,
            message: message.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Which reporting class this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network { .. } | Self::Http(_) => ErrorKind::Network,
            Self::Validation(_) | Self::InFlight(_) => ErrorKind::Validation,
            Self::Parse(_) | Self::Json(_) => ErrorKind::Parse,
            Self::Common(TdeError::Network(_)) => ErrorKind::Network,
            Self::Common(TdeError::Validation(_)) => ErrorKind::Validation,
            Self::Common(TdeError::Parse(_) | TdeError::Serialization(_)) => ErrorKind::Parse,
            _ => ErrorKind::Other,
        }
    }

    /// The backend's own explanation, when it sent one
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            Self::Network { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_display_includes_status() {
        let err = CliError::network(Some(404), "Dataset not found");
        assert_eq!(err.to_string(), "Server error (HTTP 404): Dataset not found");
        assert_eq!(err.server_detail(), Some("Dataset not found"));

        let err = CliError::network(None, "connection reset");
        assert_eq!(err.to_string(), "Server error: connection reset");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(CliError::network(Some(500), "boom").kind(), ErrorKind::Network);
        assert_eq!(CliError::validation("Title is required").kind(), ErrorKind::Validation);
        assert_eq!(CliError::parse("expected array").kind(), ErrorKind::Parse);
        assert_eq!(CliError::InFlight("registration").kind(), ErrorKind::Validation);
        assert_eq!(
            CliError::from(TdeError::validation("Site is required")).kind(),
            ErrorKind::Validation
        );
        assert_eq!(CliError::config("bad").kind(), ErrorKind::Other);
    }
}
