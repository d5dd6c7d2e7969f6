//! Configuration management for the TDE CLI
//!
//! Values are layered: built-in defaults, then the optional TOML file
//! (`$TDE_CONFIG_FILE`, or `<config dir>/tde/config.toml`), then environment
//! variables, then command-line flags applied by the caller.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Backend used when nothing else is configured
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Request timeout; the backend does no long-running work per call
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Rows per page in dataset listings
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend API base URL
    pub server_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Rows per page in dataset listings
    pub page_size: usize,

    /// Colourise terminal output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            color: true,
        }
    }
}

impl Config {
    /// Load defaults, the config file, and the environment
    ///
    /// The default location may be absent. A file named by `TDE_CONFIG_FILE`
    /// must exist.
    pub fn load() -> Result<Self> {
        let config = match std::env::var_os("TDE_CONFIG_FILE") {
            Some(explicit) => {
                let path = PathBuf::from(explicit);
                if !path.is_file() {
                    return Err(CliError::config(format!(
                        "TDE_CONFIG_FILE points to {}, which is not a readable file",
                        path.display()
                    )));
                }
                Self::from_file(&path)?
            },
            None => match Self::config_file_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.merge_env()?.validated()
    }

    /// Location of the config file
    pub fn config_file_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("TDE_CONFIG_FILE") {
            return Some(PathBuf::from(path));
        }

        dirs::config_dir().map(|dir| dir.join("tde").join("config.toml"))
    }

    /// Read a TOML config file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Overlay environment variables
    ///
    /// - `TDE_API_BASE_URL`: backend base URL
    /// - `TDE_API_TIMEOUT_SECS`: request timeout
    /// - `TDE_PAGE_SIZE`: rows per page
    /// - `NO_COLOR`: disable colours when set to anything
    pub fn merge_env(mut self) -> Result<Self> {
        if let Ok(url) = std::env::var("TDE_API_BASE_URL") {
            self.server_url = url;
        }

        if let Ok(raw) = std::env::var("TDE_API_TIMEOUT_SECS") {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                CliError::config(format!("TDE_API_TIMEOUT_SECS must be a whole number, got '{raw}'"))
            })?;
        }

        if let Ok(raw) = std::env::var("TDE_PAGE_SIZE") {
            self.page_size = raw.trim().parse().map_err(|_| {
                CliError::config(format!("TDE_PAGE_SIZE must be a whole number, got '{raw}'"))
            })?;
        }

        if std::env::var_os("NO_COLOR").is_some() {
            self.color = false;
        }

        Ok(self)
    }

    /// Reject values no command can work with
    pub fn validated(self) -> Result<Self> {
        if self.server_url.trim().is_empty() {
            return Err(CliError::config("server_url cannot be empty"));
        }

        if self.page_size == 0 {
            return Err(CliError::config("page_size must be at least 1"));
        }

        Ok(self)
    }

    /// Set the server URL
    pub fn set_server_url(&mut self, url: impl Into<String>) {
        self.server_url = url.into();
    }

    /// Get the server URL
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Look up a single value by key, for `tde config get`
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "server_url" => Ok(self.server_url.clone()),
            "timeout_secs" => Ok(self.timeout_secs.to_string()),
            "page_size" => Ok(self.page_size.to_string()),
            "color" => Ok(self.color.to_string()),
            _ => Err(CliError::config(format!(
                "Unknown config key '{key}'. Valid keys: server_url, timeout_secs, page_size, color"
            ))),
        }
    }
}
