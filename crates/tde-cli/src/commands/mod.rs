//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function taking the
//! shared [`Context`].

pub mod config;
pub mod datasets;
pub mod files;
pub mod project;
pub mod register;
pub mod show;
pub mod snippet;
pub mod upload;

use crate::api::{ApiClient, RegistryBackend};
use crate::config::Config;
use crate::error::Result;
use crate::render::Theme;
use std::sync::Arc;

/// What every command needs: settings, a backend, and how to draw
pub struct Context {
    pub config: Config,
    pub backend: Arc<dyn RegistryBackend>,
    pub theme: Theme,
}

impl Context {
    /// Context talking to the configured backend over HTTP
    pub fn from_config(config: Config) -> Result<Self> {
        let client = ApiClient::from_config(&config)?;
        Ok(Self::with_backend(config, Arc::new(client)))
    }

    pub fn with_backend(config: Config, backend: Arc<dyn RegistryBackend>) -> Self {
        Self {
            theme: Theme::new(config.color),
            config,
            backend,
        }
    }

    pub fn backend(&self) -> &dyn RegistryBackend {
        self.backend.as_ref()
    }
}
