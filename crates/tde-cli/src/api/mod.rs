//! API client module
//!
//! HTTP client for the TDE data registry backend, and the
//! [`RegistryBackend`] trait the view models are written against.

pub mod backend;
pub mod client;
pub mod endpoints;
pub mod types;

pub use backend::RegistryBackend;
pub use client::ApiClient;
pub use types::*;
