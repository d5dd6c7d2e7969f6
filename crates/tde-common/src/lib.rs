//! TDE Common Library
//!
//! Shared types, logging, and error handling for the TUFT Data Environment
//! workspace.
//!
//! # Overview
//!
//! - **Error Handling**: The network / validation / parse error taxonomy
//! - **Logging**: Centralised `tracing` subscriber setup
//! - **Types**: Records exchanged with the data registry backend
//!
//! # Example
//!
//! ```no_run
//! use tde_common::types::Dataset;
//!
//! fn parse(body: &str) -> tde_common::Result<Vec<Dataset>> {
//!     Ok(serde_json::from_str(body)?)
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{Result, TdeError};
