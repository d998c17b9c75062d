//! Error types for folia-cli

use thiserror::Error;

/// Result type alias for folia-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in folia-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from folia-core
    #[error("Core error: {0}")]
    Core(#[from] folia_core::Error),

    /// JSON output serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
