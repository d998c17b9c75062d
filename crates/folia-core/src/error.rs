//! Error types for folia-core

use std::path::Path;

use thiserror::Error;

/// Result type alias for folia operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur across the Folia crates
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error carrying the path it occurred on
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Underlying I/O error.
        source: std::io::Error,
        /// Path the operation was acting on.
        path: String,
    },

    /// Malformed input (corpus JSON, serialized options, ...)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// An operation on an otherwise valid input failed
    #[error("Operation failed: {0}")]
    Operation(String),
}

impl Error {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::Io {
            source,
            path: path.as_ref().display().to_string(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an operation error.
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_with_path_display() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::io_with_path(io, "/data/corpus.json");
        let msg = err.to_string();
        assert!(msg.contains("/data/corpus.json"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = Error::parse("unexpected token");
        assert_eq!(err.to_string(), "Parse error: unexpected token");
    }

    #[test]
    fn test_config_error_display() {
        let err = Error::config("unknown language");
        assert_eq!(err.to_string(), "Configuration error: unknown language");
    }

    #[test]
    fn test_operation_error_display() {
        let err = Error::operation("index write failed");
        assert_eq!(err.to_string(), "Operation failed: index write failed");
    }
}
