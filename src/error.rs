//! Error types for the Fabric library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`FabricError`] enum. At the C ABI boundary every error collapses to a
//! `false` return value after being logged, so the variants here are the
//! only place where the cause of a failure is preserved.
//!
//! # Examples
//!
//! ```
//! use fabric::error::{FabricError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(FabricError::invalid_argument("key must not be empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Fabric operations.
#[derive(Error, Debug)]
pub enum FabricError {
    /// `index` or `search` was called before a successful `init`.
    #[error("Engine not initialized")]
    NotInitialized,

    /// Invalid caller input (empty key, null pointer, bad UTF-8, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An allocation needed by the operation could not be made.
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    /// A result handle that is not outstanding was resolved or released.
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with FabricError.
pub type Result<T> = std::result::Result<T, FabricError>;

impl FabricError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        FabricError::InvalidArgument(msg.into())
    }

    /// Create a new resource exhausted error.
    pub fn resource_exhausted<S: Into<String>>(msg: S) -> Self {
        FabricError::ResourceExhausted(msg.into())
    }

    /// Create a new invalid handle error.
    pub fn invalid_handle<S: Into<String>>(msg: S) -> Self {
        FabricError::InvalidHandle(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        FabricError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        FabricError::Other(msg.into())
    }

    /// Whether this error reports a lifecycle violation.
    pub fn is_not_initialized(&self) -> bool {
        matches!(self, FabricError::NotInitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = FabricError::invalid_argument("empty key");
        assert_eq!(error.to_string(), "Invalid argument: empty key");

        let error = FabricError::config("max_results must be positive");
        assert_eq!(
            error.to_string(),
            "Configuration error: max_results must be positive"
        );

        assert_eq!(
            FabricError::NotInitialized.to_string(),
            "Engine not initialized"
        );
        assert!(FabricError::NotInitialized.is_not_initialized());
        assert!(!FabricError::other("x").is_not_initialized());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let fabric_error = FabricError::from(io_error);

        match fabric_error {
            FabricError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
