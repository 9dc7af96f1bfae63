//! Error types and utilities for Blossom Bridge

use thiserror::Error;

/// Result type alias for Blossom operations
pub type Result<T> = std::result::Result<T, BlossomError>;

/// Main error type for Blossom operations
#[derive(Error, Debug)]
pub enum BlossomError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Logging setup errors
    #[error("Logging error: {message}")]
    Logging {
        /// Human readable description.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl BlossomError {
    /// Create a new logging error with source
    pub fn logging_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Logging {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_logging_error_keeps_source() {
        let error = BlossomError::logging_with_source(
            "Failed to open log file",
            io::Error::new(io::ErrorKind::PermissionDenied, "Access denied"),
        );

        assert_eq!(error.to_string(), "Logging error: Failed to open log file");
        assert_eq!(
            error.source().map(ToString::to_string).as_deref(),
            Some("Access denied")
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let blossom_error: BlossomError = io_error.into();

        assert!(blossom_error.to_string().contains("I/O error"));
        assert!(matches!(blossom_error, BlossomError::Io(_)));
    }

    #[test]
    fn test_error_chain_preservation() {
        let root_error = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let middle_error = BlossomError::logging_with_source("Middle layer", root_error);
        let top_error = BlossomError::Config {
            message: "Top layer".to_string(),
            source: Some(Box::new(middle_error)),
        };

        let mut current_error: &dyn std::error::Error = &top_error;
        let mut error_count = 0;

        while let Some(source) = current_error.source() {
            current_error = source;
            error_count += 1;
        }

        assert_eq!(error_count, 2);
        assert_eq!(current_error.to_string(), "Root cause");
    }
}
