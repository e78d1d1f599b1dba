//! Shared Error Types
//!
//! This module defines the error raised when a request body fails boundary
//! validation. It lives outside the backend so request types can validate
//! themselves without pulling in server dependencies.
//!
//! # Usage
//!
//! ```rust
//! use chatbot_server::shared::error::SharedError;
//!
//! let error = SharedError::validation("initial_message", "This field is required.");
//! ```
use thiserror::Error;

/// Shared error types raised while validating request input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = SharedError::validation("email", "Enter a valid email address.");
        match &error {
            SharedError::ValidationError { field, message } => {
                assert_eq!(field, "email");
                assert_eq!(message, "Enter a valid email address.");
            }
        }
        assert_eq!(error.field(), "email");
    }

    #[test]
    fn test_error_display() {
        let error = SharedError::validation("password", "Password fields didn't match.");
        let display = format!("{}", error);
        assert!(display.contains("Validation error"));
        assert!(display.contains("password"));
    }
}
