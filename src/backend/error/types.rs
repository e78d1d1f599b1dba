/**
 * Backend Error Types
 *
 * This module defines the error taxonomy used by every service and handler.
 * Each variant maps to exactly one HTTP status code.
 *
 * # Error Categories
 *
 * - `Validation` - malformed or missing input (400)
 * - `Authentication` - bad credentials, invalid or expired tokens (401)
 * - `NotFound` - missing resource, or a resource owned by someone else (404)
 * - `Upstream` - the upload signing service failed in strict mode (500)
 * - `Database`, `Token`, `Hashing`, `Internal` - server-side failures (500)
 *
 * Ownership mismatches are reported as `NotFound` so a caller cannot tell
 * whether a chat ID exists.
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use chatbot_server::backend::error::BackendError;
///
/// let err = BackendError::validation("question", "This field is required.");
/// let err = BackendError::authentication("Invalid login credentials.");
/// let err = BackendError::not_found("chat");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request input failed validation
    #[error("Validation error in field '{field}': {message}")]
    Validation {
        /// The field that failed validation (`body` for unparseable payloads)
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Credentials or token rejected
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Human-readable error message
        message: String,
    },

    /// Resource is missing or not visible to the caller
    #[error("Not found: {resource}")]
    NotFound {
        /// Kind of resource that was looked up
        resource: String,
    },

    /// External collaborator failed
    #[error("Upstream error: {message}")]
    Upstream {
        /// Human-readable error message
        message: String,
    },

    /// Database driver error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Token issuance failed
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Password hashing failed
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Anything else that should never reach a client verbatim
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message
        message: String,
    },
}

impl BackendError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Authentication { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Upstream { .. }
            | Self::Database(_)
            | Self::Token(_)
            | Self::Hashing(_)
            | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// Server-side failures collapse to a generic message; their details
    /// are only logged.
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::Authentication { message } => message.clone(),
            Self::NotFound { .. } => "Not found.".to_string(),
            Self::Upstream { message } => message.clone(),
            Self::Database(_) | Self::Token(_) | Self::Hashing(_) | Self::Internal { .. } => {
                "Internal server error".to_string()
            }
        }
    }

    /// Offending field, for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { field, message } => Self::Validation { field, message },
        }
    }
}
