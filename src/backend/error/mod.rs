//! Backend Error Module
//!
//! Error types raised by the services and returned by HTTP handlers.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! Every failure is scoped to one request: validation problems become 400,
//! rejected credentials 401, missing or foreign resources 404 and everything
//! else a generic 500 whose details only reach the log.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
