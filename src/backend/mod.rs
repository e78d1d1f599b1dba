//! Backend Module
//!
//! All server-side code. Only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, startup
//! - **`routes`** - Route configuration and router assembly
//! - **`auth`** - Users, passwords, tokens, auth handlers
//! - **`chat`** - Conversations and messages
//! - **`uploads`** - Upload credential signing
//! - **`middleware`** - Bearer-token authentication
//! - **`extract`** - JSON extractor with the crate's error format
//! - **`error`** - `BackendError` and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Config, state, initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── chat/           - Chat store, service and handlers
//! ├── uploads/        - Upload authorization bridge
//! ├── middleware/     - Request middleware
//! ├── extract.rs      - ApiJson extractor
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the SQLite pool, the token issuer, the password policy
//! and the upload bridge. Nothing mutable lives in memory; every request
//! reads and writes through the database.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Chat persistence and handlers
pub mod chat;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Upload credential signing
pub mod uploads;

/// Request extractors
pub mod extract;

#[cfg(test)]
pub(crate) mod test_support;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppState, ServerConfig};
