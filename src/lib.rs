//! Chatbot Server - Main Library
//!
//! Backend for a conversational chat application: user accounts and
//! sessions, persisted conversations, and upload credentials for the
//! ImageKit media service. Answers are produced elsewhere; clients send
//! both the question and the answer to be stored.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types and boundary validation, no server dependencies
//!   - Chat and message projections, request bodies
//!   - `SharedError`
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum router, auth middleware and handlers
//!   - SQLite persistence through sqlx
//!   - JWT sessions, bcrypt password hashing
//!   - Upload signing bridge
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the `backend` module and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use chatbot_server::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::builder()
//!     .database_url("sqlite::memory:")
//!     .jwt_secret("change-me")
//!     .build()?;
//! let app = create_app(&config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
