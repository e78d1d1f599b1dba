//! Server Module
//!
//! Configuration, shared state and startup for the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Environment configuration
//! └── init.rs         - Database connection, signer selection, app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env`
//! 2. **Database**: SQLite pool plus migrations
//! 3. **State Creation**: token issuer, password policy, upload bridge
//! 4. **Router Creation**: routes, auth middleware, tracing and CORS layers
//!
//! # Example
//!
//! ```rust,no_run
//! use chatbot_server::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::{ConfigError, ServerConfig};
pub use init::{connect_database, create_app, StartupError};
pub use state::AppState;
