//! Authentication Module
//!
//! User accounts, password rules, session tokens and the HTTP handlers that
//! expose them.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── password.rs     - Password strength policy and hashing
//! ├── sessions.rs     - JWT access and refresh tokens
//! ├── credentials.rs  - register / login / verify / refresh
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: profile + password → policy checks → user created → token pair returned
//! 2. **Login**: email + password → hash verified, account active → token pair returned
//! 3. **Verify**: access token → active user returned
//! 4. **Refresh**: refresh token → new access token
//!
//! Deactivating a user revokes every token issued to them: verification
//! always re-reads the account.

/// User data model and database operations
pub mod users;

/// Password validators and hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// Credential service
pub mod credentials;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
pub use handlers::{login, refresh, register, verify};
pub use password::PasswordPolicy;
pub use sessions::{TokenIssuer, TokenKind};
pub use users::User;
