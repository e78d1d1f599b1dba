//! Authentication Handlers Module
//!
//! HTTP handlers for the `/auth/*` endpoints. Each handler only unpacks the
//! request and shapes the response; the rules live in `auth::credentials`.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── types.rs     - Request and response types
//! ├── register.rs  - POST /auth/register
//! ├── login.rs     - POST /auth/login
//! ├── verify.rs    - GET /auth/verify
//! └── refresh.rs   - POST /auth/token/refresh
//! ```

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Verify handler
pub mod verify;

/// Token refresh handler
pub mod refresh;

// Re-export commonly used types
pub use types::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest, TokenResponse, UserResponse};

// Re-export handlers
pub use login::login;
pub use refresh::refresh;
pub use register::register;
pub use verify::verify;
