//! Upload Authorization Module
//!
//! Issues time-boxed credentials for direct-to-ImageKit uploads.
//!
//! # Module Structure
//!
//! ```text
//! uploads/
//! ├── mod.rs       - Module exports
//! ├── signer.rs    - UploadSigner trait and its implementations
//! ├── bridge.rs    - Fallback policy around a signer
//! └── handlers.rs  - GET /imagekit-auth
//! ```

pub mod signer;
pub mod bridge;
pub mod handlers;

pub use bridge::{UploadBridge, UploadFallback};
pub use handlers::imagekit_auth;
pub use signer::{
    HttpSigner, ImageKitSigner, SignerError, UnconfiguredSigner, UploadCredentials, UploadSigner,
};
