//! Common test utilities and helpers
//!
//! - `app` - an in-memory server driven through `tower::ServiceExt::oneshot`
//! - `auth_helpers` - registering users and building auth headers
//! - `assertions` - assertion macros for API responses

#![allow(dead_code)]

pub mod app;
pub mod assertions;
pub mod auth_helpers;

pub use app::*;
pub use auth_helpers::*;
