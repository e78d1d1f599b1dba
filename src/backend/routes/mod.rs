//! Routes Module
//!
//! Route configuration for the HTTP server.
//!
//! - **`router`** - Main router: health check, tracing, fallback
//! - **`api_routes`** - Public auth and upload endpoints
//! - **`chat_routes`** - Authenticated chat endpoints

pub mod router;
pub mod api_routes;
pub mod chat_routes;

pub use router::create_router;
