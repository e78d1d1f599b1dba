//! Chat Backend Module
//!
//! Conversations and their messages.
//!
//! # Architecture
//!
//! - **`db`** - owner-scoped SQL for chats and messages
//! - **`service`** - validation, title derivation, NotFound mapping
//! - **`handlers`** - HTTP handlers for `/chats` and `/chats/{id}`
//!
//! # Chat Lifecycle
//!
//! A chat is created together with its first user message, grows by
//! question/answer pairs, and is finally deleted along with every message.
//! Titles are fixed at creation.

/// Database operations for chats and messages
pub mod db;

/// Conversation service
pub mod service;

/// HTTP handlers
pub mod handlers;

/// Re-export commonly used items
pub use service::{derive_title, TITLE_MAX_CHARS};
