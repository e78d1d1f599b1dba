//! Shared Module
//!
//! Types that describe the HTTP surface independently of the server:
//! chat/message projections, request bodies and the boundary validation
//! error. The backend converts its database records into these types.

/// Chat and message data structures
pub mod message;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use message::{
    AppendExchangeRequest, ChatResponse, ChatSummary, CreateChatRequest, MessageResponse, Sender,
};
pub use error::SharedError;
