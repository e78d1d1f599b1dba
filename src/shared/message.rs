//! Chat and message wire types
//!
//! Request bodies accepted by the chat endpoints and the JSON projections
//! returned for chats and their messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Who authored a message.
///
/// Stored as the lowercase strings `user` and `ai`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Sender {
    /// Written by the human user
    User,
    /// Produced by the assistant
    Ai,
}

/// A single message as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// A chat with its full conversation, oldest message first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub id: Uuid,
    pub title: String,
    /// Owning user's ID
    pub user: Uuid,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<MessageResponse>,
}

/// A chat as it appears in the chat list (no messages)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub id: Uuid,
    pub title: String,
    pub user: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /chats`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateChatRequest {
    /// First user message; also the source of the chat title
    #[serde(default)]
    pub initial_message: Option<String>,
}

/// Body of `PUT`/`PATCH /chats/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppendExchangeRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

const REQUIRED: &str = "This field is required.";

/// Require a present, non-blank text field.
///
/// The value is returned untouched; only the emptiness check ignores
/// surrounding whitespace.
pub fn require_text<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, SharedError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(SharedError::validation(field, REQUIRED)),
    }
}

/// Require present, non-empty message content.
///
/// Whitespace is content here: `"   "` is a valid message and is stored
/// as sent.
pub fn require_content<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, SharedError> {
    match value {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(SharedError::validation(field, REQUIRED)),
    }
}
