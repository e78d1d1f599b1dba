/**
 * Conversation Service
 *
 * Request validation, title derivation and the NotFound mapping on top of
 * `chat::db`. Every operation acts on behalf of one owner.
 *
 * For appends the ownership check runs before body validation: a caller
 * who does not own the chat gets 404 even when the body is also invalid.
 */

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::chat::db;
use crate::backend::error::BackendError;
use crate::shared::message::require_content;
use crate::shared::{AppendExchangeRequest, ChatResponse, ChatSummary, CreateChatRequest};

/// Titles longer than this many characters are truncated
pub const TITLE_MAX_CHARS: usize = 75;

/// Title for a chat, taken from its first message
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn derive_title(first_message: &str) -> String {
    match first_message.char_indices().nth(TITLE_MAX_CHARS) {
        Some((cut, _)) => format!("{}...", &first_message[..cut]),
        None => first_message.to_string(),
    }
}

/// Start a chat with its first user message
pub async fn create_chat(
    pool: &SqlitePool,
    owner: Uuid,
    request: &CreateChatRequest,
) -> Result<ChatResponse, BackendError> {
    let content = require_content("initial_message", request.initial_message.as_deref())?;
    let title = derive_title(content);

    let (chat, message) = db::insert_chat_with_message(pool, owner, &title, content).await?;
    tracing::info!("Chat {} created by user {}", chat.id, owner);

    Ok(chat.into_response(vec![message]))
}

/// The owner's chats, newest first
pub async fn list_chats(pool: &SqlitePool, owner: Uuid) -> Result<Vec<ChatSummary>, BackendError> {
    let chats = db::list_chats(pool, owner).await?;
    Ok(chats.into_iter().map(ChatSummary::from).collect())
}

/// One chat with its messages, oldest first
pub async fn get_chat(
    pool: &SqlitePool,
    owner: Uuid,
    chat_id: Uuid,
) -> Result<ChatResponse, BackendError> {
    let chat = db::find_chat(pool, owner, chat_id)
        .await?
        .ok_or_else(|| BackendError::not_found("chat"))?;
    let messages = db::load_messages(pool, owner, chat_id).await?;
    Ok(chat.into_response(messages))
}

/// Append a question and its answer, returning the updated chat
pub async fn append_exchange(
    pool: &SqlitePool,
    owner: Uuid,
    chat_id: Uuid,
    request: &AppendExchangeRequest,
) -> Result<ChatResponse, BackendError> {
    if db::find_chat(pool, owner, chat_id).await?.is_none() {
        return Err(BackendError::not_found("chat"));
    }

    let question = require_content("question", request.question.as_deref())?;
    let answer = require_content("answer", request.answer.as_deref())?;

    if db::append_pair(pool, owner, chat_id, question, answer).await?.is_none() {
        return Err(BackendError::not_found("chat"));
    }
    tracing::info!("Exchange appended to chat {}", chat_id);

    get_chat(pool, owner, chat_id).await
}

/// Delete a chat and its messages
pub async fn delete_chat(pool: &SqlitePool, owner: Uuid, chat_id: Uuid) -> Result<(), BackendError> {
    if !db::delete_chat(pool, owner, chat_id).await? {
        return Err(BackendError::not_found("chat"));
    }
    tracing::info!("Chat {} deleted by user {}", chat_id, owner);
    Ok(())
}
