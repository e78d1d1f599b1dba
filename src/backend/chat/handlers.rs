/**
 * Chat Handlers
 *
 * HTTP handlers for `/chats` and `/chats/{id}`. All of them sit behind
 * `auth_middleware` and act for the user it resolved.
 *
 * A path segment that is not a UUID cannot name one of the caller's
 * chats, so it is reported as 404 like any other unknown chat.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::chat::service;
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;
use crate::backend::middleware::AuthUser;
use crate::shared::{AppendExchangeRequest, ChatResponse, ChatSummary, CreateChatRequest};

fn parse_chat_id(raw: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw).map_err(|_| BackendError::not_found("chat"))
}

/// `GET /chats`
pub async fn list_chats(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<ChatSummary>>, BackendError> {
    Ok(Json(service::list_chats(&pool, user.user_id).await?))
}

/// `POST /chats` with `{"initial_message": "..."}`
pub async fn create_chat(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateChatRequest>,
) -> Result<(StatusCode, Json<ChatResponse>), BackendError> {
    let chat = service::create_chat(&pool, user.user_id, &request).await?;
    Ok((StatusCode::CREATED, Json(chat)))
}

/// `GET /chats/{id}`
pub async fn get_chat(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(chat_id): Path<String>,
) -> Result<Json<ChatResponse>, BackendError> {
    let chat_id = parse_chat_id(&chat_id)?;
    Ok(Json(service::get_chat(&pool, user.user_id, chat_id).await?))
}

/// `PUT`/`PATCH /chats/{id}` with `{"question": "...", "answer": "..."}`
pub async fn append_exchange(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(chat_id): Path<String>,
    ApiJson(request): ApiJson<AppendExchangeRequest>,
) -> Result<Json<ChatResponse>, BackendError> {
    let chat_id = parse_chat_id(&chat_id)?;
    let chat = service::append_exchange(&pool, user.user_id, chat_id, &request).await?;
    Ok(Json(chat))
}

/// `DELETE /chats/{id}`
pub async fn delete_chat(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(chat_id): Path<String>,
) -> Result<StatusCode, BackendError> {
    let chat_id = parse_chat_id(&chat_id)?;
    service::delete_chat(&pool, user.user_id, chat_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
