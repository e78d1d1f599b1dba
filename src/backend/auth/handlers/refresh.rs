/**
 * Token Refresh Handler
 *
 * `POST /auth/token/refresh` trades a refresh token for a new access token.
 * The refresh token itself is not rotated.
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::credentials;
use crate::backend::auth::handlers::types::{RefreshRequest, TokenResponse};
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;

/// Refresh handler
///
/// # Errors
///
/// * `400 Bad Request` - `refresh` missing
/// * `401 Unauthorized` - not a valid refresh token for an active user
pub async fn refresh(
    State(pool): State<SqlitePool>,
    State(tokens): State<Arc<TokenIssuer>>,
    ApiJson(request): ApiJson<RefreshRequest>,
) -> Result<Json<TokenResponse>, BackendError> {
    let token = credentials::refresh(&pool, &tokens, request.refresh.as_deref()).await?;
    Ok(Json(TokenResponse { token }))
}
