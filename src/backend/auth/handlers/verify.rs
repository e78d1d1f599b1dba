/**
 * Verify Handler
 *
 * `GET /auth/verify` returns the user behind the bearer token. The frontend
 * calls it on load to find out whether a stored token is still good.
 */

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::credentials;
use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::error::BackendError;
use crate::backend::middleware::bearer_token;

/// Verify handler
///
/// # Errors
///
/// * `401 Unauthorized` - token missing, invalid, expired, or the user is gone or inactive
pub async fn verify(
    State(pool): State<SqlitePool>,
    State(tokens): State<Arc<TokenIssuer>>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, BackendError> {
    let user = credentials::verify(&pool, &tokens, bearer_token(&headers)).await?;
    Ok(Json(UserResponse::from(&user)))
}
