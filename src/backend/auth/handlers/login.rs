/**
 * Login Handler
 *
 * `POST /auth/login` exchanges an email and password for a token pair.
 *
 * Unknown email, wrong password and inactive account all produce the same
 * 401 so the endpoint cannot be used to probe for accounts.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::credentials;
use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;
use crate::backend::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - body malformed or a field missing
/// * `401 Unauthorized` - credentials rejected
pub async fn login(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let (user, pair) = credentials::login(
        &app_state.db_pool,
        &app_state.tokens,
        &app_state.passwords,
        request.email.as_deref(),
        request.password.as_deref(),
    )
    .await?;

    Ok(Json(AuthResponse {
        user: UserResponse::from(&user),
        token: pair.access,
        refresh: pair.refresh,
    }))
}
