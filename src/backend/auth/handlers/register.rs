/**
 * Register Handler
 *
 * `POST /auth/register` creates an account and signs the new user in.
 *
 * # Registration Process
 *
 * 1. Validate required fields, email format and password confirmation
 * 2. Run the password strength policy
 * 3. Reject duplicate email or username
 * 4. Hash the password and insert the user
 * 5. Issue an access/refresh token pair
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::credentials;
use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest, UserResponse};
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;
use crate::backend::server::state::AppState;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - any validation failure, including duplicates
/// * `500 Internal Server Error` - hashing, database or token failure
///
/// # Example Request
///
/// ```http
/// POST /auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "a@x.io",
///   "username": "alice",
///   "first_name": "Alice",
///   "last_name": "Liddell",
///   "password": "secret123!",
///   "password_confirm": "secret123!"
/// }
/// ```
pub async fn register(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let user = credentials::register(&app_state.db_pool, &app_state.passwords, &request).await?;
    let pair = app_state.tokens.issue_pair(user.id, &user.email)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserResponse::from(&user),
            token: pair.access,
            refresh: pair.refresh,
        }),
    ))
}
