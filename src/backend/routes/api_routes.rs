/**
 * API Routes
 *
 * Public endpoints: authentication and upload credentials.
 *
 * `/auth/verify` checks its own bearer token instead of going through
 * `auth_middleware`, because its whole job is to report on that token.
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::{login, refresh, register, verify};
use crate::backend::server::state::AppState;
use crate::backend::uploads::imagekit_auth;

/// Configure API routes
///
/// - `POST /auth/register` - User registration
/// - `POST /auth/login` - User login
/// - `GET /auth/verify` - Resolve the bearer token to a user
/// - `POST /auth/token/refresh` - New access token from a refresh token
/// - `GET /imagekit-auth` - Upload credentials
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/auth/register", post(register))
        .route("/auth/register/", post(register))
        .route("/auth/login", post(login))
        .route("/auth/login/", post(login))
        .route("/auth/verify", get(verify))
        .route("/auth/verify/", get(verify))
        .route("/auth/token/refresh", post(refresh))
        .route("/auth/token/refresh/", post(refresh))
        .route("/imagekit-auth", get(imagekit_auth))
        .route("/imagekit-auth/", get(imagekit_auth))
}
