/**
 * Router Configuration
 *
 * Combines the public API routes and the protected chat routes into one
 * router, adds request tracing and a JSON 404 fallback.
 */

use axum::{response::Json, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::chat_routes::configure_chat_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// ## Public
///
/// - `GET /health`
/// - `POST /auth/register`, `POST /auth/login`, `GET /auth/verify`,
///   `POST /auth/token/refresh`
/// - `GET /imagekit-auth`
///
/// ## Authenticated
///
/// - `GET|POST /chats`
/// - `GET|PUT|PATCH|DELETE /chats/{id}`
///
/// Every path is also routed with a trailing slash.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/health", get(health));

    let router = configure_api_routes(router);
    let router = configure_chat_routes(router, app_state.clone());

    router
        .fallback(|| async { BackendError::not_found("route") })
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
