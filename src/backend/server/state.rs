/**
 * Application State Management
 *
 * `AppState` holds the application-lifetime handles every request needs.
 * None of them carry per-request mutable state; the database pool is the
 * only shared resource that changes, and SQLite serializes its writes.
 *
 * The `FromRef` implementations let handlers extract just the piece they
 * need, e.g. `State(pool): State<SqlitePool>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::password::PasswordPolicy;
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::uploads::UploadBridge;

/// Central state container shared by all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// SQLite connection pool
    pub db_pool: SqlitePool,
    /// Signs and checks session tokens
    pub tokens: Arc<TokenIssuer>,
    /// Password strength rules and hashing cost
    pub passwords: Arc<PasswordPolicy>,
    /// Upload credential source with its fallback policy
    pub uploads: UploadBridge,
}

impl AppState {
    pub fn new(
        db_pool: SqlitePool,
        tokens: TokenIssuer,
        passwords: PasswordPolicy,
        uploads: UploadBridge,
    ) -> Self {
        Self {
            db_pool,
            tokens: Arc::new(tokens),
            passwords: Arc::new(passwords),
            uploads,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<TokenIssuer> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for UploadBridge {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.uploads.clone()
    }
}
