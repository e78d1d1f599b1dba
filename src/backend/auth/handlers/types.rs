/**
 * Authentication Handler Types
 *
 * Request and response bodies for the `/auth` endpoints. The registration
 * body belongs to the credential service and is re-exported here.
 *
 * Request fields are optional at the serde level so a missing field is
 * reported as a field-level validation error instead of a generic
 * deserialization failure.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::users::User;

pub use crate::backend::auth::credentials::RegisterRequest;

/// Login request
///
/// Email is the only login key.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Refresh request
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

/// Returned by register and login
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub user: UserResponse,
    /// Access token for the `Authorization: Bearer` header
    pub token: String,
    /// Refresh token for `POST /auth/token/refresh`
    pub refresh: String,
}

/// Returned by the refresh endpoint
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub token: String,
}

/// Public projection of a user
///
/// Never includes the password hash or the account flags.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub date_joined: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            date_joined: user.created_at,
        }
    }
}
