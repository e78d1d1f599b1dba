/**
 * Credential Service
 *
 * Registration, login, token verification and access-token refresh.
 * Handlers stay thin; every rule about who may hold a session lives here.
 *
 * Every login failure produces the same message, so a caller cannot tell
 * an unknown email from a wrong password or a deactivated account.
 */

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::password::{PasswordPolicy, UserAttributes};
use crate::backend::auth::sessions::{TokenIssuer, TokenKind, TokenPair};
use crate::backend::auth::users::{
    create_user, get_user_by_email, get_user_by_id, get_user_by_username, normalize_email,
    NewUser, User,
};
use crate::backend::error::BackendError;
use crate::shared::message::require_text;

/// Registration request
///
/// Fields are optional so a missing one is reported against its name.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub contact_number: Option<String>,
    /// Plain-text password, hashed before storage
    pub password: Option<String>,
    /// Must equal `password`
    pub password_confirm: Option<String>,
}

const INVALID_CREDENTIALS: &str = "Invalid login credentials.";
const INVALID_TOKEN: &str = "Given token not valid for any token type";
const DUPLICATE_EMAIL: &str = "user with this email already exists.";
const DUPLICATE_USERNAME: &str = "A user with that username already exists.";

/// Create a new account
///
/// # Errors
///
/// * `Validation` - blank required field, malformed email, mismatched
///   confirmation, weak password, or email/username already taken
///
/// Nothing is written unless every check passes.
pub async fn register(
    pool: &SqlitePool,
    policy: &PasswordPolicy,
    request: &RegisterRequest,
) -> Result<User, BackendError> {
    let email = require_text("email", request.email.as_deref())?;
    let username = require_text("username", request.username.as_deref())?.trim();
    let first_name = require_text("first_name", request.first_name.as_deref())?.trim();
    let last_name = require_text("last_name", request.last_name.as_deref())?.trim();
    let password = require_text("password", request.password.as_deref())?;
    let password_confirm = require_text("password_confirm", request.password_confirm.as_deref())?;

    let email = normalize_email(email);
    if !is_valid_email(&email) {
        return Err(BackendError::validation("email", "Enter a valid email address."));
    }

    if password != password_confirm {
        return Err(BackendError::validation("password", "Password fields didn't match."));
    }

    policy.validate(
        password,
        &UserAttributes {
            email: &email,
            username,
            first_name,
            last_name,
        },
    )?;

    if get_user_by_email(pool, &email).await?.is_some() {
        tracing::warn!("Registration rejected, email already exists: {}", email);
        return Err(BackendError::validation("email", DUPLICATE_EMAIL));
    }
    if get_user_by_username(pool, username).await?.is_some() {
        tracing::warn!("Registration rejected, username already exists: {}", username);
        return Err(BackendError::validation("username", DUPLICATE_USERNAME));
    }

    let contact_number = request
        .contact_number
        .as_deref()
        .map(str::trim)
        .filter(|number| !number.is_empty())
        .map(str::to_string);

    let new_user = NewUser {
        email: email.clone(),
        username: username.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        contact_number,
        password_hash: policy.hash(password)?,
    };

    // A concurrent registration can still win the race past the lookups above
    let user = create_user(pool, new_user).await.map_err(duplicate_or_database)?;

    tracing::info!("User registered: {} ({})", user.username, user.id);
    Ok(user)
}

/// Check an email/password pair and open a session
///
/// # Errors
///
/// * `Validation` - email or password missing
/// * `Authentication` - unknown email, wrong password or inactive account
pub async fn login(
    pool: &SqlitePool,
    tokens: &TokenIssuer,
    policy: &PasswordPolicy,
    email: Option<&str>,
    password: Option<&str>,
) -> Result<(User, TokenPair), BackendError> {
    let email = normalize_email(require_text("email", email)?);
    let password = require_text("password", password)?;

    let user = match get_user_by_email(pool, &email).await? {
        Some(user) => user,
        None => {
            policy.verify_absent(password)?;
            tracing::warn!("Login failed, no user with email: {}", email);
            return Err(BackendError::authentication(INVALID_CREDENTIALS));
        }
    };

    if !policy.verify(password, &user.password_hash)? {
        tracing::warn!("Login failed, wrong password for user: {}", user.id);
        return Err(BackendError::authentication(INVALID_CREDENTIALS));
    }

    if !user.is_active {
        tracing::warn!("Login failed, account inactive: {}", user.id);
        return Err(BackendError::authentication(INVALID_CREDENTIALS));
    }

    let pair = tokens.issue_pair(user.id, &user.email)?;
    tracing::info!("User logged in: {}", user.id);
    Ok((user, pair))
}

/// Resolve an access token to an active user
///
/// Read-only: nothing about the session or the user changes.
pub async fn verify(
    pool: &SqlitePool,
    tokens: &TokenIssuer,
    token: Option<&str>,
) -> Result<User, BackendError> {
    let token = token.ok_or_else(|| {
        BackendError::authentication("Authentication credentials were not provided.")
    })?;

    let user_id = tokens.user_id(token, TokenKind::Access).map_err(|e| {
        tracing::warn!("Rejected access token: {}", e);
        BackendError::authentication(INVALID_TOKEN)
    })?;

    active_user(pool, user_id).await
}

/// Exchange a refresh token for a fresh access token
pub async fn refresh(
    pool: &SqlitePool,
    tokens: &TokenIssuer,
    refresh_token: Option<&str>,
) -> Result<String, BackendError> {
    let refresh_token = require_text("refresh", refresh_token)?;

    let user_id = tokens.user_id(refresh_token, TokenKind::Refresh).map_err(|e| {
        tracing::warn!("Rejected refresh token: {}", e);
        BackendError::authentication(INVALID_TOKEN)
    })?;

    let user = active_user(pool, user_id).await?;
    Ok(tokens.issue(user.id, &user.email, TokenKind::Access)?)
}

async fn active_user(pool: &SqlitePool, user_id: Uuid) -> Result<User, BackendError> {
    match get_user_by_id(pool, user_id).await? {
        Some(user) if user.is_active => Ok(user),
        Some(_) => {
            tracing::warn!("Token presented for inactive user: {}", user_id);
            Err(BackendError::authentication("User is inactive"))
        }
        None => {
            tracing::warn!("Token presented for unknown user: {}", user_id);
            Err(BackendError::authentication("User not found"))
        }
    }
}

/// Map a failed user insert, naming the column a unique violation hit
///
/// SQLite reports the column as `UNIQUE constraint failed: users.<column>`.
fn duplicate_or_database(e: sqlx::Error) -> BackendError {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            if db.message().contains("users.username") {
                BackendError::validation("username", DUPLICATE_USERNAME)
            } else {
                BackendError::validation("email", DUPLICATE_EMAIL)
            }
        }
        other => BackendError::Database(other),
    }
}

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
