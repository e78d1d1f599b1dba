/**
 * User Model and Database Operations
 *
 * The identity store: user records keyed by a unique email address.
 * Nothing in here hashes or checks passwords; callers hand in an
 * already-hashed credential.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Login email, unique across all users
    pub email: String,
    /// Username (unique)
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub contact_number: Option<String>,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Inactive accounts cannot log in and their tokens stop resolving
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    /// Date joined
    pub created_at: DateTime<Utc>,
}

/// Fields needed to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub contact_number: Option<String>,
    pub password_hash: String,
}

const USER_COLUMNS: &str = "id, email, username, first_name, last_name, contact_number, \
     password_hash, is_active, is_staff, is_superuser, created_at";

/// Normalize an email address by lowercasing its domain part
///
/// The local part is left alone; some mail servers treat it as case-sensitive.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `new_user` - Profile fields and password hash
///
/// # Returns
/// Created user or error. A duplicate email or username surfaces as a
/// unique-violation database error.
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (id, email, username, first_name, last_name, contact_number,
                           password_hash, is_active, is_staff, is_superuser, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, 1, 0, 0, ?)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&new_user.email)
    .bind(&new_user.username)
    .bind(&new_user.first_name)
    .bind(&new_user.last_name)
    .bind(&new_user.contact_number)
    .bind(&new_user.password_hash)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by email
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by username
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by ID
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Activate or deactivate an account
///
/// Deactivation is how sessions are revoked: tokens keep their signature
/// but stop resolving to a usable identity.
///
/// # Returns
/// Updated user or `RowNotFound`
pub async fn set_user_active(
    pool: &SqlitePool,
    user_id: Uuid,
    active: bool,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET is_active = ? WHERE id = ? RETURNING {USER_COLUMNS}"
    ))
    .bind(active)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(user)
}
