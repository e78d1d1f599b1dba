//! Fixtures for in-crate unit tests

use chrono::Duration;
use sqlx::SqlitePool;

use crate::backend::auth::password::{PasswordPolicy, MIN_HASH_COST};
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::auth::users::{create_user, NewUser, User};
use crate::backend::server::init::connect_database;

/// A fresh, migrated in-memory database
pub async fn memory_pool() -> SqlitePool {
    connect_database("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database")
}

pub fn test_issuer() -> TokenIssuer {
    TokenIssuer::new("test-secret", Duration::minutes(60), Duration::days(1))
}

/// Standard validators with the cheapest bcrypt cost
pub fn test_policy() -> PasswordPolicy {
    PasswordPolicy::standard(8, MIN_HASH_COST)
}

/// Insert a user directly, bypassing registration checks
pub async fn insert_user(pool: &SqlitePool, username: &str) -> User {
    create_user(
        pool,
        NewUser {
            email: format!("{}@example.com", username),
            username: username.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            contact_number: None,
            password_hash: bcrypt::hash("secret123!", MIN_HASH_COST)
                .expect("Failed to hash password"),
        },
    )
    .await
    .expect("Failed to create test user")
}
