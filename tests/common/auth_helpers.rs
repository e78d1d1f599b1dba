//! Authentication test helpers

use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::app::TestApp;

pub const TEST_PASSWORD: &str = "secret123!";

/// A user registered through the API
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub token: String,
    pub refresh: String,
}

/// Registration body with the standard test password
pub fn registration_body(email: &str, username: &str) -> Value {
    json!({
        "email": email,
        "username": username,
        "first_name": "Test",
        "last_name": "User",
        "password": TEST_PASSWORD,
        "password_confirm": TEST_PASSWORD,
    })
}

/// Register a user through `POST /auth/register`
pub async fn register_user(app: &TestApp, email: &str, username: &str) -> TestUser {
    let response = app
        .post("/auth/register", None, registration_body(email, username))
        .await;
    assert_eq!(
        response.status,
        StatusCode::CREATED,
        "registration failed: {}",
        response.body
    );

    TestUser {
        id: response.body["user"]["id"]
            .as_str()
            .and_then(|id| Uuid::parse_str(id).ok())
            .expect("user id missing from registration response"),
        email: email.to_string(),
        token: response.body["token"]
            .as_str()
            .expect("token missing")
            .to_string(),
        refresh: response.body["refresh"]
            .as_str()
            .expect("refresh token missing")
            .to_string(),
    }
}

/// Register a user with a random email and username
pub async fn register_unique_user(app: &TestApp) -> TestUser {
    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("user_{}", &suffix[..12]);
    register_user(app, &format!("{}@example.com", username), &username).await
}
