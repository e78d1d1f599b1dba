//! Authentication API integration tests
//!
//! Register, login, verify and refresh through the full router.

#![cfg(feature = "ssr")]

mod common;

use axum::http::StatusCode;
use chatbot_server::backend::auth::users::set_user_active;
use chatbot_server::backend::auth::TokenKind;
use common::*;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_register_returns_user_and_tokens() {
    let app = TestApp::new().await;

    let response = app
        .post("/auth/register", None, registration_body("a@x.io", "alice"))
        .await;

    assert_status!(response, StatusCode::CREATED);
    let user = &response.body["user"];
    assert_eq!(user["email"], "a@x.io");
    assert_eq!(user["username"], "alice");
    assert_eq!(user["first_name"], "Test");
    assert_eq!(user["last_name"], "User");
    assert!(user["date_joined"].is_string());
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());
    assert!(response.body["token"].is_string());
    assert!(response.body["refresh"].is_string());
}

#[tokio::test]
async fn test_register_trailing_slash() {
    let app = TestApp::new().await;
    let response = app
        .post("/auth/register/", None, registration_body("a@x.io", "alice"))
        .await;
    assert_status!(response, StatusCode::CREATED);
}

#[tokio::test]
async fn test_register_mismatched_passwords() {
    let app = TestApp::new().await;
    let mut body = registration_body("a@x.io", "alice");
    body["password_confirm"] = json!("something-else!");

    let response = app.post("/auth/register", None, body).await;
    assert_field_error!(response, StatusCode::BAD_REQUEST, "password");
    assert_eq!(response.body["error"], "Password fields didn't match.");

    // nothing was written, so the same email can still register
    register_user(&app, "a@x.io", "alice").await;
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let app = TestApp::new().await;
    let mut body = registration_body("a@x.io", "alice");
    body["password"] = json!("12345678");
    body["password_confirm"] = json!("12345678");

    let response = app.post("/auth/register", None, body).await;
    assert_field_error!(response, StatusCode::BAD_REQUEST, "password");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new().await;
    register_user(&app, "a@x.io", "alice").await;

    let response = app
        .post("/auth/register", None, registration_body("a@x.io", "alice2"))
        .await;
    assert_field_error!(response, StatusCode::BAD_REQUEST, "email");
}

#[tokio::test]
async fn test_register_missing_field() {
    let app = TestApp::new().await;
    let response = app
        .post(
            "/auth/register",
            None,
            json!({ "email": "a@x.io", "password": "secret123!", "password_confirm": "secret123!" }),
        )
        .await;
    assert_field_error!(response, StatusCode::BAD_REQUEST, "username");
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    let registered = register_user(&app, "a@x.io", "alice").await;

    let response = app
        .post(
            "/auth/login",
            None,
            json!({ "email": "a@x.io", "password": TEST_PASSWORD }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["user"]["id"], registered.id.to_string());
    let token = response.body["token"].as_str().unwrap();
    assert_eq!(
        app.tokens.user_id(token, TokenKind::Access).unwrap(),
        registered.id
    );
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email() {
    let app = TestApp::new().await;
    register_user(&app, "a@x.io", "alice").await;

    let wrong = app
        .post("/auth/login", None, json!({ "email": "a@x.io", "password": "wrong" }))
        .await;
    assert_status!(wrong, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["error"], "Invalid login credentials.");

    let unknown = app
        .post(
            "/auth/login",
            None,
            json!({ "email": "nobody@x.io", "password": TEST_PASSWORD }),
        )
        .await;
    assert_status!(unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body, wrong.body);
}

#[tokio::test]
async fn test_login_malformed_body() {
    let app = TestApp::new().await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"email\": "))
        .unwrap();
    let response = app.send(request).await;
    assert_field_error!(response, StatusCode::BAD_REQUEST, "body");

    let missing = app.post("/auth/login", None, json!({ "email": "a@x.io" })).await;
    assert_field_error!(missing, StatusCode::BAD_REQUEST, "password");
}

#[tokio::test]
async fn test_verify() {
    let app = TestApp::new().await;
    let user = register_user(&app, "a@x.io", "alice").await;

    let response = app.get("/auth/verify", Some(&user.token)).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["id"], user.id.to_string());
    assert_eq!(response.body["email"], "a@x.io");

    assert_status!(app.get("/auth/verify", None).await, StatusCode::UNAUTHORIZED);
    assert_status!(
        app.get("/auth/verify", Some("not-a-token")).await,
        StatusCode::UNAUTHORIZED
    );
    // a refresh token is not an access token
    assert_status!(
        app.get("/auth/verify", Some(&user.refresh)).await,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_verify_token_for_missing_user() {
    let app = TestApp::new().await;
    let token = app
        .tokens
        .issue(Uuid::new_v4(), "ghost@x.io", TokenKind::Access)
        .unwrap();
    assert_status!(app.get("/auth/verify", Some(&token)).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh() {
    let app = TestApp::new().await;
    let user = register_user(&app, "a@x.io", "alice").await;

    let response = app
        .post("/auth/token/refresh", None, json!({ "refresh": user.refresh }))
        .await;
    assert_status!(response, StatusCode::OK);
    let token = response.body["token"].as_str().unwrap();
    assert_status!(app.get("/auth/verify", Some(token)).await, StatusCode::OK);

    let rejected = app
        .post("/auth/token/refresh", None, json!({ "refresh": user.token }))
        .await;
    assert_status!(rejected, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deactivated_user_is_locked_out() {
    let app = TestApp::new().await;
    let user = register_user(&app, "a@x.io", "alice").await;
    set_user_active(&app.pool, user.id, false).await.unwrap();

    assert_status!(
        app.get("/auth/verify", Some(&user.token)).await,
        StatusCode::UNAUTHORIZED
    );
    assert_status!(app.get("/chats", Some(&user.token)).await, StatusCode::UNAUTHORIZED);
    assert_status!(
        app.post(
            "/auth/login",
            None,
            json!({ "email": "a@x.io", "password": TEST_PASSWORD })
        )
        .await,
        StatusCode::UNAUTHORIZED
    );
}
