//! Test application fixture
//!
//! Builds the real router over a fresh in-memory SQLite database. Each
//! `TestApp` owns its own database, so tests never see each other's data.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use chatbot_server::backend::auth::password::MIN_HASH_COST;
use chatbot_server::backend::auth::{PasswordPolicy, TokenIssuer};
use chatbot_server::backend::routes::create_router;
use chatbot_server::backend::server::{connect_database, AppState};
use chatbot_server::backend::uploads::{UnconfiguredSigner, UploadBridge, UploadFallback};

pub const TEST_SECRET: &str = "integration-test-secret";

/// A status code and the decoded JSON body (`Null` when empty)
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub struct TestApp {
    router: Router,
    pub pool: SqlitePool,
    pub tokens: Arc<TokenIssuer>,
}

impl TestApp {
    /// App with no upload signer and the mock fallback
    pub async fn new() -> Self {
        Self::with_uploads(UploadBridge::new(
            Arc::new(UnconfiguredSigner),
            UploadFallback::Mock,
        ))
        .await
    }

    pub async fn with_uploads(uploads: UploadBridge) -> Self {
        let pool = connect_database("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        let tokens = TokenIssuer::new(TEST_SECRET, Duration::minutes(60), Duration::days(1));
        let passwords = PasswordPolicy::standard(8, MIN_HASH_COST);

        let state = AppState::new(pool.clone(), tokens, passwords, uploads);
        let tokens = state.tokens.clone();

        Self {
            router: create_router(state),
            pool,
            tokens,
        }
    }

    /// Send one request through the router
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(request).await
    }

    /// Send a prebuilt request, e.g. one with a raw body
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }
}
