//! JSON body extractor with the crate's error format
//!
//! `axum::Json` rejects malformed bodies with a plain-text response; `ApiJson`
//! turns the same rejection into a `BackendError` so clients always get the
//! `{"error", "status", "field"}` shape.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::backend::error::BackendError;

/// JSON request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> BackendError {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    BackendError::validation("body", rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use crate::shared::CreateChatRequest;

    fn json_request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/chats")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let ApiJson(request) =
            ApiJson::<CreateChatRequest>::from_request(json_request(r#"{"initial_message":"Hi"}"#), &())
                .await
                .unwrap();
        assert_eq!(request.initial_message.as_deref(), Some("Hi"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_validation_error() {
        let result =
            ApiJson::<CreateChatRequest>::from_request(json_request("{not json"), &()).await;
        match result {
            Err(BackendError::Validation { field, .. }) => assert_eq!(field, "body"),
            other => panic!("Expected validation error, got {:?}", other.map(|_| ())),
        }
    }
}
