/**
 * Upload Authorization Bridge
 *
 * Wraps an `UploadSigner` and applies the configured failure policy.
 * With `UploadFallback::Mock` a failing signer yields fixed placeholder
 * credentials so the frontend keeps working in development; with
 * `UploadFallback::Strict` the failure reaches the client as a 500.
 */

use std::str::FromStr;
use std::sync::Arc;

use crate::backend::error::BackendError;
use crate::backend::uploads::signer::{UploadCredentials, UploadSigner};

/// What to do when the signer fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadFallback {
    /// Log a warning and return placeholder credentials
    #[default]
    Mock,
    /// Report the failure to the client
    Strict,
}

impl FromStr for UploadFallback {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "strict" => Ok(Self::Strict),
            other => Err(format!("expected 'mock' or 'strict', got '{}'", other)),
        }
    }
}

/// Hands out upload credentials on behalf of the configured signer
#[derive(Clone)]
pub struct UploadBridge {
    signer: Arc<dyn UploadSigner>,
    fallback: UploadFallback,
}

impl std::fmt::Debug for UploadBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadBridge")
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

impl UploadBridge {
    pub fn new(signer: Arc<dyn UploadSigner>, fallback: UploadFallback) -> Self {
        Self { signer, fallback }
    }

    pub fn fallback(&self) -> UploadFallback {
        self.fallback
    }

    /// The placeholder triple returned in mock mode
    pub fn mock_credentials() -> UploadCredentials {
        UploadCredentials {
            token: "mock_token".to_string(),
            signature: "mock_signature".to_string(),
            expire: 1234567890,
        }
    }

    /// Ask the signer for credentials, applying the fallback policy on failure
    pub async fn get_upload_credentials(&self) -> Result<UploadCredentials, BackendError> {
        match self.signer.authentication_parameters().await {
            Ok(credentials) => Ok(credentials),
            Err(e) => match self.fallback {
                UploadFallback::Mock => {
                    tracing::warn!("Upload signer failed, returning mock credentials: {}", e);
                    Ok(Self::mock_credentials())
                }
                UploadFallback::Strict => {
                    tracing::error!("Upload signer failed: {}", e);
                    Err(BackendError::upstream(e.to_string()))
                }
            },
        }
    }
}
