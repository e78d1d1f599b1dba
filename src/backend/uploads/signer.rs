/**
 * Upload Signers
 *
 * An `UploadSigner` produces the `{token, signature, expire}` triple a
 * browser needs to upload a file straight to ImageKit. Three
 * implementations exist:
 *
 * - `ImageKitSigner` signs locally with the account's private key
 * - `HttpSigner` asks a remote signing service for the triple
 * - `UnconfiguredSigner` always fails; the bridge's fallback policy
 *   decides what the client sees
 */

use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use thiserror::Error;
use uuid::Uuid;

/// How long ImageKit credentials stay valid, in seconds
pub const IMAGEKIT_EXPIRE_SECONDS: i64 = 2400;

/// Client-upload authentication parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadCredentials {
    pub token: String,
    pub signature: String,
    /// Unix timestamp after which the signature is rejected
    pub expire: i64,
}

/// Why a signer could not produce credentials
#[derive(Debug, Error)]
pub enum SignerError {
    #[error("upload signer is not configured: {0}")]
    Misconfigured(String),
    #[error("upload signer unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),
    #[error("upload signer returned status {0}")]
    Status(u16),
}

/// Source of upload credentials
#[async_trait]
pub trait UploadSigner: Send + Sync + 'static {
    async fn authentication_parameters(&self) -> Result<UploadCredentials, SignerError>;
}

/// Signs ImageKit upload parameters with the account's private key
pub struct ImageKitSigner {
    private_key: String,
}

impl std::fmt::Debug for ImageKitSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageKitSigner")
            .field("private_key", &"[redacted]")
            .finish()
    }
}

impl ImageKitSigner {
    /// Fails with `Misconfigured` when the key is blank
    pub fn new(private_key: impl Into<String>) -> Result<Self, SignerError> {
        let private_key = private_key.into();
        if private_key.trim().is_empty() {
            return Err(SignerError::Misconfigured(
                "IMAGEKIT_PRIVATE_KEY is empty".to_string(),
            ));
        }
        Ok(Self { private_key })
    }

    /// Sign a specific token/expiry pair
    pub fn sign(&self, token: &str, expire: i64) -> Result<String, SignerError> {
        hmac_sha1_hex(
            self.private_key.as_bytes(),
            format!("{}{}", token, expire).as_bytes(),
        )
    }
}

#[async_trait]
impl UploadSigner for ImageKitSigner {
    async fn authentication_parameters(&self) -> Result<UploadCredentials, SignerError> {
        let token = Uuid::new_v4().to_string();
        let expire = Utc::now().timestamp() + IMAGEKIT_EXPIRE_SECONDS;
        let signature = self.sign(&token, expire)?;
        Ok(UploadCredentials {
            token,
            signature,
            expire,
        })
    }
}

/// Lowercase hex HMAC-SHA1
fn hmac_sha1_hex(key: &[u8], data: &[u8]) -> Result<String, SignerError> {
    let mut mac = Hmac::<Sha1>::new_from_slice(key)
        .map_err(|e| SignerError::Misconfigured(e.to_string()))?;
    mac.update(data);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Fetches credentials from a remote signing endpoint
///
/// The endpoint must answer `GET` with a JSON `{token, signature, expire}`.
#[derive(Debug, Clone)]
pub struct HttpSigner {
    client: reqwest::Client,
    url: String,
}

impl HttpSigner {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl UploadSigner for HttpSigner {
    async fn authentication_parameters(&self) -> Result<UploadCredentials, SignerError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SignerError::Status(status.as_u16()));
        }
        Ok(response.json::<UploadCredentials>().await?)
    }
}

/// Used when no signer is configured
#[derive(Debug, Clone, Default)]
pub struct UnconfiguredSigner;

#[async_trait]
impl UploadSigner for UnconfiguredSigner {
    async fn authentication_parameters(&self) -> Result<UploadCredentials, SignerError> {
        Err(SignerError::Misconfigured(
            "no upload signer configured".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_hmac_sha1_known_vector() {
        // RFC 2202 test case 2
        let digest = hmac_sha1_hex(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(digest, "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79");
    }

    #[test]
    fn test_imagekit_signer_rejects_blank_key() {
        assert!(matches!(
            ImageKitSigner::new("  "),
            Err(SignerError::Misconfigured(_))
        ));
    }

    #[tokio::test]
    async fn test_imagekit_parameters() {
        let signer = ImageKitSigner::new("private_key_test").unwrap();
        let before = Utc::now().timestamp();
        let credentials = signer.authentication_parameters().await.unwrap();

        assert!(Uuid::parse_str(&credentials.token).is_ok());
        assert!(credentials.expire >= before + IMAGEKIT_EXPIRE_SECONDS);
        assert!(credentials.expire <= Utc::now().timestamp() + IMAGEKIT_EXPIRE_SECONDS);
        assert_eq!(credentials.signature.len(), 40);
        assert_eq!(
            credentials.signature,
            signer.sign(&credentials.token, credentials.expire).unwrap()
        );
    }

    #[tokio::test]
    async fn test_unconfigured_signer_fails() {
        assert!(UnconfiguredSigner.authentication_parameters().await.is_err());
    }

    #[tokio::test]
    async fn test_http_signer_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sign"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "remote-token",
                "signature": "remote-signature",
                "expire": 1900000000
            })))
            .mount(&server)
            .await;

        let signer = HttpSigner::new(format!("{}/sign", server.uri()));
        let credentials = signer.authentication_parameters().await.unwrap();
        assert_eq!(
            credentials,
            UploadCredentials {
                token: "remote-token".to_string(),
                signature: "remote-signature".to_string(),
                expire: 1900000000,
            }
        );
    }

    #[tokio::test]
    async fn test_http_signer_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let signer = HttpSigner::new(format!("{}/sign", server.uri()));
        assert!(matches!(
            signer.authentication_parameters().await,
            Err(SignerError::Status(502))
        ));
    }
}
