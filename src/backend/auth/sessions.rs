/**
 * Session Management and JWT Tokens
 *
 * This module issues and validates the bearer tokens that gate every
 * authenticated endpoint. Two kinds of token share one signing key:
 *
 * - **access** tokens, short-lived, presented as `Authorization: Bearer`
 * - **refresh** tokens, long-lived, only accepted by the refresh endpoint
 *
 * A token of one kind is never accepted where the other is expected.
 */

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Which endpoint family a token is valid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Access or refresh
    pub kind: TokenKind,
    /// Unique token ID
    pub jti: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// An access token together with the refresh token issued alongside it
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Why a presented token was rejected
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("token has expired")]
    Expired,
    #[error("expected a {expected:?} token")]
    WrongKind { expected: TokenKind },
    #[error("token subject is not a user ID")]
    InvalidSubject,
    #[error("invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

/// Signs and validates session tokens
///
/// Built once at startup from configuration and shared through `AppState`.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("secret", &"[redacted]")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl TokenIssuer {
    /// Create an issuer signing with HMAC-SHA256 over `secret`
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Create a JWT token for a user
    ///
    /// # Arguments
    /// * `user_id` - User ID (UUID)
    /// * `email` - User email
    /// * `kind` - Access or refresh; selects the lifetime
    ///
    /// # Returns
    /// JWT token string
    pub fn issue(
        &self,
        user_id: Uuid,
        email: &str,
        kind: TokenKind,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            kind,
            jti: Uuid::new_v4().to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Issue an access token and a refresh token in one go
    pub fn issue_pair(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access: self.issue(user_id, email, TokenKind::Access)?,
            refresh: self.issue(user_id, email, TokenKind::Refresh)?,
        })
    }

    /// Verify and decode a JWT token of the expected kind
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, SessionError> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => SessionError::Invalid(e),
            })?;

        if token_data.claims.kind != expected {
            return Err(SessionError::WrongKind { expected });
        }

        Ok(token_data.claims)
    }

    /// Extract the user ID from a verified token
    pub fn user_id(&self, token: &str, expected: TokenKind) -> Result<Uuid, SessionError> {
        let claims = self.verify(token, expected)?;
        Uuid::parse_str(&claims.sub).map_err(|_| SessionError::InvalidSubject)
    }
}
