/**
 * Server Configuration
 *
 * `ServerConfig` collects everything the server reads from its environment.
 * `from_env` is what the binary uses; `from_lookup` takes any key lookup so
 * tests can feed a map instead of mutating process-wide variables.
 *
 * # Environment Variables
 *
 * | Variable                   | Default                         |
 * |----------------------------|---------------------------------|
 * | `DATABASE_URL`             | `sqlite://chatbot.db?mode=rwc`  |
 * | `SERVER_PORT`              | `3000`                          |
 * | `JWT_SECRET`               | required in release builds      |
 * | `ACCESS_TOKEN_TTL_MINUTES` | `60`                            |
 * | `REFRESH_TOKEN_TTL_DAYS`   | `1`                             |
 * | `PASSWORD_MIN_LENGTH`      | `8`                             |
 * | `IMAGEKIT_PRIVATE_KEY`     | unset                           |
 * | `UPLOAD_SIGNER_URL`        | unset                           |
 * | `UPLOAD_FALLBACK`          | `mock`                          |
 * | `CORS_ALLOWED_ORIGINS`     | unset (any origin)              |
 */

use std::str::FromStr;

use chrono::{Duration, Utc};
use thiserror::Error;

use crate::backend::auth::password::{MAX_HASH_COST, MIN_HASH_COST};
use crate::backend::uploads::UploadFallback;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://chatbot.db?mode=rwc";
pub const DEFAULT_PORT: u16 = 3000;

#[cfg(debug_assertions)]
const DEV_JWT_SECRET: &str = "insecure-development-secret";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub password_min_length: usize,
    /// bcrypt work factor
    pub password_hash_cost: u32,
    pub imagekit_private_key: Option<String>,
    pub upload_signer_url: Option<String>,
    pub upload_fallback: UploadFallback,
    /// Empty means any origin
    pub cors_allowed_origins: Vec<String>,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("database_url", &self.database_url)
            .field("port", &self.port)
            .field("jwt_secret", &"[redacted]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("password_min_length", &self.password_min_length)
            .field("password_hash_cost", &self.password_hash_cost)
            .field("imagekit_private_key", &self.imagekit_private_key.as_ref().map(|_| "[redacted]"))
            .field("upload_signer_url", &self.upload_signer_url)
            .field("upload_fallback", &self.upload_fallback)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut builder = Self::builder();

        if let Some(url) = get("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(port) = get("SERVER_PORT") {
            builder = builder.port(parse("SERVER_PORT", &port)?);
        }
        if let Some(secret) = get("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(minutes) = get("ACCESS_TOKEN_TTL_MINUTES") {
            let minutes = parse("ACCESS_TOKEN_TTL_MINUTES", &minutes)?;
            builder = builder.access_token_ttl(
                Duration::try_minutes(minutes)
                    .ok_or_else(|| out_of_range("ACCESS_TOKEN_TTL_MINUTES"))?,
            );
        }
        if let Some(days) = get("REFRESH_TOKEN_TTL_DAYS") {
            let days = parse("REFRESH_TOKEN_TTL_DAYS", &days)?;
            builder = builder.refresh_token_ttl(
                Duration::try_days(days).ok_or_else(|| out_of_range("REFRESH_TOKEN_TTL_DAYS"))?,
            );
        }
        if let Some(length) = get("PASSWORD_MIN_LENGTH") {
            builder = builder.password_min_length(parse("PASSWORD_MIN_LENGTH", &length)?);
        }
        if let Some(key) = get("IMAGEKIT_PRIVATE_KEY") {
            builder = builder.imagekit_private_key(key);
        }
        if let Some(url) = get("UPLOAD_SIGNER_URL") {
            builder = builder.upload_signer_url(url);
        }
        if let Some(fallback) = get("UPLOAD_FALLBACK") {
            builder = builder.upload_fallback(parse("UPLOAD_FALLBACK", &fallback)?);
        }
        if let Some(origins) = get("CORS_ALLOWED_ORIGINS") {
            builder = builder.cors_allowed_origins(
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect(),
            );
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        for (key, ttl) in [
            ("ACCESS_TOKEN_TTL_MINUTES", self.access_token_ttl),
            ("REFRESH_TOKEN_TTL_DAYS", self.refresh_token_ttl),
        ] {
            if Utc::now().checked_add_signed(ttl).is_none() {
                return Err(out_of_range(key));
            }
        }
        if self.access_token_ttl <= Duration::zero() {
            return Err(ConfigError::InvalidValue {
                key: "ACCESS_TOKEN_TTL_MINUTES",
                message: "must be positive".to_string(),
            });
        }
        if self.refresh_token_ttl <= Duration::zero() {
            return Err(ConfigError::InvalidValue {
                key: "REFRESH_TOKEN_TTL_DAYS",
                message: "must be positive".to_string(),
            });
        }
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&self.password_hash_cost) {
            return Err(ConfigError::InvalidValue {
                key: "password_hash_cost",
                message: format!(
                    "must be between {} and {}",
                    MIN_HASH_COST,
                    MAX_HASH_COST
                ),
            });
        }
        Ok(())
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| ConfigError::InvalidValue {
        key,
        message: e.to_string(),
    })
}

fn out_of_range(key: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        message: "duration out of range".to_string(),
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    database_url: Option<String>,
    port: Option<u16>,
    jwt_secret: Option<String>,
    access_token_ttl: Option<Duration>,
    refresh_token_ttl: Option<Duration>,
    password_min_length: Option<usize>,
    password_hash_cost: Option<u32>,
    imagekit_private_key: Option<String>,
    upload_signer_url: Option<String>,
    upload_fallback: Option<UploadFallback>,
    cors_allowed_origins: Vec<String>,
}

impl ServerConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = Some(ttl);
        self
    }

    pub fn refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = Some(ttl);
        self
    }

    pub fn password_min_length(mut self, length: usize) -> Self {
        self.password_min_length = Some(length);
        self
    }

    pub fn password_hash_cost(mut self, cost: u32) -> Self {
        self.password_hash_cost = Some(cost);
        self
    }

    pub fn imagekit_private_key(mut self, key: impl Into<String>) -> Self {
        self.imagekit_private_key = Some(key.into());
        self
    }

    pub fn upload_signer_url(mut self, url: impl Into<String>) -> Self {
        self.upload_signer_url = Some(url.into());
        self
    }

    pub fn upload_fallback(mut self, fallback: UploadFallback) -> Self {
        self.upload_fallback = Some(fallback);
        self
    }

    pub fn cors_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_allowed_origins = origins;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let jwt_secret = match self.jwt_secret {
            Some(secret) => secret,
            None => default_jwt_secret()?,
        };

        let config = ServerConfig {
            database_url: self
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            port: self.port.unwrap_or(DEFAULT_PORT),
            jwt_secret,
            access_token_ttl: self.access_token_ttl.unwrap_or_else(|| Duration::minutes(60)),
            refresh_token_ttl: self.refresh_token_ttl.unwrap_or_else(|| Duration::days(1)),
            password_min_length: self.password_min_length.unwrap_or(8),
            password_hash_cost: self.password_hash_cost.unwrap_or(bcrypt::DEFAULT_COST),
            imagekit_private_key: self.imagekit_private_key,
            upload_signer_url: self.upload_signer_url,
            upload_fallback: self.upload_fallback.unwrap_or_default(),
            cors_allowed_origins: self.cors_allowed_origins,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(debug_assertions)]
fn default_jwt_secret() -> Result<String, ConfigError> {
    tracing::warn!("JWT_SECRET not set, using an insecure development secret");
    Ok(DEV_JWT_SECRET.to_string())
}

#[cfg(not(debug_assertions))]
fn default_jwt_secret() -> Result<String, ConfigError> {
    Err(ConfigError::MissingValue("JWT_SECRET"))
}
