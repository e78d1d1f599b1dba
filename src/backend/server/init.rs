/**
 * Server Initialization
 *
 * Turns a `ServerConfig` into a ready-to-serve `Router`.
 *
 * # Initialization Process
 *
 * 1. Connect to SQLite and run migrations
 * 2. Build the token issuer and password policy
 * 3. Pick an upload signer and wrap it in the bridge
 * 4. Create the router with CORS applied
 *
 * Unlike request-time failures, anything that goes wrong here stops
 * startup: a server without its database or signing key cannot do
 * anything useful.
 */

use std::str::FromStr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};

use crate::backend::auth::password::PasswordPolicy;
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{ConfigError, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::uploads::{
    HttpSigner, ImageKitSigner, SignerError, UnconfiguredSigner, UploadBridge, UploadSigner,
};

/// Reasons the server could not start
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("upload signer error: {0}")]
    Signer(#[from] SignerError),
    #[error("invalid CORS origin: {0}")]
    CorsOrigin(String),
}

/// Open a connection pool and bring the schema up to date
///
/// In-memory databases live only as long as their connection, so they get a
/// single connection that is never recycled.
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, StartupError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .foreign_keys(true)
        .create_if_missing(true);

    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    tracing::info!("Connecting to database...");
    let pool = pool_options.connect_with(options).await?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}

/// Choose the upload signer the configuration asks for
///
/// A remote signer URL wins over a local ImageKit key; with neither, every
/// request falls through to the bridge's fallback policy.
pub fn build_upload_bridge(config: &ServerConfig) -> Result<UploadBridge, StartupError> {
    let signer: Arc<dyn UploadSigner> = if let Some(url) = &config.upload_signer_url {
        tracing::info!("Upload credentials signed remotely by {}", url);
        Arc::new(HttpSigner::new(url.clone()))
    } else if let Some(key) = &config.imagekit_private_key {
        tracing::info!("Upload credentials signed locally with the ImageKit key");
        Arc::new(ImageKitSigner::new(key.clone())?)
    } else {
        tracing::warn!("No upload signer configured");
        Arc::new(UnconfiguredSigner)
    };

    Ok(UploadBridge::new(signer, config.upload_fallback))
}

/// CORS policy for the browser frontend
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, StartupError> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| StartupError::CorsOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(layer.allow_origin(origins))
}

/// Create and configure the Axum application
pub async fn create_app(config: &ServerConfig) -> Result<Router, StartupError> {
    tracing::info!("Initializing chatbot backend server");

    let db_pool = connect_database(&config.database_url).await?;
    let tokens = TokenIssuer::new(
        &config.jwt_secret,
        config.access_token_ttl,
        config.refresh_token_ttl,
    );
    let passwords = PasswordPolicy::standard(config.password_min_length, config.password_hash_cost);
    let uploads = build_upload_bridge(config)?;

    let app_state = AppState::new(db_pool, tokens, passwords, uploads);
    let app = create_router(app_state).layer(cors_layer(&config.cors_allowed_origins)?);

    tracing::info!("Router configured");
    Ok(app)
}
