/**
 * Upload Authorization Handler
 *
 * `GET /imagekit-auth` returns `{token, signature, expire}` for a direct
 * browser upload. The endpoint is public, matching the frontend which
 * requests upload credentials before the user has signed in.
 */

use axum::{extract::State, response::Json};

use crate::backend::error::BackendError;
use crate::backend::uploads::bridge::UploadBridge;
use crate::backend::uploads::signer::UploadCredentials;

/// Upload credentials handler
///
/// # Errors
///
/// * `500 Internal Server Error` - signer failed and the bridge runs in strict mode
pub async fn imagekit_auth(
    State(uploads): State<UploadBridge>,
) -> Result<Json<UploadCredentials>, BackendError> {
    let credentials = uploads.get_upload_credentials().await?;
    Ok(Json(credentials))
}
