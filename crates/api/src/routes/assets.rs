//! Asset lifecycle routes.
//!
//! `POST /asset`, then `PUT`/`GET`/`DELETE` on `/asset/{id}`. Error bodies are
//! always `{"error": <message>}`; only a missing asset answers 404.

use asset_core::asset::{AssetError, AssetRepository};
use asset_core::storage::SignedUrlIssuer;
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{post, put},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, info};

use crate::AppState;

/// Creates the asset routes.
pub fn routes<R, S>() -> Router<AppState<R, S>>
where
    R: AssetRepository + 'static,
    S: SignedUrlIssuer + 'static,
{
    Router::new().route("/asset", post(create_asset::<R, S>)).route(
        "/asset/{id}",
        put(complete_upload::<R, S>)
            .get(get_asset::<R, S>)
            .delete(delete_asset::<R, S>),
    )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response for a newly created asset.
#[derive(Debug, Serialize)]
pub struct CreateAssetResponse {
    /// Asset ID.
    pub id: String,
    /// Presigned upload URL.
    pub upload_url: String,
}

/// Request body for marking an upload as completed.
#[derive(Debug, Deserialize)]
pub struct UpdateAssetRequest {
    /// Declared status; only `uploaded` is accepted.
    #[serde(rename = "Status")]
    pub status: Option<String>,
}

/// Query parameters for a download URL request.
#[derive(Debug, Deserialize)]
pub struct GetAssetQuery {
    /// Download URL lifetime in seconds.
    pub timeout: Option<String>,
}

/// Response for a download URL request.
#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    /// Presigned download URL.
    #[serde(rename = "Download_url")]
    pub download_url: String,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Render a lifecycle error as `{"error": message}`.
///
/// Store failures are logged and masked.
fn error_response(err: &AssetError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = if err.is_internal() {
        error!(error = %err, code = err.error_code(), "Asset operation failed");
        "An error occurred".to_string()
    } else {
        debug!(error = %err, code = err.error_code(), "Asset request rejected");
        err.to_string()
    };

    (status, Json(json!({ "error": message }))).into_response()
}

fn empty_ok() -> Response {
    (StatusCode::OK, Json(json!({}))).into_response()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/asset`
/// Create an asset record and presign its upload.
async fn create_asset<R, S>(State(state): State<AppState<R, S>>) -> Response
where
    R: AssetRepository + 'static,
    S: SignedUrlIssuer + 'static,
{
    match state.assets.create().await {
        Ok(created) => {
            info!(asset_id = %created.id, expires_at = %created.expires_at, "Upload URL issued");
            let response = CreateAssetResponse {
                id: created.id.to_string(),
                upload_url: created.upload_url,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// PUT `/asset/{id}`
/// Mark the upload as completed. Any unreadable body counts as a bad request.
async fn complete_upload<R, S>(
    State(state): State<AppState<R, S>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateAssetRequest>, JsonRejection>,
) -> Response
where
    R: AssetRepository + 'static,
    S: SignedUrlIssuer + 'static,
{
    let declared = match &payload {
        Ok(Json(body)) => body.status.as_deref(),
        Err(rejection) => {
            debug!(asset_id = %id, error = %rejection, "Unreadable completion body");
            None
        }
    };

    match state.assets.complete(&id, declared).await {
        Ok(()) => empty_ok(),
        Err(e) => error_response(&e),
    }
}

/// GET `/asset/{id}?timeout=N`
/// Presign a download of an uploaded asset.
async fn get_asset<R, S>(
    State(state): State<AppState<R, S>>,
    Path(id): Path<String>,
    query: Result<Query<GetAssetQuery>, QueryRejection>,
) -> Response
where
    R: AssetRepository + 'static,
    S: SignedUrlIssuer + 'static,
{
    let Ok(Query(query)) = query else {
        return error_response(&AssetError::InvalidTimeout);
    };

    match state.assets.get(&id, query.timeout.as_deref()).await {
        Ok(link) => {
            info!(asset_id = %id, expires_at = %link.expires_at, "Download URL issued");
            let response = DownloadResponse {
                download_url: link.download_url,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// DELETE `/asset/{id}`
/// Remove an asset. Succeeds whether or not it existed.
async fn delete_asset<R, S>(State(state): State<AppState<R, S>>, Path(id): Path<String>) -> Response
where
    R: AssetRepository + 'static,
    S: SignedUrlIssuer + 'static,
{
    match state.assets.delete(&id).await {
        Ok(()) => empty_ok(),
        Err(e) => error_response(&e),
    }
}
