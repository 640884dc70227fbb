//! The object-store port used by the asset lifecycle.

use std::future::Future;
use std::time::Duration;

use asset_shared::AssetId;
use chrono::{DateTime, Utc};

use super::error::StorageError;

/// Presigned URL for upload or download.
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL.
    pub url: String,
    /// HTTP method the signature was computed for (PUT for upload, GET for download).
    pub method: String,
    /// When the URL expires.
    pub expires_at: DateTime<Utc>,
}

impl PresignedUrl {
    /// Compute the expiry instant for a URL issued now with the given TTL.
    #[must_use]
    pub fn expiry_from_now(ttl: Duration) -> DateTime<Utc> {
        let secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        chrono::Duration::try_seconds(secs)
            .and_then(|d| Utc::now().checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Issues time-limited URLs for asset payloads and answers payload questions.
///
/// Implemented by [`super::StorageService`] for real object stores. URLs are
/// opaque to callers; only their TTL is chosen by the caller.
pub trait SignedUrlIssuer: Send + Sync {
    /// Presign an upload (write) of the payload for `id`.
    fn issue_upload_url(
        &self,
        id: AssetId,
        ttl: Duration,
    ) -> impl Future<Output = Result<PresignedUrl, StorageError>> + Send;

    /// Presign a download (read) of the payload for `id`.
    fn issue_download_url(
        &self,
        id: AssetId,
        ttl: Duration,
    ) -> impl Future<Output = Result<PresignedUrl, StorageError>> + Send;

    /// Whether a payload is currently stored for `id`.
    fn payload_exists(&self, id: AssetId)
    -> impl Future<Output = Result<bool, StorageError>> + Send;

    /// Remove the payload for `id`. An absent payload is not an error.
    fn delete_payload(&self, id: AssetId) -> impl Future<Output = Result<(), StorageError>> + Send;
}
