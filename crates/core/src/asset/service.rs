//! Asset lifecycle service implementation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use asset_shared::{AssetConfig, AssetId};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::error::AssetError;
use super::types::{Asset, AssetStatus, CreatedAsset, DownloadLink};
use super::validation::{parse_asset_id, parse_timeout, validate_declared_status};
use crate::storage::SignedUrlIssuer;

/// Outcome of a conditional status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The record matched the expected state and was updated.
    Applied,
    /// The record was absent or no longer in the expected state.
    ConditionFailed,
}

/// Repository trait for asset record persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait AssetRepository: Send + Sync {
    /// Insert a new asset record.
    fn create(&self, asset: Asset) -> impl Future<Output = Result<(), AssetError>> + Send;

    /// Find asset by ID.
    fn find_by_id(
        &self,
        id: AssetId,
    ) -> impl Future<Output = Result<Option<Asset>, AssetError>> + Send;

    /// Set `status` and `updated_at`, but only if the record exists and is
    /// still in `expected` status. Must be atomic with respect to other
    /// callers.
    fn update_status(
        &self,
        id: AssetId,
        expected: AssetStatus,
        status: AssetStatus,
        updated_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<UpdateOutcome, AssetError>> + Send;

    /// Delete asset by ID. Deleting an absent record succeeds.
    fn delete(&self, id: AssetId) -> impl Future<Output = Result<(), AssetError>> + Send;
}

/// Asset lifecycle service.
pub struct AssetService<R: AssetRepository, S: SignedUrlIssuer> {
    repo: Arc<R>,
    issuer: Arc<S>,
    upload_ttl: Duration,
    download_ttl: Duration,
}

impl<R: AssetRepository, S: SignedUrlIssuer> AssetService<R, S> {
    /// Create a new asset service with the default URL lifetimes.
    #[must_use]
    pub fn new(repo: Arc<R>, issuer: Arc<S>) -> Self {
        Self::with_config(repo, issuer, AssetConfig::default())
    }

    /// Create a new asset service with configured URL lifetimes.
    #[must_use]
    pub fn with_config(repo: Arc<R>, issuer: Arc<S>, config: AssetConfig) -> Self {
        Self {
            repo,
            issuer,
            upload_ttl: Duration::from_secs(config.upload_ttl_secs),
            download_ttl: Duration::from_secs(config.download_ttl_secs),
        }
    }

    /// Create a new asset and presign its upload.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written or the upload URL
    /// cannot be issued. A record written before a presign failure is left
    /// in place.
    pub async fn create(&self) -> Result<CreatedAsset, AssetError> {
        let asset = Asset::new(Utc::now());
        self.repo.create(asset).await?;
        debug!(asset_id = %asset.id, "Initialized asset");

        let presigned = self
            .issuer
            .issue_upload_url(asset.id, self.upload_ttl)
            .await?;

        info!(asset_id = %asset.id, method = %presigned.method, "Asset created");

        Ok(CreatedAsset {
            id: asset.id,
            upload_url: presigned.url,
            expires_at: presigned.expires_at,
        })
    }

    /// Mark the upload of an asset as completed.
    ///
    /// Steps, each a possible exit:
    /// 1. the declared status must be `uploaded`
    /// 2. the payload must exist in the object store
    /// 3. the record must exist
    /// 4. the record must not already be `uploaded`
    /// 5. the conditional update must still match the record
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the declared status is not `uploaded`
    /// - `NotUploaded` if no payload is present
    /// - `NotFound` if the record is absent or vanished/changed before the update
    /// - `AlreadyCompleted` if the record is already `uploaded`
    pub async fn complete(&self, id: &str, declared: Option<&str>) -> Result<(), AssetError> {
        validate_declared_status(declared)?;
        let asset_id = parse_asset_id(id)?;

        if !self.issuer.payload_exists(asset_id).await? {
            return Err(AssetError::not_uploaded(id));
        }

        let asset = self
            .repo
            .find_by_id(asset_id)
            .await?
            .ok_or_else(|| AssetError::not_found(id))?;

        if !asset.status.can_transition_to(AssetStatus::Uploaded) {
            return Err(AssetError::already_completed(id));
        }

        let now = Utc::now().max(asset.updated_at);
        match self
            .repo
            .update_status(asset_id, asset.status, AssetStatus::Uploaded, now)
            .await?
        {
            UpdateOutcome::Applied => {
                info!(asset_id = %asset_id, "Completed upload of asset");
                Ok(())
            }
            UpdateOutcome::ConditionFailed => {
                warn!(asset_id = %asset_id, "Asset changed during completion");
                Err(AssetError::not_found(id))
            }
        }
    }

    /// Presign a download for an uploaded asset.
    ///
    /// An asset that exists but is not yet uploaded is reported exactly like
    /// a missing one.
    ///
    /// # Errors
    ///
    /// - `InvalidTimeout` if `timeout` is not a strictly positive integer
    /// - `NotFound` if the asset is absent or not yet uploaded
    pub async fn get(&self, id: &str, timeout: Option<&str>) -> Result<DownloadLink, AssetError> {
        let ttl = parse_timeout(timeout, self.download_ttl)?;
        let asset_id = parse_asset_id(id)?;

        let asset = self
            .repo
            .find_by_id(asset_id)
            .await?
            .ok_or_else(|| AssetError::not_found(id))?;

        if asset.status != AssetStatus::Uploaded {
            debug!(asset_id = %asset_id, status = %asset.status, "Asset not yet available");
            return Err(AssetError::not_found(id));
        }

        let presigned = self.issuer.issue_download_url(asset_id, ttl).await?;

        Ok(DownloadLink {
            download_url: presigned.url,
            expires_at: presigned.expires_at,
        })
    }

    /// Delete an asset.
    ///
    /// Removes both the payload and the record; either being absent already
    /// is fine.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store fails.
    pub async fn delete(&self, id: &str) -> Result<(), AssetError> {
        let Ok(asset_id) = parse_asset_id(id) else {
            debug!(asset_id = %id, "Ignoring delete of unparseable id");
            return Ok(());
        };

        self.issuer.delete_payload(asset_id).await?;
        self.repo.delete(asset_id).await?;

        info!(asset_id = %asset_id, "Deleted asset");
        Ok(())
    }
}
