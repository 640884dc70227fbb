//! Storage service implementation using Apache OpenDAL.

use std::time::Duration;

use asset_shared::{AssetId, StorageConfig, StorageProvider};
use opendal::raw::PresignedRequest;
use opendal::{ErrorKind, Operator, services};
use tracing::debug;

use super::error::StorageError;
use super::issuer::{PresignedUrl, SignedUrlIssuer};

/// Object storage for asset payloads.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::AzureBlob {
                account,
                access_key,
                container,
            } => {
                let builder = services::Azblob::default()
                    .account_name(account)
                    .account_key(access_key)
                    .container(container);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
        };

        Ok(operator)
    }

    /// Object key holding the payload of an asset.
    ///
    /// Format: `{key_prefix}{asset_id}`
    #[must_use]
    pub fn object_key(&self, id: AssetId) -> String {
        format!("{}{}", self.config.key_prefix, id)
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the bucket/container name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        self.config.provider.bucket()
    }
}

impl SignedUrlIssuer for StorageService {
    async fn issue_upload_url(
        &self,
        id: AssetId,
        ttl: Duration,
    ) -> Result<PresignedUrl, StorageError> {
        let key = self.object_key(id);
        let presigned = self.operator.presign_write(&key, ttl).await?;
        Ok(to_presigned_url(&presigned, ttl))
    }

    async fn issue_download_url(
        &self,
        id: AssetId,
        ttl: Duration,
    ) -> Result<PresignedUrl, StorageError> {
        let key = self.object_key(id);
        let presigned = self.operator.presign_read(&key, ttl).await?;
        Ok(to_presigned_url(&presigned, ttl))
    }

    async fn payload_exists(&self, id: AssetId) -> Result<bool, StorageError> {
        let key = self.object_key(id);
        match self.operator.stat(&key).await {
            Ok(_) => Ok(true),
            Err(e) => {
                debug!(key = %key, kind = %e.kind(), "stat failed");
                absent_or_error(e)
            }
        }
    }

    async fn delete_payload(&self, id: AssetId) -> Result<(), StorageError> {
        let key = self.object_key(id);
        self.operator.delete(&key).await.map_err(StorageError::from)
    }
}

/// Decide whether a failed `stat` means the payload is absent.
///
/// S3 answers 403 rather than 404 for missing keys when the credentials lack
/// ListBucket, so both count as absent. Anything else is a storage failure.
fn absent_or_error(err: opendal::Error) -> Result<bool, StorageError> {
    match err.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => Ok(false),
        _ => Err(err.into()),
    }
}

fn to_presigned_url(presigned: &PresignedRequest, ttl: Duration) -> PresignedUrl {
    PresignedUrl {
        url: presigned.uri().to_string(),
        method: presigned.method().to_string(),
        expires_at: PresignedUrl::expiry_from_now(ttl),
    }
}
