//! In-memory record store and object store.
//!
//! Both honour the same contracts as the real adapters (atomic conditional
//! update, idempotent deletes) and add hooks for injecting failures and
//! interleavings. Enabled for dependent crates via the `testing` feature.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use asset_shared::AssetId;
use chrono::{DateTime, Utc};
use tokio::sync::Barrier;

use crate::asset::{Asset, AssetError, AssetRepository, AssetStatus, UpdateOutcome};
use crate::storage::{PresignedUrl, SignedUrlIssuer, StorageError};

/// Record store backed by a `HashMap`.
#[derive(Default)]
pub struct InMemoryAssetRepository {
    assets: Mutex<HashMap<AssetId, Asset>>,
    calls: AtomicUsize,
    fail_writes: AtomicBool,
    fail_deletes: AtomicBool,
    delete_before_update: AtomicBool,
    read_barrier: Mutex<Option<(Arc<Barrier>, usize)>>,
}

impl InMemoryAssetRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a stored record.
    #[must_use]
    pub fn get(&self, id: AssetId) -> Option<Asset> {
        self.lock().get(&id).copied()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of repository operations performed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent `create` fail.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Make every subsequent `delete` fail.
    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    /// Remove the record right before the next `update_status` runs, as if a
    /// concurrent delete won the race.
    pub fn delete_before_next_update(&self) {
        self.delete_before_update.store(true, Ordering::SeqCst);
    }

    /// Hold each of the next `parties` `find_by_id` calls after it has read
    /// its snapshot until all of them have.
    pub fn pause_reads(&self, parties: usize) {
        *self
            .read_barrier
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) =
            Some((Arc::new(Barrier::new(parties)), parties));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<AssetId, Asset>> {
        self.assets
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl AssetRepository for InMemoryAssetRepository {
    async fn create(&self, asset: Asset) -> Result<(), AssetError> {
        self.record_call();
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AssetError::repository("write rejected"));
        }
        self.lock().insert(asset.id, asset);
        Ok(())
    }

    async fn find_by_id(&self, id: AssetId) -> Result<Option<Asset>, AssetError> {
        self.record_call();
        let snapshot = self.get(id);

        let barrier = {
            let mut slot = self
                .read_barrier
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            match slot.take() {
                Some((barrier, remaining)) if remaining > 1 => {
                    *slot = Some((barrier.clone(), remaining - 1));
                    Some(barrier)
                }
                other => other.map(|(barrier, _)| barrier),
            }
        };
        if let Some(barrier) = barrier {
            barrier.wait().await;
        }

        Ok(snapshot)
    }

    async fn update_status(
        &self,
        id: AssetId,
        expected: AssetStatus,
        status: AssetStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<UpdateOutcome, AssetError> {
        self.record_call();
        let mut assets = self.lock();

        if self.delete_before_update.swap(false, Ordering::SeqCst) {
            assets.remove(&id);
        }

        match assets.get_mut(&id) {
            Some(asset) if asset.status == expected => {
                asset.status = status;
                asset.updated_at = updated_at;
                Ok(UpdateOutcome::Applied)
            }
            _ => Ok(UpdateOutcome::ConditionFailed),
        }
    }

    async fn delete(&self, id: AssetId) -> Result<(), AssetError> {
        self.record_call();
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AssetError::repository("delete rejected"));
        }
        self.lock().remove(&id);
        Ok(())
    }
}

/// Object store keeping payloads in memory and minting fake signed URLs.
///
/// URLs look like `memory://assets/{id}?method=PUT&ttl=900`.
#[derive(Default)]
pub struct InMemoryObjectStore {
    payloads: Mutex<HashMap<AssetId, Vec<u8>>>,
    calls: AtomicUsize,
    fail_presign: AtomicBool,
    fail_stat: AtomicBool,
    fail_delete: AtomicBool,
    issued: Mutex<HashSet<String>>,
}

impl InMemoryObjectStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a payload, as a client would through the upload URL.
    pub fn put_payload(&self, id: AssetId, bytes: Vec<u8>) {
        self.lock().insert(id, bytes);
    }

    /// Whether a payload is stored for `id`.
    #[must_use]
    pub fn has_payload(&self, id: AssetId) -> bool {
        self.lock().contains_key(&id)
    }

    /// Fetch a payload through a previously issued download URL.
    ///
    /// Returns `None` if the URL was never issued or the payload is gone.
    #[must_use]
    pub fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        let issued = self
            .issued
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .contains(url);
        if !issued || !url.contains("method=GET") {
            return None;
        }
        let id = url
            .strip_prefix("memory://assets/")?
            .split('?')
            .next()?
            .parse::<AssetId>()
            .ok()?;
        self.lock().get(&id).cloned()
    }

    /// Number of object store operations performed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent presign fail as unsupported.
    pub fn fail_presign(&self) {
        self.fail_presign.store(true, Ordering::SeqCst);
    }

    /// Make every subsequent `payload_exists` fail.
    pub fn fail_stat(&self) {
        self.fail_stat.store(true, Ordering::SeqCst);
    }

    /// Make every subsequent `delete_payload` fail.
    pub fn fail_delete(&self) {
        self.fail_delete.store(true, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<AssetId, Vec<u8>>> {
        self.payloads
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn presign(&self, id: AssetId, method: &str, ttl: Duration) -> Result<PresignedUrl, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_presign.load(Ordering::SeqCst) {
            return Err(StorageError::PresignNotSupported);
        }

        let url = format!("memory://assets/{id}?method={method}&ttl={}", ttl.as_secs());
        self.issued
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(url.clone());

        Ok(PresignedUrl {
            url,
            method: method.to_string(),
            expires_at: PresignedUrl::expiry_from_now(ttl),
        })
    }
}

impl SignedUrlIssuer for InMemoryObjectStore {
    async fn issue_upload_url(
        &self,
        id: AssetId,
        ttl: Duration,
    ) -> Result<PresignedUrl, StorageError> {
        self.presign(id, "PUT", ttl)
    }

    async fn issue_download_url(
        &self,
        id: AssetId,
        ttl: Duration,
    ) -> Result<PresignedUrl, StorageError> {
        self.presign(id, "GET", ttl)
    }

    async fn payload_exists(&self, id: AssetId) -> Result<bool, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_stat.load(Ordering::SeqCst) {
            return Err(StorageError::operation("stat unavailable"));
        }
        Ok(self.has_payload(id))
    }

    async fn delete_payload(&self, id: AssetId) -> Result<(), StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(StorageError::operation("delete unavailable"));
        }
        self.lock().remove(&id);
        Ok(())
    }
}
