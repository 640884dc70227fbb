//! Asset types and data structures.

use asset_shared::AssetId;
use chrono::{DateTime, Utc};

/// Lifecycle status of an asset record.
///
/// There is no `deleted` status: deletion removes the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetStatus {
    /// Record written, payload may or may not have been uploaded yet.
    Created,
    /// Upload confirmed; the asset can be downloaded.
    Uploaded,
}

impl AssetStatus {
    /// Convert to database string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Uploaded => "uploaded",
        }
    }

    /// Parse from database string value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created" => Some(Self::Created),
            "uploaded" => Some(Self::Uploaded),
            _ => None,
        }
    }

    /// Whether the state machine allows moving from `self` to `next`.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!((self, next), (Self::Created, Self::Uploaded))
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asset domain model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    /// Unique identifier.
    pub id: AssetId,
    /// Lifecycle status.
    pub status: AssetStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last transition.
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    /// A freshly created asset with a new random identifier.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: AssetId::new(),
            status: AssetStatus::Created,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Result of creating an asset.
#[derive(Debug, Clone)]
pub struct CreatedAsset {
    /// Generated asset ID.
    pub id: AssetId,
    /// Presigned upload URL.
    pub upload_url: String,
    /// When the upload URL expires.
    pub expires_at: DateTime<Utc>,
}

/// Result of requesting a download.
#[derive(Debug, Clone)]
pub struct DownloadLink {
    /// Presigned download URL.
    pub download_url: String,
    /// When the download URL expires.
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_status_roundtrip() {
        for s in [AssetStatus::Created, AssetStatus::Uploaded] {
            assert_eq!(AssetStatus::parse(s.as_str()), Some(s));
        }
    }

    #[test]
    fn test_asset_status_unknown() {
        assert_eq!(AssetStatus::parse("deleted"), None);
        assert_eq!(AssetStatus::parse("Uploaded"), None);
        assert_eq!(AssetStatus::parse(""), None);
    }

    #[test]
    fn test_transitions_only_move_forward() {
        assert!(AssetStatus::Created.can_transition_to(AssetStatus::Uploaded));
        assert!(!AssetStatus::Uploaded.can_transition_to(AssetStatus::Uploaded));
        assert!(!AssetStatus::Uploaded.can_transition_to(AssetStatus::Created));
        assert!(!AssetStatus::Created.can_transition_to(AssetStatus::Created));
    }

    #[test]
    fn test_new_asset_starts_created() {
        let now = Utc::now();
        let asset = Asset::new(now);
        assert_eq!(asset.status, AssetStatus::Created);
        assert_eq!(asset.created_at, now);
        assert_eq!(asset.updated_at, now);
    }
}
