//! Asset error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Asset lifecycle errors.
///
/// `Storage` and `Repository` are the internal failures; everything else is
/// a domain outcome with a stable, client-facing message.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Completion body missing, malformed or not declaring `uploaded`.
    #[error("Invalid request")]
    InvalidRequest,

    /// Download timeout is not a strictly positive integer.
    #[error("Invalid timeout")]
    InvalidTimeout,

    /// No record, a record not yet uploaded, or a lost completion race.
    #[error("Asset {0} not found")]
    NotFound(String),

    /// Completion requested before any payload reached the object store.
    #[error("Asset {0} has not been uploaded")]
    NotUploaded(String),

    /// Completion requested for an asset that is already `uploaded`.
    #[error("Upload of asset {0} is already completed")]
    AlreadyCompleted(String),

    /// Object store operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Record store operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl AssetError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create a not uploaded error.
    #[must_use]
    pub fn not_uploaded(id: impl Into<String>) -> Self {
        Self::NotUploaded(id.into())
    }

    /// Create an already completed error.
    #[must_use]
    pub fn already_completed(id: impl Into<String>) -> Self {
        Self::AlreadyCompleted(id.into())
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }

    /// Whether this is an unexpected store failure rather than a domain outcome.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Repository(_))
    }

    /// Returns the HTTP status code for this error.
    ///
    /// Only `NotFound` is distinguishable by status; every other failure is 500.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            _ => 500,
        }
    }

    /// Returns the error code for logs and metrics.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InvalidTimeout => "INVALID_TIMEOUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::NotUploaded(_) => "NOT_UPLOADED",
            Self::AlreadyCompleted(_) => "ALREADY_COMPLETED",
            Self::Storage(_) | Self::Repository(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "9784c04d-598c-4e69-87f6-0f2eae377fba";

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AssetError::not_found(ID).status_code(), 404);
        assert_eq!(AssetError::InvalidRequest.status_code(), 500);
        assert_eq!(AssetError::InvalidTimeout.status_code(), 500);
        assert_eq!(AssetError::not_uploaded(ID).status_code(), 500);
        assert_eq!(AssetError::already_completed(ID).status_code(), 500);
        assert_eq!(AssetError::repository("down").status_code(), 500);
        assert_eq!(
            AssetError::from(StorageError::operation("down")).status_code(),
            500
        );
    }

    #[test]
    fn test_error_messages_are_stable() {
        assert_eq!(AssetError::InvalidRequest.to_string(), "Invalid request");
        assert_eq!(AssetError::InvalidTimeout.to_string(), "Invalid timeout");
        assert_eq!(
            AssetError::not_found(ID).to_string(),
            format!("Asset {ID} not found")
        );
        assert_eq!(
            AssetError::not_uploaded(ID).to_string(),
            format!("Asset {ID} has not been uploaded")
        );
        assert_eq!(
            AssetError::already_completed(ID).to_string(),
            format!("Upload of asset {ID} is already completed")
        );
    }

    #[test]
    fn test_internal_classification() {
        assert!(AssetError::repository("x").is_internal());
        assert!(AssetError::from(StorageError::PresignNotSupported).is_internal());
        assert!(!AssetError::not_found(ID).is_internal());
        assert!(!AssetError::InvalidTimeout.is_internal());
        assert_eq!(AssetError::repository("x").error_code(), "INTERNAL_ERROR");
        assert_eq!(AssetError::not_uploaded(ID).error_code(), "NOT_UPLOADED");
    }
}
