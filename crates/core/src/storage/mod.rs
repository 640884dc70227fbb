//! Presigned URL issuing for asset payloads using Apache OpenDAL.
//!
//! This module provides vendor-agnostic object storage with support for:
//! - S3-compatible: AWS S3, Cloudflare R2, MinIO
//! - Azure Blob Storage
//! - Local filesystem (development only, no presigning)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      SignedUrlIssuer                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ issue_upload_url   -> op.presign_write("key", ttl)   (PUT)       │
//! │ issue_download_url -> op.presign_read("key", ttl)    (GET)       │
//! │ payload_exists     -> op.stat("key")                             │
//! │ delete_payload     -> op.delete("key")                           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The object key for an asset is its identifier, optionally prefixed.

mod error;
mod issuer;
mod service;

pub use error::StorageError;
pub use issuer::{PresignedUrl, SignedUrlIssuer};
pub use service::StorageService;
