//! Core business logic for the asset service.
//!
//! This crate contains the asset lifecycle with ZERO web or database
//! dependencies. The record store is reached through the
//! [`asset::AssetRepository`] port and the object store through the
//! [`storage::SignedUrlIssuer`] port.
//!
//! # Modules
//!
//! - `asset` - Asset lifecycle state machine (`created` -> `uploaded` -> gone)
//! - `storage` - Presigned URL issuing over Apache OpenDAL

pub mod asset;
pub mod storage;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
