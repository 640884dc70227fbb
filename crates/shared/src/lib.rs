//! Shared types and configuration for the asset service.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for asset references
//! - Configuration management

pub mod config;
pub mod types;

pub use config::{AppConfig, AssetConfig, StorageConfig, StorageProvider};
pub use types::AssetId;
