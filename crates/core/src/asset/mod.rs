//! Asset lifecycle management.
//!
//! An asset moves `created` -> `uploaded` and is then removed outright:
//! - `create` writes a `created` record and presigns an upload
//! - `complete` verifies the payload and flips the record to `uploaded`
//! - `get` presigns a download for `uploaded` assets only
//! - `delete` makes both payload and record absent
//!
//! The service keeps no state of its own; the record store's conditional
//! update is the only serialization point between concurrent callers.

mod error;
mod service;
mod types;
mod validation;

pub use error::AssetError;
pub use service::{AssetRepository, AssetService, UpdateOutcome};
pub use types::{Asset, AssetStatus, CreatedAsset, DownloadLink};
pub use validation::{parse_asset_id, parse_timeout, validate_declared_status};
