//! API route definitions.

use asset_core::asset::AssetRepository;
use asset_core::storage::SignedUrlIssuer;
use axum::Router;

use crate::AppState;

pub mod assets;
pub mod health;

/// Creates the API router with all routes.
pub fn api_routes<R, S>() -> Router<AppState<R, S>>
where
    R: AssetRepository + 'static,
    S: SignedUrlIssuer + 'static,
{
    Router::new()
        .merge(health::routes())
        .merge(assets::routes())
}
