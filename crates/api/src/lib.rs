//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - The `/asset` REST routes
//! - A health endpoint
//! - Mapping of lifecycle errors to HTTP responses

pub mod routes;

use std::sync::Arc;

use asset_core::asset::{AssetRepository, AssetService};
use asset_core::storage::SignedUrlIssuer;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
pub struct AppState<R: AssetRepository, S: SignedUrlIssuer> {
    /// Asset lifecycle manager.
    pub assets: Arc<AssetService<R, S>>,
}

impl<R: AssetRepository, S: SignedUrlIssuer> AppState<R, S> {
    /// Wrap a lifecycle manager into handler state.
    #[must_use]
    pub fn new(assets: AssetService<R, S>) -> Self {
        Self {
            assets: Arc::new(assets),
        }
    }
}

// Manual impl: deriving would require `R: Clone` and `S: Clone`.
impl<R: AssetRepository, S: SignedUrlIssuer> Clone for AppState<R, S> {
    fn clone(&self) -> Self {
        Self {
            assets: Arc::clone(&self.assets),
        }
    }
}

/// Creates the main application router.
pub fn create_router<R, S>(state: AppState<R, S>) -> Router
where
    R: AssetRepository + 'static,
    S: SignedUrlIssuer + 'static,
{
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
