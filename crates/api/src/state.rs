use std::sync::Arc;

use catering_core::gallery::PortfolioGallery;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Gallery read path and cache, wrapping the backing store.
    pub gallery: Arc<PortfolioGallery>,
    pub config: Arc<ServerConfig>,
}
