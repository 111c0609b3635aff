//! Route definitions for the portfolio gallery.
//!
//! - `public_router()` for the read-only gallery mounted at `/portfolio`
//! - `admin_router()` for image management mounted at `/admin/portfolio`

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{admin_portfolio, portfolio};
use crate::state::AppState;

/// Public gallery routes mounted at `/portfolio`.
///
/// ```text
/// GET /             -> list_portfolio
/// GET /count        -> count_portfolio
/// GET /categories   -> list_categories
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(portfolio::list_portfolio))
        .route("/count", get(portfolio::count_portfolio))
        .route("/categories", get(portfolio::list_categories))
}

/// Admin routes mounted at `/admin/portfolio`.
///
/// ```text
/// POST   /              -> create_image
/// PUT    /{id}          -> update_image
/// DELETE /{id}          -> delete_image
/// POST   /dedupe        -> dedupe_images
/// POST   /optimize      -> optimize_images
/// POST   /cache/clear   -> clear_cache
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(admin_portfolio::create_image))
        .route(
            "/{id}",
            put(admin_portfolio::update_image).delete(admin_portfolio::delete_image),
        )
        .route("/dedupe", post(admin_portfolio::dedupe_images))
        .route("/optimize", post(admin_portfolio::optimize_images))
        .route("/cache/clear", post(admin_portfolio::clear_cache))
}
