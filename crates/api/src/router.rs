//! Application router: route tree, response caching headers and the shared
//! middleware stack.
//!
//! `main.rs` and the integration tests both build the app through
//! [`build_app_router`], so tests exercise the production middleware.

use std::time::Duration;

use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, LINK};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes::{health, portfolio};
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the full application [`Router`].
///
/// Route tree:
///
/// ```text
/// /health                                          service + store health
///
/// /api/v1/portfolio                                one gallery page
/// /api/v1/portfolio/count                          image count per category
/// /api/v1/portfolio/categories                     accepted category slugs
///
/// /api/v1/admin/portfolio                          create (POST)
/// /api/v1/admin/portfolio/{id}                     update, delete
/// /api/v1/admin/portfolio/dedupe                   remove duplicate URLs (POST)
/// /api/v1/admin/portfolio/optimize                 cap images per category (POST)
/// /api/v1/admin/portfolio/cache/clear              drop cached pages (POST)
/// ```
///
/// Gallery responses may be cached by clients for as long as the server
/// caches the page. Handlers that set their own `Cache-Control` (degraded
/// pages) keep it. Health and admin responses are never cached.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let api = Router::new()
        .nest(
            "/portfolio",
            portfolio::public_router().layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                gallery_cache_control(config.cache_ttl_secs),
            )),
        )
        .nest(
            "/admin/portfolio",
            portfolio::admin_router().layer(no_store()),
        );

    let app = Router::new()
        .merge(health::router().layer(no_store()))
        .nest("/api/v1", api);

    with_middleware(app, config).with_state(state)
}

/// Wrap `router` in the shared stack. Layers run outermost first:
///
/// 1. CORS
/// 2. Set request ID on incoming requests
/// 3. Structured request/response tracing
/// 4. Propagate request ID to response
/// 5. Request timeout
/// 6. Panic recovery (catch panics, return 500)
fn with_middleware(router: Router<AppState>, config: &ServerConfig) -> Router<AppState> {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    router
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(build_cors_layer(config))
}

/// `public, max-age=<ttl>`, matching the server-side page cache lifetime.
pub fn gallery_cache_control(ttl_secs: u64) -> HeaderValue {
    HeaderValue::from_str(&format!("public, max-age={ttl_secs}"))
        .unwrap_or_else(|_| HeaderValue::from_static("no-cache"))
}

fn no_store() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(CACHE_CONTROL, HeaderValue::from_static("no-store"))
}

/// CORS for the gallery front end. `Link` is exposed so browsers can read
/// the image preload hints.
///
/// Panics at startup if any configured origin is invalid.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .expose_headers([LINK])
        .max_age(Duration::from_secs(3600))
}
