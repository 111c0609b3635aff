#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use catering_api::config::{ServerConfig, StoreSettings};
use catering_api::router::build_app_router;
use catering_api::state::AppState;
use catering_core::cache::ImageCache;
use catering_core::clock::ManualClock;
use catering_core::gallery::PortfolioGallery;
use catering_core::portfolio::StoredImage;
use catering_core::store::memory::MemoryPortfolioStore;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// The store settings are never read: tests inject a memory store directly.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        cache_ttl_secs: 300,
        storage_public_url: Some("https://store.example".to_string()),
        store: StoreSettings::Rest {
            url: "https://store.example".to_string(),
            api_key: "test-key".to_string(),
        },
    }
}

/// A router over an in-memory store, with handles for inspecting it.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryPortfolioStore>,
    pub clock: Arc<ManualClock>,
    pub gallery: Arc<PortfolioGallery>,
}

/// Build the full application router, middleware included, over `rows`.
pub fn build_test_app(rows: Vec<StoredImage>) -> TestApp {
    let config = test_config();
    let store = Arc::new(MemoryPortfolioStore::with_rows(rows));
    let clock = Arc::new(ManualClock::new());
    let cache = ImageCache::new(config.cache_ttl(), clock.clone());
    let gallery = Arc::new(PortfolioGallery::new(store.clone(), cache));

    let state = AppState {
        gallery: Arc::clone(&gallery),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        clock,
        gallery,
    }
}

impl TestApp {
    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }
}

/// A stored row `minutes` after a fixed epoch, so larger values are newer.
pub fn image(id: &str, category: &str, minutes: i64) -> StoredImage {
    StoredImage {
        id: id.to_string(),
        title: format!("Image {id}"),
        description: None,
        image_url: format!("/portfolio/{id}.jpg"),
        category: category.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
            + chrono::Duration::minutes(minutes),
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "POST", uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "PUT", uri, body).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
