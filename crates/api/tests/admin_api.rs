//! HTTP-level tests for the `/api/v1/admin/portfolio` endpoints.
//!
//! Every mutation must invalidate cached gallery pages so the next public
//! request reflects the change.

mod common;

use axum::http::header::CACHE_CONTROL;
use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, image, post_empty, post_json, put_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_image_returns_201_and_clears_cache() {
    let app = build_test_app(vec![image("a", "wedding", 1)]);
    get(app.router.clone(), "/api/v1/portfolio").await;
    assert_eq!(app.gallery.cache().len(), 1);

    let response = post_json(
        app.router.clone(),
        "/api/v1/admin/portfolio",
        json!({
            "title": "Canapé tower",
            "description": "Three tiers",
            "image_url": "/portfolio/canape.jpg",
            "category": "snack-box"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["category"], "snack-box");
    assert!(json["data"]["id"].is_string());
    assert!(app.gallery.cache().is_empty());

    let json = body_json(get(app.router, "/api/v1/portfolio?category=buffet").await).await;
    assert_eq!(json["data"]["total"], 1);
}

#[tokio::test]
async fn create_with_blank_title_is_rejected() {
    let app = build_test_app(Vec::new());

    let response = post_json(
        app.router,
        "/api/v1/admin/portfolio",
        json!({
            "title": "   ",
            "image_url": "/portfolio/x.jpg",
            "category": "wedding"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn create_with_unknown_category_is_rejected() {
    let app = build_test_app(Vec::new());

    let response = post_json(
        app.router,
        "/api/v1/admin/portfolio",
        json!({
            "title": "Brunch",
            "image_url": "/portfolio/brunch.jpg",
            "category": "brunch"
        }),
    )
    .await;

    assert!(response.status().is_client_error());
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn create_fails_with_502_when_store_is_down() {
    let app = build_test_app(Vec::new());
    app.store.set_failing(true);

    let response = post_json(
        app.router,
        "/api/v1/admin/portfolio",
        json!({
            "title": "Cake",
            "image_url": "/portfolio/cake.jpg",
            "category": "wedding"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "STORE_UNAVAILABLE");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_image_changes_category() {
    let app = build_test_app(vec![image("a", "wedding", 1)]);
    get(app.router.clone(), "/api/v1/portfolio").await;

    let response = put_json(
        app.router.clone(),
        "/api/v1/admin/portfolio/a",
        json!({ "category": "signature" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["category"], "signature");
    assert!(app.gallery.cache().is_empty());

    let json = body_json(get(app.router, "/api/v1/portfolio").await).await;
    assert_eq!(json["data"]["images"][0]["category"], "special-dishes");
}

#[tokio::test]
async fn empty_update_is_rejected() {
    let app = build_test_app(vec![image("a", "wedding", 1)]);

    let response = put_json(app.router, "/api/v1/admin/portfolio/a", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn update_missing_image_returns_404() {
    let app = build_test_app(Vec::new());

    let response = put_json(
        app.router,
        "/api/v1/admin/portfolio/missing",
        json!({ "title": "New title" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "PortfolioImage with id missing not found"
    );
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_image_returns_204_then_404() {
    let app = build_test_app(vec![image("a", "wedding", 1)]);

    let response = delete(app.router.clone(), "/api/v1/admin/portfolio/a").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(app.store.is_empty());

    let response = delete(app.router, "/api/v1/admin/portfolio/a").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dedupe_keeps_oldest_copy() {
    let mut older = image("old", "wedding", 1);
    older.image_url = "/portfolio/same.jpg".into();
    let mut newer = image("new", "wedding", 2);
    newer.image_url = "/portfolio/same.jpg".into();
    let app = build_test_app(vec![older, newer, image("other", "buffet", 3)]);
    get(app.router.clone(), "/api/v1/portfolio").await;

    let response = post_empty(app.router, "/api/v1/admin/portfolio/dedupe").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["scanned"], 3);
    assert_eq!(json["data"]["removed"], json!(["new"]));
    assert_eq!(app.store.len(), 2);
    assert!(app.gallery.cache().is_empty());
}

#[tokio::test]
async fn dedupe_without_duplicates_keeps_cache() {
    let app = build_test_app(vec![image("a", "wedding", 1)]);
    get(app.router.clone(), "/api/v1/portfolio").await;

    let response = post_empty(app.router, "/api/v1/admin/portfolio/dedupe").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.gallery.cache().len(), 1);
}

#[tokio::test]
async fn optimize_caps_each_gallery_category() {
    let rows = (0..4)
        .map(|i| {
            let category = if i % 2 == 0 { "buffet" } else { "snack-box" };
            image(&format!("b{i}"), category, i)
        })
        .chain(std::iter::once(image("w0", "wedding", 0)))
        .collect();
    let app = build_test_app(rows);

    let response = post_json(
        app.router,
        "/api/v1/admin/portfolio/optimize",
        json!({ "max_per_category": 2 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["removed"], json!(["b0", "b1"]));
    assert_eq!(app.store.len(), 3);
}

#[tokio::test]
async fn optimize_without_body_uses_default_cap() {
    let app = build_test_app(vec![image("a", "wedding", 1)]);

    let response = post_empty(app.router, "/api/v1/admin/portfolio/optimize").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["removed"], json!([]));
}

#[tokio::test]
async fn optimize_rejects_zero_cap() {
    let app = build_test_app(vec![image("a", "wedding", 1)]);

    let response = post_json(
        app.router,
        "/api/v1/admin/portfolio/optimize",
        json!({ "max_per_category": 0 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn clear_cache_reports_dropped_entries() {
    let app = build_test_app(vec![image("a", "wedding", 1)]);
    get(app.router.clone(), "/api/v1/portfolio").await;
    get(app.router.clone(), "/api/v1/portfolio?category=wedding").await;

    let response = post_empty(app.router, "/api/v1/admin/portfolio/cache/clear").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["entries_cleared"], 2);
    assert!(app.gallery.cache().is_empty());
}

// ---------------------------------------------------------------------------
// Cache-Control
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_responses_are_never_cached() {
    let app = build_test_app(vec![image("a", "wedding", 1)]);

    let response = post_empty(app.router.clone(), "/api/v1/admin/portfolio/cache/clear").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CACHE_CONTROL], "no-store");

    let response = delete(app.router, "/api/v1/admin/portfolio/missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
}
