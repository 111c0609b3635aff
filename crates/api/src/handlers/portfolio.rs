//! Public gallery handlers.
//!
//! Store failures never surface as errors here: the gallery answers with an
//! empty page and `degraded: true` so the page renders its empty state.

use axum::extract::{Query, State};
use axum::http::header::{CACHE_CONTROL, LINK};
use axum::http::{HeaderName, HeaderValue};
use axum::response::{AppendHeaders, IntoResponse};
use catering_core::category::UiCategory;
use catering_core::image_url::{
    build_image_url, preload_links, ImageTransform, DEFAULT_PRELOAD_COUNT,
};
use catering_core::pagination::{page_count, PageRequest};
use catering_core::portfolio::PortfolioImage;
use catering_core::types::{ImageId, Timestamp};
use serde::Serialize;

use crate::error::AppResult;
use crate::query::{parse_category, CategoryParams, GalleryParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Width hint for gallery thumbnails.
const THUMBNAIL_WIDTH: u32 = 600;

/// A gallery image as returned to clients.
#[derive(Debug, Serialize)]
pub struct GalleryImage {
    pub id: ImageId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    /// Resized variant, present when a storage base URL is configured.
    pub thumbnail_url: Option<String>,
    pub category: UiCategory,
    pub created_at: Timestamp,
}

impl GalleryImage {
    fn new(image: PortfolioImage, storage_base: Option<&str>) -> Self {
        let thumbnail_url = storage_base.map(|base| {
            build_image_url(
                base,
                &image.image_url,
                ImageTransform {
                    width: Some(THUMBNAIL_WIDTH),
                    ..Default::default()
                },
            )
        });
        Self {
            id: image.id,
            title: image.title,
            description: image.description,
            image_url: image.image_url,
            thumbnail_url,
            category: image.category,
            created_at: image.created_at,
        }
    }
}

/// One page of the gallery plus pagination metadata.
#[derive(Debug, Serialize)]
pub struct GalleryPage {
    pub images: Vec<GalleryImage>,
    pub category: Option<UiCategory>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u64,
    /// `true` when a store query failed and the result was substituted.
    pub degraded: bool,
}

#[derive(Debug, Serialize)]
pub struct GalleryCount {
    pub category: Option<UiCategory>,
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct CategoryOption {
    pub slug: &'static str,
}

/// GET /api/v1/portfolio
///
/// List one page of portfolio images, newest first. Page and count are
/// fetched concurrently and may reflect slightly different table states.
pub async fn list_portfolio(
    State(state): State<AppState>,
    Query(params): Query<GalleryParams>,
) -> AppResult<impl IntoResponse> {
    let category = parse_category(params.category.as_deref())?;
    let request = PageRequest::from_params(params.page, params.page_size)?;

    let (page_result, count_result) = tokio::join!(
        state.gallery.try_fetch_page(category, request),
        state.gallery.try_fetch_count(category),
    );

    let mut degraded = false;
    let images = page_result.unwrap_or_else(|err| {
        tracing::warn!(error = %err, page = request.page(), "Gallery page query failed");
        degraded = true;
        Vec::new()
    });
    let total = count_result.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Gallery count query failed");
        degraded = true;
        0
    });

    let mut headers: Vec<(HeaderName, HeaderValue)> =
        preload_links(&images, DEFAULT_PRELOAD_COUNT)
            .into_iter()
            .filter_map(|link| HeaderValue::from_str(&link).ok())
            .map(|value| (LINK, value))
            .collect();
    // Clients must not keep a substituted page.
    if degraded {
        headers.push((CACHE_CONTROL, HeaderValue::from_static("no-store")));
    }

    let storage_base = state.config.storage_public_url.as_deref();
    let page = GalleryPage {
        images: images
            .into_iter()
            .map(|img| GalleryImage::new(img, storage_base))
            .collect(),
        category,
        page: request.page(),
        page_size: request.page_size(),
        total,
        total_pages: page_count(total, request.page_size()),
        degraded,
    };

    Ok((AppendHeaders(headers), DataResponse::json(page)))
}

/// GET /api/v1/portfolio/count
///
/// Count images in a category, or all images. Reports 0 if the store fails.
pub async fn count_portfolio(
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> AppResult<impl IntoResponse> {
    let category = parse_category(params.category.as_deref())?;
    let total = state.gallery.fetch_count(category).await;

    Ok(DataResponse::json(GalleryCount { category, total }))
}

/// GET /api/v1/portfolio/categories
///
/// The category slugs accepted by the `category` filter.
pub async fn list_categories() -> impl IntoResponse {
    let categories: Vec<CategoryOption> = UiCategory::ALL
        .into_iter()
        .map(|c| CategoryOption { slug: c.as_str() })
        .collect();

    DataResponse::json(categories)
}
