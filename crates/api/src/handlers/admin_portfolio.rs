//! Admin handlers for managing portfolio images.
//!
//! Every mutation clears the gallery cache of this process. Other server
//! replicas keep their cached pages until those expire.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catering_core::error::CoreError;
use catering_core::maintenance::{self, DEFAULT_MAX_PER_CATEGORY};
use catering_core::portfolio::{NewPortfolioImage, PortfolioImagePatch};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/portfolio/optimize`.
#[derive(Debug, Default, Deserialize)]
pub struct OptimizeRequest {
    pub max_per_category: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CacheCleared {
    pub entries_cleared: usize,
}

/// POST /api/v1/admin/portfolio
///
/// Create a portfolio image.
pub async fn create_image(
    State(state): State<AppState>,
    Json(input): Json<NewPortfolioImage>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let image = state.gallery.store().insert(&input).await?;
    state.gallery.clear_cache();

    tracing::info!(
        image_id = %image.id,
        category = %image.category,
        "Portfolio image created",
    );

    Ok((StatusCode::CREATED, DataResponse::json(image)))
}

/// PUT /api/v1/admin/portfolio/{id}
///
/// Partially update a portfolio image.
pub async fn update_image(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
    Json(input): Json<PortfolioImagePatch>,
) -> AppResult<impl IntoResponse> {
    if input.is_empty() {
        return Err(AppError::BadRequest("No fields to update".into()));
    }
    input.validate()?;

    let image = state
        .gallery
        .store()
        .update(&image_id, &input)
        .await?
        .ok_or_else(|| not_found(&image_id))?;
    state.gallery.clear_cache();

    tracing::info!(image_id = %image.id, "Portfolio image updated");

    Ok(DataResponse::json(image))
}

/// DELETE /api/v1/admin/portfolio/{id}
///
/// Delete a portfolio image.
pub async fn delete_image(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let deleted = state.gallery.store().delete(&image_id).await?;
    if !deleted {
        return Err(not_found(&image_id));
    }
    state.gallery.clear_cache();

    tracing::info!(image_id = %image_id, "Portfolio image deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/portfolio/dedupe
///
/// Delete images whose `image_url` duplicates an older image.
pub async fn dedupe_images(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let report = maintenance::deduplicate(state.gallery.store().as_ref()).await?;
    if !report.removed.is_empty() {
        state.gallery.clear_cache();
    }

    Ok(DataResponse::json(report))
}

/// POST /api/v1/admin/portfolio/optimize
///
/// Keep only the newest `max_per_category` images in each gallery category.
/// An empty body uses the default cap.
pub async fn optimize_images(
    State(state): State<AppState>,
    input: Option<Json<OptimizeRequest>>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = input.unwrap_or_default();
    let max = maintenance::validate_max_per_category(
        input.max_per_category.unwrap_or(DEFAULT_MAX_PER_CATEGORY),
    )?;

    let report = maintenance::cap_categories(state.gallery.store().as_ref(), max).await?;
    if !report.removed.is_empty() {
        state.gallery.clear_cache();
    }

    Ok(DataResponse::json(report))
}

/// POST /api/v1/admin/portfolio/cache/clear
///
/// Drop every cached gallery page in this process.
pub async fn clear_cache(State(state): State<AppState>) -> impl IntoResponse {
    let entries_cleared = state.gallery.cache().len();
    state.gallery.clear_cache();

    tracing::info!(entries_cleared, "Gallery cache cleared by admin");

    DataResponse::json(CacheCleared { entries_cleared })
}

fn not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "PortfolioImage",
        id: id.to_string(),
    })
}
