//! Portfolio clean-up planning: duplicate removal and per-category caps.
//!
//! The planners are pure: they take the full listing and return the ids to
//! delete. [`deduplicate`] and [`cap_categories`] run a plan against a
//! store; the caller is responsible for clearing the gallery cache afterwards.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use serde::Serialize;

use crate::category::{to_ui_category, UiCategory};
use crate::error::CoreError;
use crate::portfolio::StoredImage;
use crate::store::{PortfolioStore, StoreError};
use crate::types::ImageId;

/// Default number of images kept per UI category by [`plan_category_caps`].
pub const DEFAULT_MAX_PER_CATEGORY: usize = 50;

/// Outcome of a clean-up run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    /// Rows examined.
    pub scanned: usize,
    /// Ids that were deleted.
    pub removed: Vec<ImageId>,
    /// Ids that were planned for deletion but could not be removed.
    pub failed: Vec<ImageId>,
}

/// Ids of rows sharing an `image_url` with an older row.
///
/// Within each group of identical URLs the oldest row is kept. Ties on
/// `created_at` keep the row with the smallest id so the plan is stable.
pub fn plan_duplicate_removal(rows: &[StoredImage]) -> Vec<ImageId> {
    let mut groups: HashMap<&str, Vec<&StoredImage>> = HashMap::new();
    for row in rows {
        groups.entry(row.image_url.as_str()).or_default().push(row);
    }

    let mut doomed: Vec<ImageId> = groups
        .into_values()
        .filter(|group| group.len() > 1)
        .flat_map(|mut group| {
            group.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
            group.into_iter().skip(1).map(|row| row.id.clone())
        })
        .collect();
    doomed.sort();
    doomed
}

/// Ids of rows beyond the newest `max_per_category` in each UI category.
pub fn plan_category_caps(rows: &[StoredImage], max_per_category: NonZeroUsize) -> Vec<ImageId> {
    let max_per_category = max_per_category.get();
    let mut groups: HashMap<UiCategory, Vec<&StoredImage>> = HashMap::new();
    for row in rows {
        groups
            .entry(to_ui_category(&row.category))
            .or_default()
            .push(row);
    }

    let mut doomed: Vec<ImageId> = groups
        .into_values()
        .filter(|group| group.len() > max_per_category)
        .flat_map(|mut group| {
            group.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
            group
                .into_iter()
                .skip(max_per_category)
                .map(|row| row.id.clone())
        })
        .collect();
    doomed.sort();
    doomed
}

pub fn validate_max_per_category(max: usize) -> Result<NonZeroUsize, CoreError> {
    NonZeroUsize::new(max)
        .ok_or_else(|| CoreError::Validation("max_per_category must be at least 1".into()))
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Remove duplicate images (same `image_url`), keeping the oldest of each.
pub async fn deduplicate(store: &dyn PortfolioStore) -> Result<CleanupReport, StoreError> {
    let rows = store.list_all().await?;
    let doomed = plan_duplicate_removal(&rows);
    Ok(remove_images(store, rows.len(), doomed).await)
}

/// Keep only the newest `max_per_category` images in each UI category.
pub async fn cap_categories(
    store: &dyn PortfolioStore,
    max_per_category: NonZeroUsize,
) -> Result<CleanupReport, StoreError> {
    let rows = store.list_all().await?;
    let doomed = plan_category_caps(&rows, max_per_category);
    Ok(remove_images(store, rows.len(), doomed).await)
}

/// Delete `ids` one at a time. A failed delete is logged and recorded in
/// [`CleanupReport::failed`]; the remaining ids are still attempted.
async fn remove_images(
    store: &dyn PortfolioStore,
    scanned: usize,
    ids: Vec<ImageId>,
) -> CleanupReport {
    let mut report = CleanupReport {
        scanned,
        ..Default::default()
    };

    for id in ids {
        match store.delete(&id).await {
            Ok(true) => report.removed.push(id),
            Ok(false) => {
                tracing::debug!(image_id = %id, "Image already gone during clean-up");
            }
            Err(err) => {
                tracing::warn!(
                    image_id = %id,
                    error = %err,
                    "Failed to delete image during clean-up",
                );
                report.failed.push(id);
            }
        }
    }

    tracing::info!(
        scanned = report.scanned,
        removed = report.removed.len(),
        failed = report.failed.len(),
        "Portfolio clean-up finished",
    );
    report
}
