//! Read path for the portfolio gallery.
//!
//! [`PortfolioGallery`] sits between HTTP handlers and the backing store. It
//! serves pages from an [`ImageCache`], translates UI category filters into
//! storage category filters, and maps stored records into the gallery model.
//!
//! The `fetch_*` methods are fail-soft: a store error is logged and turned
//! into an empty page or a zero count, so the gallery shows "no images"
//! instead of failing the request. The `try_fetch_*` variants return the
//! error so callers can tell an empty category from a failed query.
//!
//! Page and count are separate queries and may observe different states of
//! the table if it changes between them.

use std::sync::Arc;

use crate::cache::{CacheKey, ImageCache};
use crate::category::{to_storage_categories, UiCategory};
use crate::pagination::PageRequest;
use crate::portfolio::PortfolioImage;
use crate::store::{PortfolioStore, StoreError};

pub struct PortfolioGallery {
    store: Arc<dyn PortfolioStore>,
    cache: ImageCache,
}

impl PortfolioGallery {
    pub fn new(store: Arc<dyn PortfolioStore>, cache: ImageCache) -> Self {
        Self { store, cache }
    }

    pub fn store(&self) -> &Arc<dyn PortfolioStore> {
        &self.store
    }

    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Fetch one page of images, newest first.
    ///
    /// Returns an empty page if the store query fails.
    pub async fn fetch_page(
        &self,
        category: Option<UiCategory>,
        request: PageRequest,
    ) -> Vec<PortfolioImage> {
        match self.try_fetch_page(category, request).await {
            Ok(images) => images,
            Err(err) => {
                tracing::warn!(
                    key = %CacheKey::new(category, request),
                    error = %err,
                    "Portfolio page query failed, serving empty page",
                );
                Vec::new()
            }
        }
    }

    /// Fetch one page of images, returning the store error on failure.
    ///
    /// A cache hit is returned as-is without consulting the store. Failed
    /// queries are not cached.
    pub async fn try_fetch_page(
        &self,
        category: Option<UiCategory>,
        request: PageRequest,
    ) -> Result<Vec<PortfolioImage>, StoreError> {
        let key = CacheKey::new(category, request);
        if let Some(images) = self.cache.get(&key) {
            tracing::debug!(key = %key, count = images.len(), "Portfolio cache hit");
            return Ok(images);
        }

        let filter = category.map(to_storage_categories);
        let rows = self.store.fetch_range(filter, request.range()).await?;
        let images: Vec<PortfolioImage> = rows.into_iter().map(PortfolioImage::from).collect();

        tracing::debug!(key = %key, count = images.len(), "Portfolio page loaded from store");
        self.cache.set(key, images.clone());
        Ok(images)
    }

    /// Count the images in `category` (or all images). Returns 0 if the query fails.
    pub async fn fetch_count(&self, category: Option<UiCategory>) -> u64 {
        match self.try_fetch_count(category).await {
            Ok(total) => total,
            Err(err) => {
                tracing::warn!(
                    category = category.map_or("all", UiCategory::as_str),
                    error = %err,
                    "Portfolio count query failed, reporting zero",
                );
                0
            }
        }
    }

    pub async fn try_fetch_count(&self, category: Option<UiCategory>) -> Result<u64, StoreError> {
        let filter = category.map(to_storage_categories);
        self.store.count(filter).await
    }

    /// Invalidate every cached page. Call after mutating portfolio rows.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
