//! In-process [`PortfolioStore`] used by tests and local tooling.
//!
//! Records every range and count query so callers can assert on how many
//! round trips a code path made, and can be switched into a failing mode to
//! exercise error handling.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::{PortfolioStore, StoreError};
use crate::category::StorageCategory;
use crate::pagination::RowRange;
use crate::portfolio::{NewPortfolioImage, PortfolioImagePatch, StoredImage};

#[derive(Debug, Default)]
pub struct MemoryPortfolioStore {
    rows: Mutex<Vec<StoredImage>>,
    next_id: AtomicU64,
    failing: AtomicBool,
    range_queries: Mutex<Vec<RowRange>>,
    count_queries: AtomicU64,
}

impl MemoryPortfolioStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<StoredImage>) -> Self {
        let store = Self::new();
        *store.rows.lock().unwrap_or_else(|e| e.into_inner()) = rows;
        store
    }

    /// Make every subsequent call fail with [`StoreError::Request`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Ranges requested through [`PortfolioStore::fetch_range`], in call order.
    pub fn range_queries(&self) -> Vec<RowRange> {
        self.range_queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn count_queries(&self) -> u64 {
        self.count_queries.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn rows(&self) -> std::sync::MutexGuard<'_, Vec<StoredImage>> {
        self.rows.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Request("store unavailable".into()));
        }
        Ok(())
    }

    fn filtered(&self, filter: Option<&[StorageCategory]>) -> Vec<StoredImage> {
        let mut rows: Vec<StoredImage> = self
            .rows()
            .iter()
            .filter(|row| match filter {
                None => true,
                Some(categories) => categories.iter().any(|c| c.as_str() == row.category),
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }
}

#[async_trait]
impl PortfolioStore for MemoryPortfolioStore {
    async fn fetch_range(
        &self,
        filter: Option<&[StorageCategory]>,
        range: RowRange,
    ) -> Result<Vec<StoredImage>, StoreError> {
        self.range_queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(range);
        self.check_available()?;

        let skip = usize::try_from(range.start).unwrap_or(usize::MAX);
        let take = usize::try_from(range.row_count()).unwrap_or(usize::MAX);
        Ok(self.filtered(filter).into_iter().skip(skip).take(take).collect())
    }

    async fn count(&self, filter: Option<&[StorageCategory]>) -> Result<u64, StoreError> {
        self.count_queries.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.filtered(filter).len() as u64)
    }

    async fn list_all(&self) -> Result<Vec<StoredImage>, StoreError> {
        self.check_available()?;
        Ok(self.filtered(None))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredImage>, StoreError> {
        self.check_available()?;
        Ok(self.rows().iter().find(|row| row.id == id).cloned())
    }

    async fn insert(&self, input: &NewPortfolioImage) -> Result<StoredImage, StoreError> {
        self.check_available()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = StoredImage {
            id: format!("mem-{n}"),
            title: input.title.clone(),
            description: input.description.clone(),
            image_url: input.image_url.clone(),
            category: input.category.as_str().to_string(),
            created_at: Utc::now(),
        };
        self.rows().push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: &str,
        patch: &PortfolioImagePatch,
    ) -> Result<Option<StoredImage>, StoreError> {
        self.check_available()?;
        let mut rows = self.rows();
        let Some(row) = rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            row.title = title.clone();
        }
        if let Some(description) = &patch.description {
            row.description = Some(description.clone());
        }
        if let Some(url) = &patch.image_url {
            row.image_url = url.clone();
        }
        if let Some(category) = patch.category {
            row.category = category.as_str().to_string();
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut rows = self.rows();
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok(rows.len() < before)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
