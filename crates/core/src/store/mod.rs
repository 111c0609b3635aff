//! The seam between the gallery and its backing store.
//!
//! `catering-db` provides the PostgreSQL and REST implementations;
//! [`memory::MemoryPortfolioStore`] keeps records in process.

pub mod memory;

use async_trait::async_trait;

use crate::category::StorageCategory;
use crate::pagination::RowRange;
use crate::portfolio::{NewPortfolioImage, PortfolioImagePatch, StoredImage};

/// Errors raised by a [`PortfolioStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The request never produced a response (network, DNS, TLS, timeout).
    #[error("Store request failed: {0}")]
    Request(String),

    /// The store answered with a non-success status.
    #[error("Store returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response could not be decoded into records.
    #[error("Failed to decode store response: {0}")]
    Decode(String),

    /// A database driver error.
    #[error("Database error: {0}")]
    Database(String),
}

/// Row-level access to the portfolio image table.
///
/// Listings are always ordered by `created_at` descending. A `filter` of
/// `None` means "all categories"; `Some` restricts to the given stored
/// category values.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// Fetch the rows within `range` (inclusive) of the filtered, ordered listing.
    async fn fetch_range(
        &self,
        filter: Option<&[StorageCategory]>,
        range: RowRange,
    ) -> Result<Vec<StoredImage>, StoreError>;

    /// Count the rows matching `filter` without transferring them.
    async fn count(&self, filter: Option<&[StorageCategory]>) -> Result<u64, StoreError>;

    /// Every row, newest first.
    async fn list_all(&self) -> Result<Vec<StoredImage>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredImage>, StoreError>;

    /// Insert a row, returning it with its store-assigned `id` and `created_at`.
    async fn insert(&self, input: &NewPortfolioImage) -> Result<StoredImage, StoreError>;

    /// Apply the `Some` fields of `patch`. Returns `None` if no row has `id`.
    async fn update(
        &self,
        id: &str,
        patch: &PortfolioImagePatch,
    ) -> Result<Option<StoredImage>, StoreError>;

    /// Delete a row. Returns `true` if a row was removed.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
