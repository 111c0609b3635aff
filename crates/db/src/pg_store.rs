//! [`PortfolioStore`] backed by PostgreSQL.

use async_trait::async_trait;
use catering_core::category::StorageCategory;
use catering_core::pagination::RowRange;
use catering_core::portfolio::{NewPortfolioImage, PortfolioImagePatch, StoredImage};
use catering_core::store::{PortfolioStore, StoreError};

use crate::repositories::PortfolioImageRepo;
use crate::{parse_row_id, DbPool};

#[derive(Debug, Clone)]
pub struct PgPortfolioStore {
    pool: DbPool,
}

impl PgPortfolioStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn db_error(err: sqlx::Error) -> StoreError {
    StoreError::Database(err.to_string())
}

fn category_values(filter: Option<&[StorageCategory]>) -> Option<Vec<String>> {
    filter.map(|categories| categories.iter().map(|c| c.as_str().to_string()).collect())
}

#[async_trait]
impl PortfolioStore for PgPortfolioStore {
    async fn fetch_range(
        &self,
        filter: Option<&[StorageCategory]>,
        range: RowRange,
    ) -> Result<Vec<StoredImage>, StoreError> {
        let categories = category_values(filter);
        let limit = i64::try_from(range.row_count()).unwrap_or(i64::MAX);
        let offset = i64::try_from(range.start).unwrap_or(i64::MAX);

        let rows = PortfolioImageRepo::list_page(&self.pool, categories.as_deref(), limit, offset)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(StoredImage::from).collect())
    }

    async fn count(&self, filter: Option<&[StorageCategory]>) -> Result<u64, StoreError> {
        let categories = category_values(filter);
        let total = PortfolioImageRepo::count(&self.pool, categories.as_deref())
            .await
            .map_err(db_error)?;
        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn list_all(&self) -> Result<Vec<StoredImage>, StoreError> {
        let rows = PortfolioImageRepo::list_all(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(StoredImage::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredImage>, StoreError> {
        let Some(id) = parse_row_id(id) else {
            return Ok(None);
        };
        let row = PortfolioImageRepo::find_by_id(&self.pool, id)
            .await
            .map_err(db_error)?;
        Ok(row.map(StoredImage::from))
    }

    async fn insert(&self, input: &NewPortfolioImage) -> Result<StoredImage, StoreError> {
        let row = PortfolioImageRepo::create(&self.pool, input)
            .await
            .map_err(db_error)?;
        Ok(row.into())
    }

    async fn update(
        &self,
        id: &str,
        patch: &PortfolioImagePatch,
    ) -> Result<Option<StoredImage>, StoreError> {
        let Some(id) = parse_row_id(id) else {
            return Ok(None);
        };
        let row = PortfolioImageRepo::update(&self.pool, id, patch)
            .await
            .map_err(db_error)?;
        Ok(row.map(StoredImage::from))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let Some(id) = parse_row_id(id) else {
            return Ok(false);
        };
        PortfolioImageRepo::delete(&self.pool, id)
            .await
            .map_err(db_error)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(db_error)
    }
}
