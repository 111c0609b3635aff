//! Row model for the `portfolio_images` table.

use catering_core::portfolio::StoredImage;
use catering_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `portfolio_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PortfolioImageRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub category: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<PortfolioImageRow> for StoredImage {
    fn from(row: PortfolioImageRow) -> Self {
        Self {
            id: row.id.to_string(),
            title: row.title,
            description: row.description,
            image_url: row.image_url,
            category: row.category,
            created_at: row.created_at,
        }
    }
}
