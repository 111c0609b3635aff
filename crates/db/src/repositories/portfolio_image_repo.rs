//! Repository for the `portfolio_images` table.

use catering_core::portfolio::{NewPortfolioImage, PortfolioImagePatch};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::portfolio_image::PortfolioImageRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, image_url, category, created_at, updated_at";

/// Provides listing and CRUD operations for portfolio images.
pub struct PortfolioImageRepo;

impl PortfolioImageRepo {
    /// List one window of images, newest first.
    ///
    /// `categories` of `None` lists every category; `Some` restricts to the
    /// given stored values.
    pub async fn list_page(
        pool: &PgPool,
        categories: Option<&[String]>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PortfolioImageRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM portfolio_images
             WHERE ($1::text[] IS NULL OR category = ANY($1))
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, PortfolioImageRow>(&query)
            .bind(categories)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count images, optionally restricted to the given stored categories.
    pub async fn count(pool: &PgPool, categories: Option<&[String]>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM portfolio_images
             WHERE ($1::text[] IS NULL OR category = ANY($1))",
        )
        .bind(categories)
        .fetch_one(pool)
        .await
    }

    /// List every image, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<PortfolioImageRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM portfolio_images ORDER BY created_at DESC");
        sqlx::query_as::<_, PortfolioImageRow>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<PortfolioImageRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM portfolio_images WHERE id = $1");
        sqlx::query_as::<_, PortfolioImageRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new image, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &NewPortfolioImage,
    ) -> Result<PortfolioImageRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO portfolio_images (title, description, image_url, category)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PortfolioImageRow>(&query)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.category.as_str())
            .fetch_one(pool)
            .await
    }

    /// Update an image. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        input: &PortfolioImagePatch,
    ) -> Result<Option<PortfolioImageRow>, sqlx::Error> {
        let query = format!(
            "UPDATE portfolio_images SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                image_url = COALESCE($4, image_url),
                category = COALESCE($5, category)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PortfolioImageRow>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.category.map(|c| c.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Delete an image by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM portfolio_images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
