//! Backing stores for the portfolio gallery.
//!
//! - [`pg_store::PgPortfolioStore`]: PostgreSQL via sqlx, built on
//!   [`repositories::PortfolioImageRepo`].
//! - [`rest_store::RestPortfolioStore`]: a hosted REST query interface
//!   following PostgREST conventions.

pub mod models;
pub mod pg_store;
pub mod repositories;
pub mod rest_store;

use sqlx::postgres::PgPoolOptions;

pub use pg_store::PgPortfolioStore;
pub use rest_store::{RestConfig, RestPortfolioStore};

pub type DbPool = sqlx::PgPool;

/// Row ids are UUIDs. Any other id cannot match a row, so both stores treat
/// it as missing instead of sending it to the backend.
pub(crate) fn parse_row_id(id: &str) -> Option<uuid::Uuid> {
    uuid::Uuid::parse_str(id).ok()
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
