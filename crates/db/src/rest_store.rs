//! [`PortfolioStore`] backed by a hosted REST query interface.
//!
//! Requests follow PostgREST conventions under `{url}/rest/v1/{table}`:
//! filters as `column=op.value` query pairs, ordering via `order=`, windows
//! via `offset`/`limit`, and counts via `Prefer: count=exact` with the total
//! read from the `Content-Range` response header.

use std::time::Duration;

use async_trait::async_trait;
use catering_core::category::StorageCategory;
use catering_core::pagination::RowRange;
use catering_core::portfolio::{NewPortfolioImage, PortfolioImagePatch, StoredImage};
use catering_core::store::{PortfolioStore, StoreError};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_RANGE};
use serde::Serialize;

use crate::parse_row_id;

pub const DEFAULT_TABLE: &str = "portfolio_images";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const SELECT_COLUMNS: &str = "id,title,description,image_url,category,created_at";
const ORDER_NEWEST_FIRST: &str = "created_at.desc";

/// Connection settings for [`RestPortfolioStore`].
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL of the store, e.g. `https://project.example.co`.
    pub url: String,
    /// Access credential sent as `apikey` and bearer token.
    pub api_key: String,
    pub table: String,
    pub timeout: Duration,
}

impl RestConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            table: DEFAULT_TABLE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Full URL of the table endpoint.
    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), self.table)
    }
}

pub struct RestPortfolioStore {
    client: reqwest::Client,
    table_url: String,
}

#[derive(Serialize)]
struct InsertBody<'a> {
    title: &'a str,
    description: Option<&'a str>,
    image_url: &'a str,
    category: &'static str,
}

#[derive(Serialize)]
struct PatchBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'static str>,
}

impl RestPortfolioStore {
    /// Build a client that authenticates every request with the configured key.
    pub fn new(config: &RestConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| StoreError::Request(format!("invalid API key header: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| StoreError::Request(format!("invalid API key header: {e}")))?;
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(request_error)?;

        Ok(Self {
            client,
            table_url: config.table_url(),
        })
    }

    // ---- private helpers ----

    async fn fetch_rows(
        &self,
        query: &[(&'static str, String)],
    ) -> Result<Vec<StoredImage>, StoreError> {
        let response = self
            .client
            .get(&self.table_url)
            .query(query)
            .send()
            .await
            .map_err(request_error)?;
        parse_rows(response).await
    }

    /// `HEAD` request whose `Content-Range` carries the exact row count.
    fn count_request(&self, filter: Option<&[StorageCategory]>) -> reqwest::RequestBuilder {
        self.client
            .head(&self.table_url)
            .query(&count_query(filter))
            .header("Prefer", "count=exact")
    }

    fn write_request(
        &self,
        method: reqwest::Method,
        id: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, &self.table_url)
            .header("Prefer", "return=representation");
        if let Some(id) = id {
            builder = builder.query(&[("id", eq_filter(id))]);
        }
        builder
    }
}

#[async_trait]
impl PortfolioStore for RestPortfolioStore {
    async fn fetch_range(
        &self,
        filter: Option<&[StorageCategory]>,
        range: RowRange,
    ) -> Result<Vec<StoredImage>, StoreError> {
        self.fetch_rows(&range_query(filter, range)).await
    }

    async fn count(&self, filter: Option<&[StorageCategory]>) -> Result<u64, StoreError> {
        let response = self
            .count_request(filter)
            .send()
            .await
            .map_err(request_error)?;
        let response = ensure_success(response).await?;

        let header = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| StoreError::Decode("missing Content-Range header".into()))?;
        parse_content_range_total(header)
            .ok_or_else(|| StoreError::Decode(format!("unparsable Content-Range '{header}'")))
    }

    async fn list_all(&self) -> Result<Vec<StoredImage>, StoreError> {
        self.fetch_rows(&listing_query(None)).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredImage>, StoreError> {
        if parse_row_id(id).is_none() {
            return Ok(None);
        }
        let query = [
            ("select", SELECT_COLUMNS.to_string()),
            ("id", eq_filter(id)),
            ("limit", "1".to_string()),
        ];
        Ok(self.fetch_rows(&query).await?.into_iter().next())
    }

    async fn insert(&self, input: &NewPortfolioImage) -> Result<StoredImage, StoreError> {
        let body = InsertBody {
            title: input.title.trim(),
            description: input.description.as_deref(),
            image_url: &input.image_url,
            category: input.category.as_str(),
        };
        let response = self
            .write_request(reqwest::Method::POST, None)
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        parse_rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no rows".into()))
    }

    async fn update(
        &self,
        id: &str,
        patch: &PortfolioImagePatch,
    ) -> Result<Option<StoredImage>, StoreError> {
        if parse_row_id(id).is_none() {
            return Ok(None);
        }
        let body = PatchBody {
            title: patch.title.as_deref().map(str::trim),
            description: patch.description.as_deref(),
            image_url: patch.image_url.as_deref(),
            category: patch.category.map(StorageCategory::as_str),
        };
        let response = self
            .write_request(reqwest::Method::PATCH, Some(id))
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;
        Ok(parse_rows(response).await?.into_iter().next())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        if parse_row_id(id).is_none() {
            return Ok(false);
        }
        let response = self
            .write_request(reqwest::Method::DELETE, Some(id))
            .send()
            .await
            .map_err(request_error)?;
        Ok(!parse_rows(response).await?.is_empty())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let response = self
            .client
            .get(&self.table_url)
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await
            .map_err(request_error)?;
        ensure_success(response).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Request and response helpers
// ---------------------------------------------------------------------------

fn request_error(err: reqwest::Error) -> StoreError {
    if err.is_decode() {
        StoreError::Decode(err.to_string())
    } else {
        StoreError::Request(err.to_string())
    }
}

/// Return the response unchanged on a 2xx status, or a
/// [`StoreError::Status`] carrying the status and body text.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        tracing::warn!(
            status = status.as_u16(),
            body = %body,
            "Portfolio store rejected request",
        );
        return Err(StoreError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

async fn parse_rows(response: reqwest::Response) -> Result<Vec<StoredImage>, StoreError> {
    let response = ensure_success(response).await?;
    response
        .json::<Vec<StoredImage>>()
        .await
        .map_err(|e| StoreError::Decode(e.to_string()))
}

/// Query pairs for a filtered, newest-first listing.
fn listing_query(filter: Option<&[StorageCategory]>) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("select", SELECT_COLUMNS.to_string()),
        ("order", ORDER_NEWEST_FIRST.to_string()),
    ];
    if let Some(value) = filter.and_then(category_filter) {
        query.push(("category", value));
    }
    query
}

/// Listing pairs plus the `offset`/`limit` window covering `range`.
fn range_query(
    filter: Option<&[StorageCategory]>,
    range: RowRange,
) -> Vec<(&'static str, String)> {
    let mut query = listing_query(filter);
    query.push(("offset", range.start.to_string()));
    query.push(("limit", range.row_count().to_string()));
    query
}

fn count_query(filter: Option<&[StorageCategory]>) -> Vec<(&'static str, String)> {
    let mut query = vec![("select", "id".to_string())];
    if let Some(value) = filter.and_then(category_filter) {
        query.push(("category", value));
    }
    query
}

/// `in.(a,b,...)` filter for the given categories, or `None` if empty.
fn category_filter(categories: &[StorageCategory]) -> Option<String> {
    if categories.is_empty() {
        return None;
    }
    let values: Vec<&str> = categories.iter().map(|c| c.as_str()).collect();
    Some(format!("in.({})", values.join(",")))
}

fn eq_filter(value: &str) -> String {
    format!("eq.{value}")
}

/// Total row count from a `Content-Range` value such as `0-19/25` or `*/0`.
fn parse_content_range_total(value: &str) -> Option<u64> {
    let (_, total) = value.trim().rsplit_once('/')?;
    total.parse().ok()
}
