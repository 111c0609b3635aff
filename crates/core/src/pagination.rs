//! Offset-based pagination for gallery listings.

use serde::Serialize;

use crate::error::CoreError;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated page request: zero-based `page`, `page_size` in `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

/// Inclusive row range `[start, end]` within an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowRange {
    pub start: u64,
    pub end: u64,
}

impl RowRange {
    /// Number of rows covered by the range.
    pub fn row_count(&self) -> u64 {
        self.end - self.start + 1
    }
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Result<Self, CoreError> {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(CoreError::Validation(format!(
                "Page size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }
        Ok(Self { page, page_size })
    }

    /// Build from optional query parameters, applying defaults.
    pub fn from_params(page: Option<u32>, page_size: Option<u32>) -> Result<Self, CoreError> {
        Self::new(page.unwrap_or(0), page_size.unwrap_or(DEFAULT_PAGE_SIZE))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Rows `[page * size, page * size + size - 1]`.
    pub fn range(&self) -> RowRange {
        let start = u64::from(self.page) * u64::from(self.page_size);
        RowRange {
            start,
            end: start + u64::from(self.page_size) - 1,
        }
    }
}

/// Number of pages needed to show `total` rows.
pub fn page_count(total: u64, page_size: u32) -> u64 {
    total.div_ceil(u64::from(page_size.max(1)))
}
