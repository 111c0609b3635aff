//! Short-lived read cache for gallery pages.
//!
//! Entries expire `ttl` after insertion. Expiry is checked lazily: [`ImageCache::get`]
//! evicts the entry it finds stale, and [`ImageCache::set`] sweeps every stale
//! entry before inserting, so keys that are never requested again do not
//! accumulate. There is no background task. The cache is
//! process-local: [`ImageCache::clear`] only affects this process, so other
//! replicas keep serving their own entries until those expire.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::category::UiCategory;
use crate::clock::{Clock, SystemClock};
use crate::pagination::PageRequest;
use crate::portfolio::PortfolioImage;

/// Default time-to-live for cached pages.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Identifies one gallery query: category filter, page index and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub category: Option<UiCategory>,
    pub page: u32,
    pub page_size: u32,
}

impl CacheKey {
    pub fn new(category: Option<UiCategory>, request: PageRequest) -> Self {
        Self {
            category,
            page: request.page(),
            page_size: request.page_size(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let category = self.category.map_or("all", UiCategory::as_str);
        write!(f, "{category}:{}:{}", self.page, self.page_size)
    }
}

struct CacheEntry {
    images: Vec<PortfolioImage>,
    inserted_at: Instant,
}

/// Time-expiring map from [`CacheKey`] to a page of images.
pub struct ImageCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl ImageCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// A cache with the default TTL reading the system clock.
    pub fn with_default_ttl() -> Self {
        Self::new(DEFAULT_CACHE_TTL, Arc::new(SystemClock))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached page for `key`, evicting it if it has expired.
    pub fn get(&self, key: &CacheKey) -> Option<Vec<PortfolioImage>> {
        let now = self.clock.now();
        let mut entries = self.lock();

        let expired = match entries.get(key) {
            None => return None,
            Some(entry) => self.is_expired(entry, now),
        };

        if expired {
            entries.remove(key);
            tracing::debug!(key = %key, "Gallery cache entry expired");
            return None;
        }

        entries.get(key).map(|entry| entry.images.clone())
    }

    /// Store `images` under `key`, replacing any previous entry.
    ///
    /// Expired entries are dropped first.
    pub fn set(&self, key: CacheKey, images: Vec<PortfolioImage>) {
        let now = self.clock.now();
        let mut entries = self.lock();

        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry, now));
        let swept = before - entries.len();
        if swept > 0 {
            tracing::debug!(swept, "Swept expired gallery cache entries");
        }

        entries.insert(
            key,
            CacheEntry {
                images,
                inserted_at: now,
            },
        );
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut entries = self.lock();
        let dropped = entries.len();
        entries.clear();
        tracing::debug!(dropped, "Gallery cache cleared");
    }

    /// Number of entries currently held, including ones not yet found expired.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_expired(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.inserted_at) > self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        // A panic while holding the lock cannot leave the map half-written.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.len())
            .finish()
    }
}
