//! In-memory caches with TTL support.
//!
//! Two caches back the scraping pipeline: `PAGE_CACHE` holds raw page bodies
//! keyed by exact URL, `EVENT_CACHE` holds resolved event details keyed by
//! event name (memoizing the lookup and JSON extraction on top of the page
//! cache). Both expire entries after a fixed window; expired entries are
//! dropped on read and recomputed by the caller.
//!
//! A single-flight registry coalesces concurrent misses for the same URL so
//! simultaneous render passes produce at most one in-flight request per key.

use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, LazyLock};
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, instrument, warn};

use crate::data_fetcher::models::EventDetail;

pub static PAGE_CACHE: LazyLock<RwLock<LruCache<String, CachedPage>>> =
    LazyLock::new(|| RwLock::new(LruCache::new(NonZeroUsize::new(100).unwrap())));

pub static EVENT_CACHE: LazyLock<RwLock<LruCache<String, CachedEvent>>> =
    LazyLock::new(|| RwLock::new(LruCache::new(NonZeroUsize::new(50).unwrap())));

static INFLIGHT_FETCHES: LazyLock<Mutex<HashMap<String, Arc<Mutex<()>>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Cached page body with TTL support
#[derive(Debug, Clone)]
pub struct CachedPage {
    pub body: String,
    pub cached_at: Instant,
    pub ttl_seconds: u64,
}

impl CachedPage {
    pub fn new(body: String, ttl_seconds: u64) -> Self {
        Self {
            body,
            cached_at: Instant::now(),
            ttl_seconds,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.cached_at.elapsed() > Duration::from_secs(self.ttl_seconds)
    }
}

/// Cached resolved event detail with TTL support
#[derive(Debug, Clone)]
pub struct CachedEvent {
    pub detail: EventDetail,
    pub cached_at: Instant,
    pub ttl_seconds: u64,
}

impl CachedEvent {
    pub fn new(detail: EventDetail, ttl_seconds: u64) -> Self {
        Self {
            detail,
            cached_at: Instant::now(),
            ttl_seconds,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.cached_at.elapsed() > Duration::from_secs(self.ttl_seconds)
    }
}

/// Caches a fetched page body
#[instrument(skip(url, body), fields(url = %url))]
pub async fn cache_page(url: String, body: String, ttl_seconds: u64) {
    debug!(
        "Caching page body: url={}, size={}, ttl={}s",
        url,
        body.len(),
        ttl_seconds
    );

    let mut cache = PAGE_CACHE.write().await;
    cache.put(url, CachedPage::new(body, ttl_seconds));
}

/// Retrieves a cached page body if it's not expired
#[instrument(skip(url), fields(url = %url))]
pub async fn get_cached_page(url: &str) -> Option<String> {
    let mut cache = PAGE_CACHE.write().await;

    if let Some(entry) = cache.get(url) {
        if !entry.is_expired() {
            debug!(
                "Page cache hit: url={}, age={:?}",
                url,
                entry.cached_at.elapsed()
            );
            return Some(entry.body.clone());
        }
        warn!(
            "Removing expired page cache entry: url={}, age={:?}, ttl={:?}",
            url,
            entry.cached_at.elapsed(),
            Duration::from_secs(entry.ttl_seconds)
        );
        cache.pop(url);
    } else {
        debug!("Page cache miss: url={}", url);
    }

    None
}

/// Caches a resolved event detail keyed by event name
#[instrument(skip(event_name, detail), fields(event_name = %event_name))]
pub async fn cache_event_detail(event_name: String, detail: EventDetail, ttl_seconds: u64) {
    debug!(
        "Caching event detail: event_name={}, ttl={}s",
        event_name, ttl_seconds
    );

    let mut cache = EVENT_CACHE.write().await;
    cache.put(event_name, CachedEvent::new(detail, ttl_seconds));
}

/// Retrieves a cached event detail if it's not expired
#[instrument(skip(event_name), fields(event_name = %event_name))]
pub async fn get_cached_event_detail(event_name: &str) -> Option<EventDetail> {
    let mut cache = EVENT_CACHE.write().await;

    if let Some(entry) = cache.get(event_name) {
        if !entry.is_expired() {
            debug!(
                "Event cache hit: event_name={}, age={:?}",
                event_name,
                entry.cached_at.elapsed()
            );
            return Some(entry.detail.clone());
        }
        warn!(
            "Removing expired event cache entry: event_name={}, age={:?}",
            event_name,
            entry.cached_at.elapsed()
        );
        cache.pop(event_name);
    } else {
        debug!("Event cache miss: event_name={}", event_name);
    }

    None
}

/// Returns the single-flight slot for a URL. Callers lock the returned mutex
/// for the duration of their fetch; concurrent misses for the same URL queue
/// on the same slot and re-check the cache once they acquire it.
pub async fn fetch_slot(url: &str) -> Arc<Mutex<()>> {
    let mut slots = INFLIGHT_FETCHES.lock().await;

    // Drop slots nobody is waiting on so the registry stays bounded.
    if slots.len() > 64 {
        slots.retain(|_, slot| Arc::strong_count(slot) > 1);
    }

    slots
        .entry(url.to_string())
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone()
}

/// Gets the current page cache size for monitoring purposes
#[allow(dead_code)]
pub async fn get_page_cache_size() -> usize {
    PAGE_CACHE.read().await.len()
}

/// Gets the current event cache size for monitoring purposes
#[allow(dead_code)]
pub async fn get_event_cache_size() -> usize {
    EVENT_CACHE.read().await.len()
}

/// Clears all page cache entries
pub async fn clear_page_cache() {
    PAGE_CACHE.write().await.clear();
}

/// Clears all event cache entries
pub async fn clear_event_cache() {
    EVENT_CACHE.write().await.clear();
}

/// Clears all caches (useful for testing and debugging)
pub async fn clear_all_caches() {
    clear_page_cache().await;
    clear_event_cache().await;
}

/// Cache information structure
#[derive(Debug, Clone)]
pub struct CacheInfo {
    pub size: usize,
    pub capacity: usize,
}

/// Combined cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub page_cache: CacheInfo,
    pub event_cache: CacheInfo,
}

/// Gets combined cache statistics for monitoring purposes
pub async fn get_all_cache_stats() -> CacheStats {
    let (page_cache, event_cache) = tokio::join!(PAGE_CACHE.read(), EVENT_CACHE.read());

    CacheStats {
        page_cache: CacheInfo {
            size: page_cache.len(),
            capacity: page_cache.cap().get(),
        },
        event_cache: CacheInfo {
            size: event_cache.len(),
            capacity: event_cache.cap().get(),
        },
    }
}
