//! TTL response cache keyed by a structured request signature.
//!
//! Uses [`moka`] for async-friendly caching. Unlike a cache-wide TTL, each
//! entry carries its own TTL (supplied at `set` time) through a custom
//! [`Expiry`] policy, so a `get` after the entry's TTL has elapsed behaves
//! as a miss regardless of when physical eviction runs.

use std::time::{Duration, Instant};

use moka::future::Cache;
use moka::Expiry;

use crate::types::{
    DomainTile, LocationSignature, ResultItem, SearchFilters, SearchRequest, SortBy, Source,
};

/// Maximum number of cached entries.
const MAX_CACHE_ENTRIES: u64 = 512;

/// Composite cache key: every parameter that affects a response.
///
/// A structured tuple with derived equality/hash, not a delimited string,
/// so two distinct logical requests can never collide through unescaped
/// delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Lowercased, trimmed query text.
    query: String,
    source_selector: String,
    page: u32,
    limit: u32,
    sort: SortBy,
    country_code: String,
    location: String,
    filters: SearchFilters,
    site_override: String,
}

impl CacheKey {
    /// Build the key for a request and its resolved location signature.
    pub fn for_request(
        request: &SearchRequest,
        signature: &LocationSignature,
        effective_limit: u32,
    ) -> Self {
        Self {
            query: request.query.trim().to_lowercase(),
            source_selector: request.source_selector.key().to_string(),
            page: request.page.max(1),
            limit: effective_limit,
            sort: request.sort,
            country_code: signature.country_code.clone(),
            location: signature.canonical.clone(),
            filters: request.filters.clone(),
            site_override: request.site_override.clone().unwrap_or_default(),
        }
    }
}

/// The cacheable portion of an assembled response: everything computed
/// before pagination metadata.
#[derive(Debug, Clone)]
pub struct CachedPayload {
    pub results: Vec<ResultItem>,
    pub sources: Vec<Source>,
    pub tabs: Vec<DomainTile>,
    pub corrected_query: Option<String>,
    pub related_searches: Vec<String>,
}

struct Entry<V> {
    value: V,
    ttl: Duration,
}

impl<V: Clone> Clone for Entry<V> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            ttl: self.ttl,
        }
    }
}

/// Per-entry expiry: each entry lives exactly as long as the TTL it was
/// stored with.
struct PerEntryTtl;

impl<K, V> Expiry<K, Entry<V>> for PerEntryTtl {
    fn expire_after_create(&self, _key: &K, entry: &Entry<V>, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    // Overwriting a key restarts the clock with the new entry's TTL.
    fn expire_after_update(
        &self,
        _key: &K,
        entry: &Entry<V>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Generic TTL key→value store.
///
/// `get` after the entry's TTL has elapsed returns `None`; overwriting a
/// key resets its clock to the new TTL. Concurrent operations on distinct
/// keys never interfere; concurrent `set` on one key is last-write-wins.
pub struct TtlCache<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Cache<K, Entry<V>>,
}

impl<K, V> TtlCache<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(MAX_CACHE_ENTRIES)
                .expire_after(PerEntryTtl)
                .build(),
        }
    }

    /// Look up a live (unexpired) value.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key).await.map(|entry| entry.value)
    }

    /// Store a value with its own TTL. A zero TTL stores nothing.
    pub async fn set(&self, key: K, value: V, ttl: Duration) {
        if ttl.is_zero() {
            return;
        }
        self.inner.insert(key, Entry { value, ttl }).await;
    }

    /// Remove a key outright.
    pub async fn delete(&self, key: &K) {
        self.inner.invalidate(key).await;
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// The orchestrator's response cache.
pub type ResponseCache = TtlCache<CacheKey, CachedPayload>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SourceSelector, TimeRange};

    fn request(query: &str) -> SearchRequest {
        SearchRequest::new(query)
    }

    fn key_for(request: &SearchRequest) -> CacheKey {
        CacheKey::for_request(request, &LocationSignature::default(), 10)
    }

    #[test]
    fn key_deterministic_for_same_inputs() {
        let a = key_for(&request("rust programming"));
        let b = key_for(&request("rust programming"));
        assert_eq!(a, b);
    }

    #[test]
    fn key_normalises_query_case_and_whitespace() {
        let a = key_for(&request("  RUST Programming "));
        let b = key_for(&request("rust programming"));
        assert_eq!(a, b);
    }

    #[test]
    fn key_differs_when_query_differs() {
        assert_ne!(key_for(&request("rust")), key_for(&request("python")));
    }

    #[test]
    fn key_differs_when_page_differs() {
        let mut second_page = request("ai");
        second_page.page = 2;
        assert_ne!(key_for(&request("ai")), key_for(&second_page));
    }

    #[test]
    fn key_differs_when_sort_differs() {
        let mut recent = request("ai");
        recent.sort = SortBy::Recent;
        assert_ne!(key_for(&request("ai")), key_for(&recent));
    }

    #[test]
    fn key_differs_when_country_differs() {
        let base = request("ai");
        let us = LocationSignature {
            country_code: "us".into(),
            ..Default::default()
        };
        let de = LocationSignature {
            country_code: "de".into(),
            ..Default::default()
        };
        assert_ne!(
            CacheKey::for_request(&base, &us, 10),
            CacheKey::for_request(&base, &de, 10)
        );
    }

    #[test]
    fn key_differs_when_time_range_differs() {
        let base = request("ai");
        let mut weekly = request("ai");
        weekly.filters.time_range = TimeRange::Week;
        assert_ne!(key_for(&base), key_for(&weekly));
    }

    #[test]
    fn key_differs_when_selector_differs() {
        let base = request("ai");
        let mut scoped = request("ai");
        scoped.source_selector = SourceSelector::One("amazon.com".into());
        assert_ne!(key_for(&base), key_for(&scoped));
    }

    #[test]
    fn key_differs_when_site_override_differs() {
        let base = request("ai");
        let mut overridden = request("ai");
        overridden.site_override = Some("ebay.com".into());
        assert_ne!(key_for(&base), key_for(&overridden));
    }

    #[tokio::test]
    async fn miss_returns_none() {
        let cache: TtlCache<String, u32> = TtlCache::new();
        assert_eq!(cache.get(&"absent".to_string()).await, None);
    }

    #[tokio::test]
    async fn set_and_get_round_trip() {
        let cache: TtlCache<String, u32> = TtlCache::new();
        cache
            .set("k".to_string(), 42, Duration::from_secs(60))
            .await;
        assert_eq!(cache.get(&"k".to_string()).await, Some(42));
    }

    #[tokio::test]
    async fn entry_expires_after_its_ttl() {
        let cache: TtlCache<String, u32> = TtlCache::new();
        cache
            .set("k".to_string(), 7, Duration::from_millis(100))
            .await;
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(cache.get(&"k".to_string()).await, None);
    }

    #[tokio::test]
    async fn overwrite_resets_ttl_clock() {
        let cache: TtlCache<String, u32> = TtlCache::new();
        cache
            .set("k".to_string(), 1, Duration::from_millis(80))
            .await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        cache
            .set("k".to_string(), 2, Duration::from_millis(200))
            .await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        // 150ms after the first set, but only 100ms into the second TTL.
        assert_eq!(cache.get(&"k".to_string()).await, Some(2));
    }

    #[tokio::test]
    async fn delete_removes_entry() {
        let cache: TtlCache<String, u32> = TtlCache::new();
        cache
            .set("k".to_string(), 9, Duration::from_secs(60))
            .await;
        cache.delete(&"k".to_string()).await;
        assert_eq!(cache.get(&"k".to_string()).await, None);
    }

    #[tokio::test]
    async fn zero_ttl_stores_nothing() {
        let cache: TtlCache<String, u32> = TtlCache::new();
        cache.set("k".to_string(), 5, Duration::ZERO).await;
        assert_eq!(cache.get(&"k".to_string()).await, None);
    }

    #[tokio::test]
    async fn distinct_keys_cached_independently() {
        let cache: TtlCache<String, u32> = TtlCache::new();
        cache
            .set("a".to_string(), 1, Duration::from_secs(60))
            .await;
        cache
            .set("b".to_string(), 2, Duration::from_secs(60))
            .await;
        assert_eq!(cache.get(&"a".to_string()).await, Some(1));
        assert_eq!(cache.get(&"b".to_string()).await, Some(2));
    }
}
