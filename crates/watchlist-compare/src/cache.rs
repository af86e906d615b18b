//! Caching layer for company-name lookups to avoid repeated searches

use crate::api::SearchResult;
use cached::{Cached, TimedSizedCache};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Cache key for a lookup: trimmed, lower-cased query text
fn cache_key(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Distinct queries kept before the least recently used one is evicted
pub const DEFAULT_CAPACITY: usize = 256;

/// Thread-safe TTL cache of search results, bounded in size
pub struct LookupCache {
    cache: Arc<RwLock<TimedSizedCache<String, Vec<SearchResult>>>>,
}

impl LookupCache {
    /// Create a new cache with specified TTL and the default capacity
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, DEFAULT_CAPACITY)
    }

    /// Create a cache holding at most `capacity` queries (at least one)
    pub fn with_capacity(ttl: Duration, capacity: usize) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedSizedCache::with_size_and_lifespan(
                capacity.max(1),
                ttl,
            ))),
        }
    }

    /// Get cached results for a query
    pub async fn get(&self, query: &str) -> Option<Vec<SearchResult>> {
        let mut cache = self.cache.write().await;
        cache.cache_get(&cache_key(query)).cloned()
    }

    /// Store results for a query; empty result sets are not cached
    pub async fn insert(&self, query: &str, results: Vec<SearchResult>) {
        if results.is_empty() {
            return;
        }
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(cache_key(query), results);
    }

    /// Get cached results or run the lookup and remember its outcome
    pub async fn get_or_search<F, Fut, E>(
        &self,
        query: &str,
        search: F,
    ) -> Result<Vec<SearchResult>, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Vec<SearchResult>, E>>,
    {
        if let Some(results) = self.get(query).await {
            tracing::debug!("Lookup cache hit for {:?}", query);
            return Ok(results);
        }

        tracing::debug!("Lookup cache miss for {:?}", query);

        let results = search().await?;
        self.insert(query, results.clone()).await;

        Ok(results)
    }

    /// Clear all cached entries
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.cache_clear();
    }

    /// Get the number of cached entries
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    /// Check if the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Clone for LookupCache {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}
