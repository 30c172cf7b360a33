//! In-memory cache for completed research digests.
//!
//! Caches the final ranked digest keyed by (lowercased query, result
//! limit, source set). Uses [`moka`] for async-friendly caching with
//! configurable TTL and automatic eviction. Each [`crate::ResearchEngine`]
//! owns its own cache; there is no process-wide state.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use moka::future::Cache;

use crate::types::{ResearchDigest, Source};

/// Maximum number of cached digests per engine.
const MAX_CACHE_ENTRIES: u64 = 100;

/// Composite cache key: normalised query + result limit + source set hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Lowercased, trimmed query string.
    query: String,
    /// Result limit in effect for the cached digest.
    max_results: usize,
    /// Hash of the sorted source set, so different source configs
    /// produce different cache entries.
    source_hash: u64,
}

impl CacheKey {
    /// Build a deterministic cache key.
    ///
    /// The query is lowercased and trimmed. The source list is sorted
    /// and hashed so that `[Bing, Reddit]` and `[Reddit, Bing]` produce
    /// the same key.
    pub fn new(query: &str, max_results: usize, sources: &[Source]) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            max_results,
            source_hash: hash_sources(sources),
        }
    }
}

/// TTL-bounded digest cache.
#[derive(Debug, Clone)]
pub struct DigestCache {
    inner: Option<Cache<CacheKey, ResearchDigest>>,
}

impl DigestCache {
    /// Create a cache with the given TTL. A TTL of 0 disables caching
    /// entirely; lookups miss and inserts are dropped.
    pub fn new(ttl_seconds: u64) -> Self {
        let inner = (ttl_seconds > 0).then(|| {
            Cache::builder()
                .max_capacity(MAX_CACHE_ENTRIES)
                .time_to_live(Duration::from_secs(ttl_seconds))
                .build()
        });
        Self { inner }
    }

    /// Look up a cached digest. Returns `None` on miss or when disabled.
    pub async fn get(&self, key: &CacheKey) -> Option<ResearchDigest> {
        match &self.inner {
            Some(cache) => cache.get(key).await,
            None => None,
        }
    }

    /// Insert a digest, unless caching is disabled.
    pub async fn insert(&self, key: CacheKey, digest: ResearchDigest) {
        if let Some(cache) = &self.inner {
            cache.insert(key, digest).await;
        }
    }
}

/// Deterministic, order-independent hash of a source set.
fn hash_sources(sources: &[Source]) -> u64 {
    let mut sorted: Vec<&Source> = sources.iter().collect();
    sorted.sort_by_key(|s| s.name());
    let mut hasher = DefaultHasher::new();
    for source in sorted {
        source.name().hash(&mut hasher);
    }
    hasher.finish()
}
