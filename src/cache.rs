//! Normalization caching
//!
//! Hash changes and click interception normalize the same handful of raw
//! fragments over and over. Normalization is pure, so its results can be
//! memoized with an LRU eviction policy.

use crate::normalize::normalize_page_id;
use crate::trace_log;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Cache performance statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Memo of raw fragment → canonical id
///
/// Default capacity: 256 entries.
#[derive(Debug)]
pub struct NormalizeCache {
    entries: LruCache<String, String>,
    stats: CacheStats,
}

impl NormalizeCache {
    const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// A capacity of zero is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    /// Normalize `raw`, serving repeated inputs from the cache.
    pub fn normalize(&mut self, raw: &str) -> String {
        if let Some(id) = self.entries.get(raw) {
            self.stats.hits += 1;
            trace_log!("cache" => "hit for '{}'", raw);
            return id.clone();
        }

        self.stats.misses += 1;
        let id = normalize_page_id(raw);
        trace_log!("cache" => "miss for '{}', caching '{}'", raw, id);
        self.entries.push(raw.to_string(), id.clone());
        id
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NormalizeCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_creation() {
        let cache = NormalizeCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_miss_then_hit() {
        let mut cache = NormalizeCache::new();

        assert_eq!(cache.normalize("/layout/repo-mapper.html"), "repo-mapper");
        assert_eq!(cache.stats().misses, 1);

        assert_eq!(cache.normalize("/layout/repo-mapper.html"), "repo-mapper");
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cached_matches_uncached() {
        let mut cache = NormalizeCache::new();
        for raw in ["#faq", "", "#missing", "/github-tools/git-patch/"] {
            let cached = cache.normalize(raw);
            assert_eq!(cached, normalize_page_id(raw));
            assert_eq!(cache.normalize(raw), cached);
        }
    }

    #[test]
    fn test_eviction() {
        let mut cache = NormalizeCache::with_capacity(2);
        cache.normalize("#a");
        cache.normalize("#b");
        cache.normalize("#c");
        assert_eq!(cache.len(), 2);

        cache.normalize("#a");
        assert_eq!(cache.stats().misses, 4);
    }

    #[test]
    fn test_zero_capacity_is_bumped() {
        let mut cache = NormalizeCache::with_capacity(0);
        cache.normalize("#a");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_hit_rate() {
        let mut cache = NormalizeCache::new();
        cache.normalize("#a");
        cache.normalize("#a");
        cache.normalize("#b");
        cache.normalize("#a");
        cache.normalize("#b");
        assert!((cache.stats().hit_rate() - 0.6).abs() < 0.001);
        assert_eq!(cache.len(), 2);
    }
}
