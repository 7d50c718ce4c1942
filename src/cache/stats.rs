//! Cache Statistics Module
//!
//! Lifetime counters kept by the store and the point-in-time snapshot
//! returned by `CacheStore::stats`.

use serde::Serialize;

// == Cache Counters ==
/// Running totals updated by store operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheCounters {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Entries removed by LRU or aggressive eviction
    pub evictions: u64,
    /// Entries removed because their TTL elapsed
    pub expirations: u64,
}

impl CacheCounters {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }
}

// == Cache Stats ==
/// Snapshot of a store's contents and counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Current number of entries
    pub size: usize,
    /// Entry-count ceiling
    pub max_size: usize,
    /// Entries whose TTL has elapsed but which have not been removed yet
    pub expired_count: usize,
    /// Mean time since creation across entries, in milliseconds
    pub average_age_ms: f64,
    /// Sum of access counts across entries
    pub total_access_count: u64,
    /// Estimated byte footprint
    pub estimated_memory: usize,
    /// Byte estimate that triggers aggressive eviction
    pub memory_threshold: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// True when the memory estimate exceeds the threshold.
    pub fn over_threshold(&self) -> bool {
        self.estimated_memory > self.memory_threshold
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_default() {
        let counters = CacheCounters::default();
        assert_eq!(counters.hits, 0);
        assert_eq!(counters.misses, 0);
        assert_eq!(counters.evictions, 0);
        assert_eq!(counters.expirations, 0);
    }

    #[test]
    fn test_counters_record() {
        let mut counters = CacheCounters::default();
        counters.record_hit();
        counters.record_miss();
        counters.record_miss();
        counters.record_evictions(3);
        counters.record_expirations(2);

        assert_eq!(counters.hits, 1);
        assert_eq!(counters.misses, 2);
        assert_eq!(counters.evictions, 3);
        assert_eq!(counters.expirations, 2);
    }

    #[test]
    fn test_hit_rate() {
        let mut stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);

        stats.hits = 1;
        stats.misses = 1;
        assert_eq!(stats.hit_rate(), 0.5);

        stats.misses = 0;
        assert_eq!(stats.hit_rate(), 1.0);
    }

    #[test]
    fn test_over_threshold() {
        let stats = CacheStats {
            estimated_memory: 2048,
            memory_threshold: 1024,
            ..Default::default()
        };
        assert!(stats.over_threshold());

        let stats = CacheStats {
            estimated_memory: 1024,
            memory_threshold: 1024,
            ..Default::default()
        };
        assert!(!stats.over_threshold());
    }

    #[test]
    fn test_stats_serialize() {
        let stats = CacheStats {
            size: 3,
            max_size: 10,
            ..Default::default()
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["size"], 3);
        assert_eq!(json["max_size"], 10);
        assert_eq!(json["expired_count"], 0);
    }
}
