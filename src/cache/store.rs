//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking, TTL
//! expiration, and memory-pressure eviction.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheCounters, CacheEntry, CacheStats, LruTracker, MemoryEstimator};
use crate::config::CacheConfig;

// == Sweep Report ==
/// Outcome of one background sweep tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Entries removed because their TTL elapsed
    pub expired: usize,
    /// Memory estimate taken after expiration removal
    pub estimated_memory: usize,
    /// Entries removed by aggressive eviction
    pub evicted: usize,
}

// == Cache Store ==
/// Main cache storage with LRU eviction and TTL support.
///
/// Every key in `entries` appears exactly once in `lru`, and `entries.len()`
/// never exceeds `config.max_size` once a public method returns.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Lifetime counters
    counters: CacheCounters,
    config: CacheConfig,
    estimator: MemoryEstimator,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore. The config is not validated here; see
    /// `Cache::start` for the checked entry point.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            counters: CacheCounters::default(),
            estimator: MemoryEstimator::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL.
    ///
    /// Any previous entry under `key` is replaced along with its access
    /// history. Expired entries are purged and, if the store is still over
    /// capacity, least recently used entries are evicted.
    pub fn set(&mut self, key: K, value: V, ttl: Option<Duration>) {
        let now = Instant::now();
        let ttl = ttl.unwrap_or(self.config.default_ttl);

        self.lru.touch(&key);
        self.entries.insert(key, CacheEntry::new(value, Some(ttl), now));

        self.enforce_size(now);
    }

    // == Has ==
    /// Checks whether a live entry exists without touching its bookkeeping.
    ///
    /// An expired entry found here is removed.
    pub fn has(&mut self, key: &K) -> bool {
        let now = Instant::now();
        let Some(entry) = self.entries.get(key) else {
            return false;
        };

        if entry.is_expired(now) {
            self.remove_entry(key);
            self.counters.record_expirations(1);
            return false;
        }
        true
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether the key was present.
    pub fn delete(&mut self, key: &K) -> bool {
        self.remove_entry(key)
    }

    // == Clear ==
    /// Empties the store. Lifetime counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    // == Remove Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn remove_expired(&mut self) -> usize {
        self.remove_expired_at(Instant::now())
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn counters(&self) -> CacheCounters {
        self.counters
    }

    /// Read-only view of an entry's bookkeeping, expired or not.
    pub fn entry(&self, key: &K) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    fn remove_entry(&mut self, key: &K) -> bool {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            true
        } else {
            false
        }
    }

    fn remove_expired_at(&mut self, now: Instant) -> usize {
        let expired_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        self.counters.record_expirations(expired_keys.len());
        expired_keys.len()
    }

    // == Enforce Size ==
    /// Drops expired entries, then evicts from the LRU tail until the store
    /// fits within `max_size`.
    fn enforce_size(&mut self, now: Instant) {
        self.remove_expired_at(now);

        let mut evicted = 0;
        while self.entries.len() > self.config.max_size {
            match self.lru.evict_oldest() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                    evicted += 1;
                }
                None => break,
            }
        }

        if evicted > 0 {
            debug!(evicted, max_size = self.config.max_size, "LRU eviction");
            self.counters.record_evictions(evicted);
        }
    }

    #[cfg(test)]
    pub(crate) fn recency_matches_entries(&self) -> bool {
        self.lru.len() == self.entries.len()
            && self.lru.iter_oldest_first().all(|k| self.entries.contains_key(k))
    }
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A hit bumps the entry's access count and moves it to the recency head.
    /// Expired entries are removed and reported as a miss.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let now = Instant::now();

        let Some(entry) = self.entries.get_mut(key) else {
            self.counters.record_miss();
            return None;
        };

        if entry.is_expired(now) {
            self.remove_entry(key);
            self.counters.record_expirations(1);
            self.counters.record_miss();
            return None;
        }

        entry.record_access(now);
        let value = entry.value.clone();
        self.lru.touch(key);
        self.counters.record_hit();
        Some(value)
    }
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone + Serialize,
    V: Serialize,
{
    // == Estimated Memory ==
    /// Best-effort byte estimate of the current contents.
    pub fn estimated_memory(&self) -> usize {
        self.estimator
            .estimate(self.entries.iter().map(|(key, entry)| (key, &entry.value)))
    }

    // == Stats ==
    /// Returns a snapshot of the store. Does not remove expired entries.
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();

        let expired_count = self
            .entries
            .values()
            .filter(|entry| entry.is_expired(now))
            .count();
        let total_access_count = self.entries.values().map(|entry| entry.access_count).sum();
        let average_age_ms = if self.entries.is_empty() {
            0.0
        } else {
            let total_ms: f64 = self
                .entries
                .values()
                .map(|entry| entry.age(now).as_secs_f64() * 1000.0)
                .sum();
            total_ms / self.entries.len() as f64
        };

        CacheStats {
            size: self.entries.len(),
            max_size: self.config.max_size,
            expired_count,
            average_age_ms,
            total_access_count,
            estimated_memory: self.estimated_memory(),
            memory_threshold: self.config.memory_threshold,
            hits: self.counters.hits,
            misses: self.counters.misses,
            evictions: self.counters.evictions,
            expirations: self.counters.expirations,
        }
    }

    // == Sweep ==
    /// One background sweep tick: expire, estimate, and evict aggressively
    /// when the estimate is above `memory_threshold`.
    pub fn sweep(&mut self) -> SweepReport {
        let expired = self.remove_expired();
        let estimated_memory = self.estimated_memory();

        let evicted = if estimated_memory > self.config.memory_threshold {
            self.evict_least_valuable()
        } else {
            0
        };

        SweepReport {
            expired,
            estimated_memory,
            evicted,
        }
    }

    // == Evict Least Valuable ==
    /// Removes the lowest-ranked `aggressive_eviction_ratio` share of entries
    /// (rounded down), ranked by access count then last access, least first.
    /// Entries tied on both fall back to recency order.
    pub fn evict_least_valuable(&mut self) -> usize {
        let count =
            (self.entries.len() as f64 * self.config.aggressive_eviction_ratio).floor() as usize;
        if count == 0 {
            return 0;
        }

        let mut ranked: Vec<(&K, u64, Instant)> = self
            .lru
            .iter_oldest_first()
            .filter_map(|key| {
                self.entries
                    .get(key)
                    .map(|entry| (key, entry.access_count, entry.last_accessed_at))
            })
            .collect();
        ranked.sort_by_key(|&(_, access_count, last_accessed_at)| (access_count, last_accessed_at));

        let victims: Vec<K> = ranked
            .into_iter()
            .take(count)
            .map(|(key, _, _)| key.clone())
            .collect();

        for key in &victims {
            self.remove_entry(key);
        }

        self.counters.record_evictions(victims.len());
        victims.len()
    }
}
