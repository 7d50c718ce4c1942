//! Memory Estimator Module
//!
//! Best-effort byte estimate of a store's contents, used only to decide
//! whether a sweep should evict aggressively.

use serde::Serialize;
use tracing::trace;

use crate::config::CacheConfig;

// == Memory Estimator ==
/// Charges each entry by the length of its JSON serialization.
///
/// The cost of one entry is the UTF-16 length of `(key, value)` serialized
/// with serde_json, multiplied by `bytes_per_char`. Entries that fail to
/// serialize are charged `fallback_entry_bytes` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryEstimator {
    bytes_per_char: usize,
    fallback_entry_bytes: usize,
}

impl MemoryEstimator {
    pub fn new(bytes_per_char: usize, fallback_entry_bytes: usize) -> Self {
        Self {
            bytes_per_char,
            fallback_entry_bytes,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.bytes_per_char, config.fallback_entry_bytes)
    }

    // == Entry Bytes ==
    /// Estimates a single key/value pair. Never fails.
    pub fn entry_bytes<K, V>(&self, key: &K, value: &V) -> usize
    where
        K: Serialize + ?Sized,
        V: Serialize + ?Sized,
    {
        match serde_json::to_string(&(key, value)) {
            Ok(json) => json.encode_utf16().count() * self.bytes_per_char,
            Err(e) => {
                trace!(error = %e, "Entry not serializable, charging fallback cost");
                self.fallback_entry_bytes
            }
        }
    }

    // == Estimate ==
    /// Sums the estimate over every pair yielded by `entries`.
    pub fn estimate<'a, K, V, I>(&self, entries: I) -> usize
    where
        K: Serialize + 'a,
        V: Serialize + 'a,
        I: IntoIterator<Item = (&'a K, &'a V)>,
    {
        entries
            .into_iter()
            .map(|(key, value)| self.entry_bytes(key, value))
            .fold(0usize, usize::saturating_add)
    }
}

impl Default for MemoryEstimator {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}
