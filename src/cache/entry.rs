//! Cache Entry Module
//!
//! Defines the value wrapper stored for each key, with TTL and access bookkeeping.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation instant
    pub created_at: Instant,
    /// Number of successful reads since the entry was (re)written
    pub access_count: u64,
    /// Instant of the last successful read, or creation if never read
    pub last_accessed_at: Instant,
    /// Time to live measured from `created_at`, None = no expiration
    pub ttl: Option<Duration>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped at `now`.
    pub fn new(value: V, ttl: Option<Duration>, now: Instant) -> Self {
        Self {
            value,
            created_at: now,
            access_count: 0,
            last_accessed_at: now,
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired once strictly more than its TTL has elapsed since
    /// creation; at exactly `ttl` it is still live.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.ttl {
            Some(ttl) => self.age(now) > ttl,
            None => false,
        }
    }

    // == Age ==
    /// Time elapsed since creation.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Record Access ==
    /// Bumps the access counter and last-access instant.
    pub fn record_access(&mut self, now: Instant) {
        self.access_count += 1;
        self.last_accessed_at = now;
    }

    /// Returns remaining TTL at `now`, or None if no expiration is set.
    pub fn ttl_remaining(&self, now: Instant) -> Option<Duration> {
        self.ttl.map(|ttl| ttl.saturating_sub(self.age(now)))
    }
}
