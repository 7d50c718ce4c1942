//! Cache Module
//!
//! Provides in-memory caching with TTL expiration, LRU eviction, and
//! memory-pressure sweeps.

mod entry;
mod handle;
mod lru;
mod memory;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::{Cache, SharedStore};
pub use lru::LruTracker;
pub use memory::MemoryEstimator;
pub use stats::{CacheCounters, CacheStats};
pub use store::{CacheStore, SweepReport};
