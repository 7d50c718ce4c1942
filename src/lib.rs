//! Adaptive Cache - an in-process cache engine
//!
//! Generic key-value stores with per-entry TTL expiration, LRU eviction on
//! size overflow, and a background sweep that evicts the least valuable
//! entries under memory pressure. Named stores are grouped in a registry,
//! which the bundled server exposes over HTTP.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, CacheStats, CacheStore};
pub use config::{CacheConfig, ServerConfig};
pub use error::{CacheError, Result};
pub use registry::CacheRegistry;
