//! Cache Handle Module
//!
//! A lock-guarded store paired with its background sweeper. This is the
//! entry point consumers hold; it owns the store's lifecycle.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::cache::{CacheStats, CacheStore, SweepReport};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::{spawn_sweeper, SweeperHandle};

/// Store shared between foreground callers and the sweeper.
pub type SharedStore<K, V> = Arc<RwLock<CacheStore<K, V>>>;

// == Cache ==
/// A cache instance with its own sweeper.
///
/// Every mutating call, including sweeps, takes the store's write lock, so
/// operations on one cache never interleave. `destroy` stops the sweeper
/// before clearing the store; dropping the cache stops the sweeper too.
#[derive(Debug)]
pub struct Cache<K, V> {
    name: String,
    store: SharedStore<K, V>,
    sweeper: Mutex<Option<SweeperHandle>>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone + Serialize + Send + Sync + 'static,
    V: Clone + Serialize + Send + Sync + 'static,
{
    // == Start ==
    /// Validates `config`, builds the store, and spawns its sweeper.
    ///
    /// Fails with `RuntimeUnavailable` when called outside a Tokio runtime.
    pub fn start(name: impl Into<String>, config: CacheConfig) -> Result<Self> {
        config.validate()?;
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(CacheError::RuntimeUnavailable);
        }

        let name = name.into();
        let interval = config.cleanup_interval;
        info!(
            cache = %name,
            max_size = config.max_size,
            default_ttl_ms = config.default_ttl.as_millis() as u64,
            memory_threshold = config.memory_threshold,
            "Cache started"
        );

        let store = Arc::new(RwLock::new(CacheStore::new(config)));
        let sweeper = spawn_sweeper(name.clone(), store.clone(), interval);

        Ok(Self {
            name,
            store,
            sweeper: Mutex::new(Some(sweeper)),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn set(&self, key: K, value: V, ttl: Option<Duration>) {
        self.store.write().await.set(key, value, ttl);
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.store.write().await.get(key)
    }

    // Write lock: an expired hit is removed
    pub async fn has(&self, key: &K) -> bool {
        self.store.write().await.has(key)
    }

    pub async fn delete(&self, key: &K) -> bool {
        self.store.write().await.delete(key)
    }

    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    /// Runs one sweep tick immediately, outside the regular schedule.
    pub async fn sweep_now(&self) -> SweepReport {
        self.store.write().await.sweep()
    }

    /// Whether the background sweeper is still scheduled.
    pub async fn is_sweeping(&self) -> bool {
        self.sweeper
            .lock()
            .await
            .as_ref()
            .is_some_and(|sweeper| !sweeper.is_finished())
    }

    // == Destroy ==
    /// Cancels the sweeper, then clears the store.
    ///
    /// Idempotent. The cache keeps answering calls afterwards, as an empty
    /// store without a sweeper.
    pub async fn destroy(&self) {
        if let Some(sweeper) = self.sweeper.lock().await.take() {
            sweeper.stop();
            info!(cache = %self.name, "Sweeper stopped");
        }
        self.store.write().await.clear();
    }
}
