//! Background Sweeper Task
//!
//! Periodically expires stale entries and evicts aggressively when the
//! store's memory estimate is over its threshold.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

// == Sweeper Handle ==
/// Cancellation handle for a running sweeper.
///
/// The spawned task holds a clone of the store's `Arc`; stopping the
/// sweeper releases it. Dropping the handle stops the sweeper as well.
#[derive(Debug)]
pub struct SweeperHandle {
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Cancels the sweeper. Safe to call more than once.
    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawns a background task that sweeps `store` every `interval`.
///
/// Each tick takes the store's write lock and runs `CacheStore::sweep`, so
/// a tick never interleaves with a foreground operation. The first tick
/// fires one full interval after spawning.
///
/// Must be called from within a Tokio runtime.
///
/// # Example
/// ```ignore
/// let store = Arc::new(RwLock::new(CacheStore::new(CacheConfig::default())));
/// let sweeper = spawn_sweeper("general".to_string(), store.clone(), Duration::from_secs(60));
/// // Later, during teardown:
/// sweeper.stop();
/// ```
pub fn spawn_sweeper<K, V>(
    name: String,
    store: Arc<RwLock<CacheStore<K, V>>>,
    interval: Duration,
) -> SweeperHandle
where
    K: Eq + Hash + Clone + Serialize + Send + Sync + 'static,
    V: Serialize + Send + Sync + 'static,
{
    let task = tokio::spawn(async move {
        info!(
            cache = %name,
            "Starting sweeper with interval of {} ms",
            interval.as_millis()
        );

        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let report = {
                let mut guard = store.write().await;
                guard.sweep()
            };

            if report.evicted > 0 {
                info!(
                    cache = %name,
                    expired = report.expired,
                    evicted = report.evicted,
                    estimated_memory = report.estimated_memory,
                    "Memory threshold exceeded, evicted least valuable entries"
                );
            } else if report.expired > 0 {
                info!(cache = %name, "Sweep: removed {} expired entries", report.expired);
            } else {
                debug!(
                    cache = %name,
                    estimated_memory = report.estimated_memory,
                    "Sweep: nothing to remove"
                );
            }
        }
    });

    SweeperHandle { task }
}
