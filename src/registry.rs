//! Cache Registry Module
//!
//! Named, independently configured caches behind one facade.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::cache::{Cache, CacheStats};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

/// Name of the general-purpose cache in the preset registry.
pub const GENERAL: &str = "general";
/// Name of the long-lived domain-object cache in the preset registry.
pub const OBJECTS: &str = "objects";
/// Name of the short-lived, high-churn cache in the preset registry.
pub const EPHEMERAL: &str = "ephemeral";

// == Cache Registry ==
/// Holds caches by name. Entries are never shared between caches, and each
/// cache runs its own sweeper.
#[derive(Debug)]
pub struct CacheRegistry<K, V> {
    caches: HashMap<String, Cache<K, V>>,
    default_name: String,
}

impl<K, V> CacheRegistry<K, V>
where
    K: Eq + Hash + Clone + Serialize + Send + Sync + 'static,
    V: Clone + Serialize + Send + Sync + 'static,
{
    /// Creates a registry with a single cache registered as the default.
    pub fn new(default_name: impl Into<String>, config: CacheConfig) -> Result<Self> {
        let default_name = default_name.into();
        let mut registry = Self {
            caches: HashMap::new(),
            default_name: default_name.clone(),
        };
        registry.register(default_name, config)?;
        Ok(registry)
    }

    /// Builds the reference deployment: `general` from `general`, plus the
    /// `objects` and `ephemeral` presets.
    pub fn with_presets(general: CacheConfig) -> Result<Self> {
        let mut registry = Self::new(GENERAL, general)?;
        registry.register(OBJECTS, CacheConfig::objects())?;
        registry.register(EPHEMERAL, CacheConfig::ephemeral())?;
        Ok(registry)
    }

    // == Register ==
    /// Starts a new cache under `name`.
    pub fn register(&mut self, name: impl Into<String>, config: CacheConfig) -> Result<()> {
        let name = name.into();
        if self.caches.contains_key(&name) {
            return Err(CacheError::DuplicateNamespace(name));
        }

        let cache = Cache::start(name.clone(), config)?;
        self.caches.insert(name.clone(), cache);
        info!(cache = %name, "Registered cache");
        Ok(())
    }

    // == Lookup ==
    pub fn cache(&self, name: &str) -> Result<&Cache<K, V>> {
        self.caches
            .get(name)
            .ok_or_else(|| CacheError::UnknownNamespace(name.to_string()))
    }

    pub fn default_cache(&self) -> Result<&Cache<K, V>> {
        self.cache(&self.default_name)
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.caches.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    // == Facade ==
    pub async fn set(&self, name: &str, key: K, value: V, ttl: Option<Duration>) -> Result<()> {
        self.cache(name)?.set(key, value, ttl).await;
        Ok(())
    }

    pub async fn get(&self, name: &str, key: &K) -> Result<Option<V>> {
        Ok(self.cache(name)?.get(key).await)
    }

    pub async fn has(&self, name: &str, key: &K) -> Result<bool> {
        Ok(self.cache(name)?.has(key).await)
    }

    pub async fn delete(&self, name: &str, key: &K) -> Result<bool> {
        Ok(self.cache(name)?.delete(key).await)
    }

    /// Clears the default cache only.
    pub async fn clear(&self) -> Result<()> {
        self.default_cache()?.clear().await;
        Ok(())
    }

    pub async fn clear_namespace(&self, name: &str) -> Result<()> {
        self.cache(name)?.clear().await;
        Ok(())
    }

    /// Stats snapshot of every cache, keyed by name.
    pub async fn stats(&self) -> BTreeMap<String, CacheStats> {
        let mut all = BTreeMap::new();
        for (name, cache) in &self.caches {
            all.insert(name.clone(), cache.stats().await);
        }
        all
    }

    // == Destroy ==
    /// Tears down every cache: sweepers stopped, stores cleared.
    pub async fn destroy(&self) {
        for cache in self.caches.values() {
            cache.destroy().await;
        }
        info!("Registry destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Registry = CacheRegistry<String, u32>;

    fn key(k: &str) -> String {
        k.to_string()
    }

    #[tokio::test]
    async fn test_presets_registered() {
        let registry = Registry::with_presets(CacheConfig::default()).unwrap();

        assert_eq!(registry.names(), vec![EPHEMERAL, GENERAL, OBJECTS]);
        assert_eq!(registry.default_name(), GENERAL);

        let stats = registry.stats().await;
        assert_eq!(stats[GENERAL].max_size, 1000);
        assert_eq!(stats[OBJECTS].max_size, 500);
        assert_eq!(stats[EPHEMERAL].max_size, 100);
        assert_eq!(stats[EPHEMERAL].memory_threshold, 2 * 1024 * 1024);

        registry.destroy().await;
    }

    #[tokio::test]
    async fn test_namespaces_are_isolated() {
        let registry = Registry::with_presets(CacheConfig::default()).unwrap();

        registry.set(GENERAL, key("k"), 1, None).await.unwrap();
        registry.set(OBJECTS, key("k"), 2, None).await.unwrap();

        assert_eq!(registry.get(GENERAL, &key("k")).await.unwrap(), Some(1));
        assert_eq!(registry.get(OBJECTS, &key("k")).await.unwrap(), Some(2));
        assert!(!registry.has(EPHEMERAL, &key("k")).await.unwrap());

        assert!(registry.delete(OBJECTS, &key("k")).await.unwrap());
        assert!(registry.has(GENERAL, &key("k")).await.unwrap());

        registry.destroy().await;
    }

    #[tokio::test]
    async fn test_clear_only_affects_default() {
        let registry = Registry::with_presets(CacheConfig::default()).unwrap();

        registry.set(GENERAL, key("a"), 1, None).await.unwrap();
        registry.set(EPHEMERAL, key("b"), 2, None).await.unwrap();

        registry.clear().await.unwrap();

        let stats = registry.stats().await;
        assert_eq!(stats[GENERAL].size, 0);
        assert_eq!(stats[GENERAL].expired_count, 0);
        assert_eq!(stats[EPHEMERAL].size, 1);

        registry.clear_namespace(EPHEMERAL).await.unwrap();
        assert_eq!(registry.stats().await[EPHEMERAL].size, 0);

        registry.destroy().await;
    }

    #[tokio::test]
    async fn test_unknown_namespace() {
        let registry = Registry::new("only", CacheConfig::default()).unwrap();

        let result = registry.get("missing", &key("k")).await;
        assert!(matches!(result, Err(CacheError::UnknownNamespace(name)) if name == "missing"));
        assert!(registry.set("missing", key("k"), 1, None).await.is_err());

        registry.destroy().await;
    }

    #[tokio::test]
    async fn test_duplicate_namespace() {
        let mut registry = Registry::new(GENERAL, CacheConfig::default()).unwrap();

        let result = registry.register(GENERAL, CacheConfig::default());
        assert!(matches!(result, Err(CacheError::DuplicateNamespace(_))));

        registry.destroy().await;
    }

    #[tokio::test]
    async fn test_destroy_stops_every_sweeper() {
        let registry = Registry::with_presets(CacheConfig::default()).unwrap();
        registry.set(OBJECTS, key("k"), 1, None).await.unwrap();

        registry.destroy().await;

        for name in registry.names() {
            let cache = registry.cache(name).unwrap();
            assert!(!cache.is_sweeping().await);
            assert!(cache.is_empty().await);
        }
    }
}
