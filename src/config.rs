//! Configuration Module
//!
//! Cache tuning parameters, deployment presets, and server settings loaded
//! from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

// == Defaults ==
pub const DEFAULT_MAX_SIZE: usize = 1000;
pub const DEFAULT_TTL: Duration = Duration::from_millis(300_000);
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_millis(60_000);
pub const DEFAULT_MEMORY_THRESHOLD: usize = 10 * 1024 * 1024;
pub const DEFAULT_AGGRESSIVE_EVICTION_RATIO: f64 = 0.25;
pub const DEFAULT_BYTES_PER_CHAR: usize = 2;
pub const DEFAULT_FALLBACK_ENTRY_BYTES: usize = 1024;

// == Cache Config ==
/// Tuning parameters for a single cache instance.
///
/// Immutable once the store is constructed. Build one with `Default` and
/// the `with_*` setters, or start from a preset.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
    /// TTL applied when the caller does not supply one
    pub default_ttl: Duration,
    /// Interval between background sweeps
    pub cleanup_interval: Duration,
    /// Estimated byte count above which a sweep evicts aggressively
    pub memory_threshold: usize,
    /// Share of entries removed by one aggressive eviction
    pub aggressive_eviction_ratio: f64,
    /// Bytes charged per UTF-16 unit of serialized output
    pub bytes_per_char: usize,
    /// Bytes charged for an entry that cannot be serialized
    pub fallback_entry_bytes: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            default_ttl: DEFAULT_TTL,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            memory_threshold: DEFAULT_MEMORY_THRESHOLD,
            aggressive_eviction_ratio: DEFAULT_AGGRESSIVE_EVICTION_RATIO,
            bytes_per_char: DEFAULT_BYTES_PER_CHAR,
            fallback_entry_bytes: DEFAULT_FALLBACK_ENTRY_BYTES,
        }
    }
}

impl CacheConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    // == Presets ==
    /// Preset for long-lived domain objects: 500 entries, 10 minute TTL, 5 MB.
    pub fn objects() -> Self {
        Self::default()
            .with_max_size(500)
            .with_default_ttl(Duration::from_secs(600))
            .with_memory_threshold(5 * 1024 * 1024)
    }

    /// Preset for short-lived, high-churn data: 100 entries, 2 minute TTL, 2 MB.
    pub fn ephemeral() -> Self {
        Self::default()
            .with_max_size(100)
            .with_default_ttl(Duration::from_secs(120))
            .with_memory_threshold(2 * 1024 * 1024)
    }

    // == Builders ==
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    pub fn with_memory_threshold(mut self, bytes: usize) -> Self {
        self.memory_threshold = bytes;
        self
    }

    pub fn with_aggressive_eviction_ratio(mut self, ratio: f64) -> Self {
        self.aggressive_eviction_ratio = ratio;
        self
    }

    pub fn with_bytes_per_char(mut self, bytes: usize) -> Self {
        self.bytes_per_char = bytes;
        self
    }

    pub fn with_fallback_entry_bytes(mut self, bytes: usize) -> Self {
        self.fallback_entry_bytes = bytes;
        self
    }

    // == Validate ==
    /// Rejects settings the store or the sweeper cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(CacheError::InvalidConfig(
                "max_size must be greater than zero".to_string(),
            ));
        }
        if self.cleanup_interval.is_zero() {
            return Err(CacheError::InvalidConfig(
                "cleanup_interval must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.aggressive_eviction_ratio) {
            return Err(CacheError::InvalidConfig(format!(
                "aggressive_eviction_ratio must be within [0, 1], got {}",
                self.aggressive_eviction_ratio
            )));
        }
        Ok(())
    }
}

// == Server Config ==
/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP server port
    pub server_port: u16,
    /// Settings for the default (`general`) namespace
    pub general: CacheConfig,
}

impl ServerConfig {
    /// Creates a new ServerConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_MAX_SIZE` - Maximum entries in the general cache (default: 1000)
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `CACHE_CLEANUP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 60000)
    /// - `CACHE_MEMORY_THRESHOLD` - Aggressive eviction trigger in bytes (default: 10485760)
    pub fn from_env() -> Self {
        let defaults = CacheConfig::default();
        let general = CacheConfig {
            max_size: env_or("CACHE_MAX_SIZE", defaults.max_size),
            default_ttl: Duration::from_millis(env_or(
                "CACHE_DEFAULT_TTL_MS",
                defaults.default_ttl.as_millis() as u64,
            )),
            cleanup_interval: Duration::from_millis(env_or(
                "CACHE_CLEANUP_INTERVAL_MS",
                defaults.cleanup_interval.as_millis() as u64,
            )),
            memory_threshold: env_or("CACHE_MEMORY_THRESHOLD", defaults.memory_threshold),
            ..defaults
        };

        Self {
            server_port: env_or("SERVER_PORT", 3000),
            general,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_port: 3000,
            general: CacheConfig::default(),
        }
    }
}

/// Parses an environment variable, falling back on absence or parse failure.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.max_size, 1000);
        assert_eq!(config.default_ttl, Duration::from_millis(300_000));
        assert_eq!(config.cleanup_interval, Duration::from_millis(60_000));
        assert_eq!(config.memory_threshold, 10_485_760);
        assert_eq!(config.aggressive_eviction_ratio, 0.25);
        assert_eq!(config.bytes_per_char, 2);
        assert_eq!(config.fallback_entry_bytes, 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let objects = CacheConfig::objects();
        assert_eq!(objects.max_size, 500);
        assert_eq!(objects.default_ttl, Duration::from_secs(600));
        assert_eq!(objects.memory_threshold, 5 * 1024 * 1024);

        let ephemeral = CacheConfig::ephemeral();
        assert_eq!(ephemeral.max_size, 100);
        assert_eq!(ephemeral.default_ttl, Duration::from_secs(120));
        assert_eq!(ephemeral.memory_threshold, 2 * 1024 * 1024);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            CacheConfig::default().with_max_size(0).validate(),
            Err(CacheError::InvalidConfig(_))
        ));
        assert!(matches!(
            CacheConfig::default()
                .with_cleanup_interval(Duration::ZERO)
                .validate(),
            Err(CacheError::InvalidConfig(_))
        ));
        assert!(matches!(
            CacheConfig::default()
                .with_aggressive_eviction_ratio(1.5)
                .validate(),
            Err(CacheError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_server_config_from_env_defaults() {
        env::remove_var("SERVER_PORT");
        env::remove_var("CACHE_MAX_SIZE");
        env::remove_var("CACHE_DEFAULT_TTL_MS");
        env::remove_var("CACHE_CLEANUP_INTERVAL_MS");
        env::remove_var("CACHE_MEMORY_THRESHOLD");

        let config = ServerConfig::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.general, CacheConfig::default());
    }
}
