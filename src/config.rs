//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// When false the manager runs without a cache and reads hit the store
    pub cache_enabled: bool,
    /// TTL in seconds of the `favorites` and `favoritesByType` caches
    pub favorites_cache_ttl: u64,
    /// Maximum number of entries per cache region
    pub cache_max_entries: usize,
    /// Background cache cleanup interval in seconds
    pub cleanup_interval: u64,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_ENABLED` - `true` or `false` (default: true)
    /// - `FAVORITES_CACHE_TTL` - Favorites cache TTL in seconds (default: 300)
    /// - `CACHE_MAX_ENTRIES` - Entries per cache region (default: 1000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cache_enabled: env_or("CACHE_ENABLED", defaults.cache_enabled),
            favorites_cache_ttl: env_or("FAVORITES_CACHE_TTL", defaults.favorites_cache_ttl),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_enabled: true,
            favorites_cache_ttl: 300,
            cache_max_entries: 1000,
            cleanup_interval: 30,
        }
    }
}
