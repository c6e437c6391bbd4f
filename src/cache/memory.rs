//! In-Memory Favorite Cache
//!
//! Holds the two named caches as separate regions, each behind its own
//! `RwLock` so that traffic on one never blocks the other.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{
    CacheLookup, CacheName, CacheRegion, CacheResult, CacheStats, FavoriteCache,
};
use crate::config::Config;
use crate::models::FavoriteDto;

type FavoriteRegion = CacheRegion<Vec<FavoriteDto>>;

// == In-Memory Cache ==
#[derive(Debug)]
pub struct InMemoryFavoriteCache {
    favorites: RwLock<FavoriteRegion>,
    favorites_by_type: RwLock<FavoriteRegion>,
}

impl InMemoryFavoriteCache {
    /// Creates both regions with the same capacity and TTL.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            favorites: RwLock::new(CacheRegion::new(max_entries, ttl)),
            favorites_by_type: RwLock::new(CacheRegion::new(max_entries, ttl)),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.cache_max_entries,
            Duration::from_secs(config.favorites_cache_ttl),
        )
    }

    fn region(&self, cache: CacheName) -> &RwLock<FavoriteRegion> {
        match cache {
            CacheName::Favorites => &self.favorites,
            CacheName::FavoritesByType => &self.favorites_by_type,
        }
    }

    /// Drops expired entries from both regions. Returns the number removed.
    pub async fn cleanup_expired(&self) -> usize {
        let favorites = self.favorites.write().await.cleanup_expired();
        let by_type = self.favorites_by_type.write().await.cleanup_expired();
        favorites + by_type
    }

    pub async fn stats(&self, cache: CacheName) -> CacheStats {
        self.region(cache).read().await.stats()
    }

    pub async fn len(&self, cache: CacheName) -> usize {
        self.region(cache).read().await.len()
    }
}

#[async_trait]
impl FavoriteCache for InMemoryFavoriteCache {
    async fn get(&self, cache: CacheName, key: &str) -> CacheResult<CacheLookup> {
        // write lock: reads update recency and stats
        Ok(self.region(cache).write().await.get(key))
    }

    async fn put(
        &self,
        cache: CacheName,
        key: &str,
        favorites: Vec<FavoriteDto>,
        generation: u64,
    ) -> CacheResult<bool> {
        let stored = self
            .region(cache)
            .write()
            .await
            .put(key, favorites, generation)?;
        if !stored {
            debug!(%cache, key, generation, "cache put skipped, key evicted since lookup");
        }
        Ok(stored)
    }

    async fn evict(&self, cache: CacheName, key: &str) -> CacheResult<()> {
        let removed = self.region(cache).write().await.evict(key);
        debug!(%cache, key, removed, "cache evict");
        Ok(())
    }
}
