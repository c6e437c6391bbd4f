//! Cache Module
//!
//! Read-through cache seam for favorite listings, plus an in-memory
//! implementation with TTL expiration and least-recently-used eviction.
//!
//! Two named caches exist:
//! - `favorites` - all favorites of a user, keyed by user id
//! - `favoritesByType` - favorites of a user for one content type

mod entry;
mod memory;
mod region;
mod stats;


use std::fmt;

use async_trait::async_trait;

use crate::error::CacheError;
use crate::models::FavoriteDto;

// Re-export public types
pub use entry::CacheEntry;
pub use memory::InMemoryFavoriteCache;
pub use region::{CacheRegion, Lookup};
pub use stats::CacheStats;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 512;

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Lookup of a cached favorite listing.
pub type CacheLookup = Lookup<Vec<FavoriteDto>>;

// == Cache Name ==
/// The named caches used by the favorite manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheName {
    Favorites,
    FavoritesByType,
}

impl CacheName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheName::Favorites => "favorites",
            CacheName::FavoritesByType => "favoritesByType",
        }
    }
}

impl fmt::Display for CacheName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Key Derivation ==
/// Key of the `favorites` cache.
pub fn user_key(user_id: &str) -> String {
    user_id.to_string()
}

/// Key of the `favoritesByType` cache.
///
/// The user id is length-prefixed so that no two `(user, type)` pairs can
/// map to the same key.
pub fn user_type_key(user_id: &str, content_type: &str) -> String {
    format!("{}:{}_{}", user_id.len(), user_id, content_type)
}

// == Favorite Cache ==
/// Cache capability consumed by the favorite manager.
///
/// A miss carries a generation; filling the key must go through `put` with
/// that generation so a listing loaded before a concurrent eviction is never
/// stored after it. Errors are reported but the manager treats every one of
/// them as non-fatal.
#[async_trait]
pub trait FavoriteCache: Send + Sync {
    async fn get(&self, cache: CacheName, key: &str) -> CacheResult<CacheLookup>;

    /// Stores `favorites` unless `key` was evicted after `generation` was
    /// handed out. Returns whether the value was stored.
    async fn put(
        &self,
        cache: CacheName,
        key: &str,
        favorites: Vec<FavoriteDto>,
        generation: u64,
    ) -> CacheResult<bool>;

    /// Removes one entry. Evicting an absent key is not an error.
    async fn evict(&self, cache: CacheName, key: &str) -> CacheResult<()>;
}
