//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    pub expires_at: Instant,
    /// Logical clock of the last read or write, used for LRU eviction
    pub last_access: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry that expires `ttl` from now.
    pub fn new(value: V, ttl: Duration, tick: u64) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
            last_access: tick,
        }
    }

    // == Is Expired ==
    /// An entry is expired once `now` reaches its expiration time.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Moves the entry to `tick` in the access order. Returns the previous tick.
    pub fn touch(&mut self, tick: u64) -> u64 {
        std::mem::replace(&mut self.last_access, tick)
    }
}
