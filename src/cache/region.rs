//! Cache Region Module
//!
//! One named cache: a HashMap of entries sharing a TTL and a capacity, with
//! least-recently-used eviction when a new key arrives at capacity.
//!
//! Fills are guarded by generations. A miss hands out the current value of
//! the region's logical clock, and a later `put` carrying that generation is
//! refused if the key was evicted in between. A reader that loaded its value
//! before a write therefore cannot store it after the write's eviction.

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats, MAX_KEY_LENGTH};
use crate::error::CacheError;

// == Lookup ==
/// Outcome of a region read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<V> {
    Hit(V),
    /// Pass `generation` back to `put` when filling this key.
    Miss { generation: u64 },
}

// == Cache Region ==
#[derive(Debug)]
pub struct CacheRegion<V> {
    entries: HashMap<String, CacheEntry<V>>,
    /// Access tick -> key, oldest first
    recency: BTreeMap<u64, String>,
    /// Clock value of the latest eviction of each key
    invalidated: HashMap<String, u64>,
    /// Clock value when `invalidated` was last cleared
    invalidated_floor: u64,
    stats: CacheStats,
    max_entries: usize,
    ttl: Duration,
    /// Logical clock advanced on every read and write
    clock: u64,
}

impl<V: Clone> CacheRegion<V> {
    // == Constructor ==
    /// Creates an empty region. A capacity of zero is treated as one.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            recency: BTreeMap::new(),
            invalidated: HashMap::new(),
            invalidated_floor: 0,
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
            ttl,
            clock: 0,
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Current generation. A `put` carrying it succeeds until the key is
    /// next evicted.
    pub fn generation(&self) -> u64 {
        self.clock
    }

    // == Put ==
    /// Stores a value, replacing any previous entry and resetting its TTL.
    ///
    /// Returns `Ok(false)` without storing when `key` was evicted after
    /// `generation` was handed out.
    pub fn put(&mut self, key: &str, value: V, generation: u64) -> Result<bool, CacheError> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidKey(format!(
                "key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }
        if self.is_stale(key, generation) {
            return Ok(false);
        }

        match self.entries.get(key).map(|existing| existing.last_access) {
            Some(previous) => {
                self.recency.remove(&previous);
            }
            None if self.entries.len() >= self.max_entries => self.evict_least_recent(),
            None => {}
        }

        let tick = self.tick();
        self.entries
            .insert(key.to_string(), CacheEntry::new(value, self.ttl, tick));
        self.recency.insert(tick, key.to_string());
        self.stats.set_total_entries(self.entries.len());
        Ok(true)
    }

    fn is_stale(&self, key: &str, generation: u64) -> bool {
        match self.invalidated.get(key) {
            Some(&evicted_at) => evicted_at > generation,
            // evictions forgotten by the last clear all happened at or before the floor
            None => generation < self.invalidated_floor,
        }
    }

    fn evict_least_recent(&mut self) {
        if let Some((_, key)) = self.recency.pop_first() {
            self.entries.remove(&key);
            self.stats.record_eviction();
        }
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                self.recency.remove(&entry.last_access);
                true
            }
            None => false,
        }
    }

    // == Get ==
    /// Returns a clone of the value if present and not expired.
    ///
    /// Expired entries are removed and counted as misses.
    pub fn get(&mut self, key: &str) -> Lookup<V> {
        let tick = self.tick();
        let now = Instant::now();

        let expired = match self.entries.get_mut(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                let previous = entry.touch(tick);
                let value = entry.value.clone();
                self.recency.remove(&previous);
                self.recency.insert(tick, key.to_string());
                self.stats.record_hit();
                return Lookup::Hit(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.remove_entry(key);
            self.stats.set_total_entries(self.entries.len());
        }
        self.stats.record_miss();
        Lookup::Miss {
            generation: self.generation(),
        }
    }

    // == Evict ==
    /// Removes one entry and refuses fills from generations handed out
    /// before this call. Returns whether an entry was present.
    pub fn evict(&mut self, key: &str) -> bool {
        let tick = self.tick();
        self.invalidated.insert(key.to_string(), tick);
        if self.invalidated.len() > self.max_entries {
            self.invalidated.clear();
            self.invalidated_floor = tick;
        }

        let removed = self.remove_entry(key);
        if removed {
            self.stats.record_invalidations(1);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Cleanup Expired ==
    /// Removes all expired entries. Returns the number removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove_entry(key);
        }
        self.stats.set_total_entries(self.entries.len());
        expired.len()
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
