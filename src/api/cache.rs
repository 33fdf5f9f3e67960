//! Bounded in-memory cache with per-entry TTL.
//!
//! Eviction is FIFO: when a new key arrives and the cache is full, the oldest inserted key
//! goes, regardless of how recently it was read.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

pub const DEFAULT_MAX_SIZE: usize = 50;
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Snapshot of cache usage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CacheStats {
    pub size: usize,
    pub max_size: usize,
    /// Hits / (hits + misses), 0 before the first lookup.
    pub hit_rate: f64,
}

#[derive(Debug)]
struct CacheEntry<V> {
    data: V,
    stored_at: Instant,
}

#[derive(Debug)]
pub struct BracketCache<V> {
    entries: HashMap<String, CacheEntry<V>>,
    /// Keys in insertion order, oldest first.
    order: VecDeque<String>,
    max_size: usize,
    ttl: Duration,
    hits: u64,
    misses: u64,
}

impl<V: Clone> BracketCache<V> {
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_size,
            ttl,
            hits: 0,
            misses: 0,
        }
    }

    /// Cached value for `key`, unless missing or older than the TTL (expired entries are dropped).
    pub fn get(&mut self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Store `data` under `key`. Overwriting keeps the key's place in the eviction order.
    pub fn set(&mut self, key: impl Into<String>, data: V) {
        self.set_at(key.into(), data, Instant::now());
    }

    /// Remove `key`; returns whether it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.retain(|k| k != key);
            true
        } else {
            false
        }
    }

    /// Keep only the keys for which `keep` returns true.
    pub fn retain_keys(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|k, _| keep(k));
        self.order.retain(|k| self.entries.contains_key(k));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        let lookups = self.hits + self.misses;
        CacheStats {
            size: self.entries.len(),
            max_size: self.max_size,
            hit_rate: if lookups == 0 {
                0.0
            } else {
                self.hits as f64 / lookups as f64
            },
        }
    }

    fn get_at(&mut self, key: &str, now: Instant) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => now.saturating_duration_since(entry.stored_at) > self.ttl,
            None => {
                self.misses += 1;
                return None;
            }
        };
        if expired {
            self.delete(key);
            self.misses += 1;
            return None;
        }
        self.hits += 1;
        self.entries.get(key).map(|entry| entry.data.clone())
    }

    fn set_at(&mut self, key: String, data: V, now: Instant) {
        if let Some(entry) = self.entries.get_mut(&key) {
            *entry = CacheEntry {
                data,
                stored_at: now,
            };
            return;
        }
        if self.max_size == 0 {
            return;
        }
        while self.entries.len() >= self.max_size {
            match self.order.pop_front() {
                Some(oldest) => {
                    log::trace!("Cache full, evicting {}", oldest);
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(
            key,
            CacheEntry {
                data,
                stored_at: now,
            },
        );
    }
}

impl<V: Clone> Default for BracketCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE, DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_inserted_key_when_full() {
        let mut cache = BracketCache::new(2, DEFAULT_TTL);
        cache.set("a", 1);
        cache.set("b", 2);
        // Reading "a" does not protect it: eviction is by insertion order.
        assert_eq!(cache.get("a"), Some(1));
        cache.set("c", 3);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(2));
        assert_eq!(cache.get("c"), Some(3));
    }

    #[test]
    fn overwrite_keeps_position_and_does_not_evict() {
        let mut cache = BracketCache::new(2, DEFAULT_TTL);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("a", 10);
        assert_eq!(cache.len(), 2);

        cache.set("c", 3);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(2));
    }

    #[test]
    fn entries_expire_after_ttl() {
        let ttl = Duration::from_secs(300);
        let mut cache = BracketCache::new(10, ttl);
        let start = Instant::now();
        cache.set_at("bracket_1".to_string(), "x", start);

        assert_eq!(cache.get_at("bracket_1", start + ttl), Some("x"));
        assert_eq!(cache.get_at("bracket_1", start + ttl + Duration::from_millis(1)), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn delete_and_retain_keep_order_in_sync() {
        let mut cache = BracketCache::new(3, DEFAULT_TTL);
        cache.set("bracket_1", 1);
        cache.set("standings_1_{}", 2);
        cache.set("teams", 3);
        assert!(cache.delete("teams"));
        assert!(!cache.delete("teams"));

        cache.retain_keys(|k| !k.starts_with("bracket_"));
        assert_eq!(cache.len(), 1);

        cache.set("x", 4);
        cache.set("y", 5);
        cache.set("z", 6);
        // "standings_1_{}" was the oldest survivor.
        assert_eq!(cache.get("standings_1_{}"), None);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn stats_report_hit_rate() {
        let mut cache: BracketCache<u32> = BracketCache::default();
        assert_eq!(cache.stats().hit_rate, 0.0);
        cache.set("a", 1);
        cache.get("a");
        cache.get("missing");
        let stats = cache.stats();
        assert_eq!(stats.size, 1);
        assert_eq!(stats.max_size, DEFAULT_MAX_SIZE);
        assert_eq!(stats.hit_rate, 0.5);
    }
}
