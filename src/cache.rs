//! Bounded, recency-ordered read cache.
//!
//! Fronts the catalog cluster on frontends and holds item titles on order
//! nodes. Keys are plain strings; callers that put different kinds of key in
//! one cache share a namespace and live with collisions.

use lru::LruCache;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

pub const DEFAULT_CAPACITY: usize = 100;

/// What happens when an insert finds the cache full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvictionPolicy {
    /// Drop the least recently used entry.
    #[default]
    Lru,
    /// Drop everything.
    ClearAll,
}

impl FromStr for EvictionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lru" => Ok(EvictionPolicy::Lru),
            "clear-all" | "clear_all" => Ok(EvictionPolicy::ClearAll),
            other => Err(format!(
                "unknown eviction policy '{}', expected 'lru' or 'clear-all'",
                other
            )),
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvictionPolicy::Lru => write!(f, "lru"),
            EvictionPolicy::ClearAll => write!(f, "clear-all"),
        }
    }
}

/// Counters since startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub policy: EvictionPolicy,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

pub struct EdgeCache<V> {
    entries: Mutex<LruCache<String, V>>,
    capacity: NonZeroUsize,
    policy: EvictionPolicy,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl<V: Clone> EdgeCache<V> {
    /// A zero capacity is raised to one.
    pub fn new(capacity: usize, policy: EvictionPolicy) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            capacity,
            policy,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Returns a copy of the cached value and marks `key` most recently used.
    pub fn lookup(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Cache hit for '{}'", key);
                Some(value.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Cache miss for '{}'", key);
                None
            }
        }
    }

    /// Stores `value`, evicting per the configured policy if a new key
    /// finds the cache full. Overwriting an existing key never evicts.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let mut entries = self.entries.lock();

        if !entries.contains(&key) && entries.len() >= self.capacity.get() {
            match self.policy {
                EvictionPolicy::Lru => {
                    if let Some((evicted, _)) = entries.pop_lru() {
                        self.evictions.fetch_add(1, Ordering::Relaxed);
                        tracing::debug!("Evicted least recently used '{}'", evicted);
                    }
                }
                EvictionPolicy::ClearAll => {
                    let dropped = entries.len() as u64;
                    entries.clear();
                    self.evictions.fetch_add(dropped, Ordering::Relaxed);
                    tracing::debug!("Cache full, cleared {} entries", dropped);
                }
            }
        }

        entries.put(key, value);
    }

    /// Removes `key`. Returns whether it was present.
    pub fn invalidate(&self, key: &str) -> bool {
        let removed = self.entries.lock().pop(key).is_some();
        if removed {
            tracing::debug!("Invalidated '{}'", key);
        }
        removed
    }

    /// Presence check that leaves recency alone.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            capacity: self.capacity(),
            policy: self.policy,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_miss_then_hit() {
        let cache = EdgeCache::new(4, EvictionPolicy::Lru);
        assert_eq!(cache.lookup("a"), None);

        cache.insert("a", 1);
        assert_eq!(cache.lookup("a"), Some(1));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_lru_evicts_least_recently_read() {
        let cache = EdgeCache::new(2, EvictionPolicy::Lru);
        cache.insert("A", 1);
        cache.insert("B", 2);
        cache.insert("C", 3);
        cache.lookup("A");
        cache.insert("D", 4);

        // C pushed A out, so the read of A misses and D evicts B.
        assert!(!cache.contains("A"));
        assert!(!cache.contains("B"));
        assert!(cache.contains("C"));
        assert!(cache.contains("D"));

        let cache = EdgeCache::new(2, EvictionPolicy::Lru);
        cache.insert("A", 1);
        cache.insert("B", 2);
        assert_eq!(cache.lookup("A"), Some(1));
        cache.insert("D", 4);

        assert!(cache.contains("A"), "A was read last and must survive");
        assert!(!cache.contains("B"), "B is the least recently used");
        assert!(cache.contains("D"));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_lru_after_overflow_then_read() {
        let cache = EdgeCache::new(2, EvictionPolicy::Lru);
        cache.insert("A", 1);
        cache.insert("B", 2);
        cache.insert("C", 3);
        // Resident: B, C. Reading B makes C the eviction victim.
        assert_eq!(cache.lookup("B"), Some(2));
        cache.insert("D", 4);

        assert!(cache.contains("B"));
        assert!(!cache.contains("C"));
        assert!(cache.contains("D"));
    }

    #[test]
    fn test_clear_all_leaves_only_new_entry() {
        let cache = EdgeCache::new(3, EvictionPolicy::ClearAll);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("c", 3);
        assert_eq!(cache.len(), 3);

        cache.insert("d", 4);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.lookup("d"), Some(4));
        assert_eq!(cache.stats().evictions, 3);
    }

    #[test]
    fn test_overwrite_does_not_evict() {
        for policy in [EvictionPolicy::Lru, EvictionPolicy::ClearAll] {
            let cache = EdgeCache::new(2, policy);
            cache.insert("a", 1);
            cache.insert("b", 2);
            cache.insert("a", 10);

            assert_eq!(cache.len(), 2);
            assert_eq!(cache.lookup("a"), Some(10));
            assert_eq!(cache.lookup("b"), Some(2));
        }
    }

    #[test]
    fn test_size_never_exceeds_capacity() {
        for policy in [EvictionPolicy::Lru, EvictionPolicy::ClearAll] {
            let cache = EdgeCache::new(5, policy);
            for i in 0..100 {
                cache.insert(format!("key_{}", i % 17), i);
                if i % 3 == 0 {
                    cache.lookup(&format!("key_{}", i % 7));
                }
                assert!(cache.len() <= 5, "{} policy overflowed", policy);
            }
        }
    }

    #[test]
    fn test_invalidate_then_lookup_misses() {
        let cache = EdgeCache::new(2, EvictionPolicy::Lru);
        cache.insert("3", "book three".to_string());

        assert!(cache.invalidate("3"));
        assert_eq!(cache.lookup("3"), None);
        assert!(!cache.invalidate("3"), "second invalidate reports not found");
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let cache = EdgeCache::new(0, EvictionPolicy::Lru);
        cache.insert("a", 1);
        cache.insert("b", 2);

        assert_eq!(cache.capacity(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("b"));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("lru".parse::<EvictionPolicy>(), Ok(EvictionPolicy::Lru));
        assert_eq!(
            "clear-all".parse::<EvictionPolicy>(),
            Ok(EvictionPolicy::ClearAll)
        );
        assert_eq!(
            "CLEAR_ALL".parse::<EvictionPolicy>(),
            Ok(EvictionPolicy::ClearAll)
        );
        assert!("fifo".parse::<EvictionPolicy>().is_err());
    }
}
