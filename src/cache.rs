//! Time-based caching primitives.
//!
//! A generic TTL cache with an injected clock, owned by each client
//! instance rather than held as process-global state. Entries are
//! replaced wholesale on expiry; there is no eviction beyond TTL and
//! entries live for the process lifetime.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of the current time. Injected so cache expiry is testable
/// without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used outside of tests.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// ---------------------------------------------------------------------------
// TTL cache
// ---------------------------------------------------------------------------

/// A cached value plus the instant it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub fetched_at: DateTime<Utc>,
}

/// In-memory TTL cache keyed by `K`.
pub struct TtlCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    /// Return the cached value for `key` if one exists and is younger
    /// than the TTL. Expired entries are left in place — they are
    /// overwritten by the next `insert` for the same key.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key).and_then(|entry| {
            if self.clock.now() - entry.fetched_at < self.ttl {
                Some(&entry.value)
            } else {
                None
            }
        })
    }

    /// Store `value` under `key`, stamped with the current time.
    /// Replaces any previous entry for the key.
    pub fn insert(&mut self, key: K, value: V) {
        let entry = CacheEntry {
            value,
            fetched_at: self.clock.now(),
        };
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod tests {
    use super::test_clock::ManualClock;
    use super::*;

    fn cache_with_clock(ttl_secs: i64) -> (TtlCache<String, u32>, Arc<ManualClock>) {
        let clock = ManualClock::new(Utc::now());
        let cache = TtlCache::new(Duration::seconds(ttl_secs), clock.clone() as Arc<dyn Clock>);
        (cache, clock)
    }

    #[test]
    fn test_get_empty() {
        let (cache, _clock) = cache_with_clock(60);
        assert!(cache.get(&"items".to_string()).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_hit_within_ttl() {
        let (mut cache, clock) = cache_with_clock(60);
        cache.insert("items".to_string(), 42);

        clock.advance(Duration::seconds(59));
        assert_eq!(cache.get(&"items".to_string()), Some(&42));
    }

    #[test]
    fn test_miss_after_ttl() {
        let (mut cache, clock) = cache_with_clock(60);
        cache.insert("items".to_string(), 42);

        clock.advance(Duration::seconds(60));
        assert!(cache.get(&"items".to_string()).is_none());
    }

    #[test]
    fn test_insert_replaces_expired_entry() {
        let (mut cache, clock) = cache_with_clock(60);
        cache.insert("items".to_string(), 1);
        clock.advance(Duration::seconds(120));
        assert!(cache.get(&"items".to_string()).is_none());

        cache.insert("items".to_string(), 2);
        assert_eq!(cache.get(&"items".to_string()), Some(&2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let (mut cache, clock) = cache_with_clock(60);
        cache.insert("a".to_string(), 1);
        clock.advance(Duration::seconds(45));
        cache.insert("b".to_string(), 2);
        clock.advance(Duration::seconds(30));

        // "a" is 75s old (expired), "b" is 30s old (fresh).
        assert!(cache.get(&"a".to_string()).is_none());
        assert_eq!(cache.get(&"b".to_string()), Some(&2));
    }

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
