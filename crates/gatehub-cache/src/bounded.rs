//! Byte-bounded cache with a whole-cache TTL window and FIFO eviction.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use tracing::debug;

use crate::entry::CacheEntry;

/// A stored value plus the weight recorded when it was inserted.
struct Stored<V> {
    value: V,
    weight: usize,
}

/// Mutable cache state, guarded by a single lock so concurrent inserts
/// cannot jointly exceed the byte budget.
struct Inner<V> {
    entries: HashMap<String, Stored<V>>,
    /// Keys in insertion order, oldest first.
    order: VecDeque<String>,
    current_size: usize,
    /// Expiry of the cache as a whole, not of any single entry.
    valid_until: DateTime<Utc>,
}

/// A size- and time-bounded cache.
///
/// Two independent bounds apply:
///
/// - **TTL window**: a single `valid_until` deadline covers the whole
///   cache. The first mutating access past the deadline clears every
///   entry — including ones inserted moments earlier — and opens a fresh
///   window. Size pressure never resets the window.
/// - **Byte budget**: `current_size` (the sum of recorded entry weights)
///   never exceeds `max_size` after a mutating operation. An insert that
///   would overflow first drops entries whose own expiry has passed, then
///   evicts in insertion order (oldest first) until the new entry fits.
///   FIFO-under-pressure is the normative eviction order here; it is a
///   deliberate simplification over LRU.
///
/// A value whose weight alone exceeds the budget is rejected outright.
pub struct BoundedCache<V> {
    max_size: usize,
    ttl: Duration,
    inner: Mutex<Inner<V>>,
}

impl<V> std::fmt::Debug for BoundedCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedCache")
            .field("max_size", &self.max_size)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl<V: CacheEntry + Clone> BoundedCache<V> {
    /// Create a cache with the given byte budget and TTL window.
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self {
            max_size,
            ttl,
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                order: VecDeque::new(),
                current_size: 0,
                valid_until: Utc::now() + ttl,
            }),
        }
    }

    /// Insert or replace a value. Returns `false` if the value's weight
    /// alone exceeds the byte budget (the value is not stored).
    pub fn insert(&self, key: &str, value: V) -> bool {
        let mut inner = self.inner.lock();
        self.sweep_if_due(&mut inner);
        self.store(&mut inner, key, value)
    }

    /// Like [`insert`](Self::insert), but when the key is already
    /// present, `merge` sees the stored value and may fold it into the
    /// incoming one before the swap. The read and the write happen under
    /// one lock hold, so no concurrent writer can slip in between.
    pub fn insert_merged(&self, key: &str, mut value: V, merge: impl FnOnce(&V, &mut V)) -> bool {
        let mut inner = self.inner.lock();
        self.sweep_if_due(&mut inner);
        if let Some(existing) = inner.entries.get(key) {
            merge(&existing.value, &mut value);
        }
        self.store(&mut inner, key, value)
    }

    fn store(&self, inner: &mut Inner<V>, key: &str, value: V) -> bool {
        let weight = value.weight();
        if weight > self.max_size {
            debug!(key, weight, max_size = self.max_size, "Entry exceeds cache budget, rejected");
            return false;
        }

        // Replacing a key is remove + append: the accounting stays
        // symmetric and the key moves to the back of the eviction order.
        Self::detach(inner, key);

        if inner.current_size + weight > self.max_size {
            Self::drop_expired(inner);
        }
        while inner.current_size + weight > self.max_size {
            let Some(oldest) = inner.order.front().cloned() else {
                break;
            };
            debug!(key = %oldest, "Evicting oldest cache entry under size pressure");
            Self::detach(inner, &oldest);
        }

        inner.order.push_back(key.to_string());
        inner.entries.insert(key.to_string(), Stored { value, weight });
        inner.current_size += weight;
        true
    }

    /// Look up a value by key. Returns a clone; per-entry expiry is the
    /// caller's concern (the store applies the lazy-expiry check).
    pub fn get(&self, key: &str) -> Option<V> {
        self.inner.lock().entries.get(key).map(|s| s.value.clone())
    }

    /// Remove a key. Idempotent.
    pub fn remove(&self, key: &str) {
        let mut inner = self.inner.lock();
        self.sweep_if_due(&mut inner);
        Self::detach(&mut inner, key);
    }

    /// Drop every entry and reset the size accounting. The TTL window is
    /// left untouched.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.order.clear();
        inner.current_size = 0;
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current total of recorded entry weights in bytes.
    pub fn current_size(&self) -> usize {
        self.inner.lock().current_size
    }

    /// Clear everything and open a new TTL window if the current one has
    /// lapsed. Runs at the start of every mutating operation.
    fn sweep_if_due(&self, inner: &mut Inner<V>) {
        let now = Utc::now();
        if now > inner.valid_until {
            let dropped = inner.entries.len();
            inner.entries.clear();
            inner.order.clear();
            inner.current_size = 0;
            inner.valid_until = now + self.ttl;
            if dropped > 0 {
                debug!(dropped, "Cache TTL window lapsed, cleared all entries");
            }
        }
    }

    /// Remove one key from the map, the order queue, and the accounting.
    fn detach(inner: &mut Inner<V>, key: &str) {
        if let Some(stored) = inner.entries.remove(key) {
            inner.current_size -= stored.weight;
            inner.order.retain(|k| k != key);
        }
    }

    /// Remove entries whose own expiry has passed.
    fn drop_expired(inner: &mut Inner<V>) {
        let now = Utc::now();
        let expired: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, s)| now > s.value.expires_at())
            .map(|(k, _)| k.clone())
            .collect();
        for key in expired {
            Self::detach(inner, &key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct TestEntry {
        weight: usize,
        expires_at: DateTime<Utc>,
    }

    impl TestEntry {
        fn live(weight: usize) -> Self {
            Self {
                weight,
                expires_at: Utc::now() + Duration::hours(1),
            }
        }

        fn expired(weight: usize) -> Self {
            Self {
                weight,
                expires_at: Utc::now() - Duration::seconds(1),
            }
        }
    }

    impl CacheEntry for TestEntry {
        fn weight(&self) -> usize {
            self.weight
        }

        fn expires_at(&self) -> DateTime<Utc> {
            self.expires_at
        }
    }

    #[test]
    fn test_insert_and_get() {
        let cache = BoundedCache::new(100, Duration::hours(1));
        assert!(cache.insert("a", TestEntry::live(60)));
        assert!(cache.get("a").is_some());
        assert_eq!(cache.current_size(), 60);
    }

    #[test]
    fn test_oldest_evicted_under_size_pressure() {
        let cache = BoundedCache::new(100, Duration::hours(1));
        assert!(cache.insert("a", TestEntry::live(60)));
        assert!(cache.insert("b", TestEntry::live(60)));

        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert_eq!(cache.current_size(), 60);
    }

    #[test]
    fn test_budget_holds_across_sequence() {
        let cache = BoundedCache::new(100, Duration::hours(1));
        for i in 0..20 {
            cache.insert(&format!("k{i}"), TestEntry::live(30));
            assert!(cache.current_size() <= 100);
        }
    }

    #[test]
    fn test_expired_entries_dropped_before_fifo() {
        let cache = BoundedCache::new(150, Duration::hours(1));
        assert!(cache.insert("live", TestEntry::live(50)));
        assert!(cache.insert("stale", TestEntry::expired(50)));

        // 100 + 60 > 150: the expired entry goes first, the older live
        // entry survives.
        assert!(cache.insert("new", TestEntry::live(60)));
        assert!(cache.get("live").is_some());
        assert!(cache.get("stale").is_none());
        assert_eq!(cache.current_size(), 110);
    }

    #[test]
    fn test_ttl_sweep_clears_everything() {
        // A window that is already closed: every mutating access sweeps.
        let cache = BoundedCache::new(1000, Duration::milliseconds(-1));
        assert!(cache.insert("a", TestEntry::live(10)));
        assert!(cache.insert("b", TestEntry::live(10)));

        // The sweep on inserting "b" cleared "a" even though it was fresh.
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert_eq!(cache.current_size(), 10);
    }

    #[test]
    fn test_upsert_replaces_weight_and_order() {
        let cache = BoundedCache::new(100, Duration::hours(1));
        assert!(cache.insert("a", TestEntry::live(30)));
        assert!(cache.insert("b", TestEntry::live(30)));
        assert!(cache.insert("a", TestEntry::live(70)));
        assert_eq!(cache.current_size(), 100);

        // "b" is now the oldest; the next squeeze evicts it, not "a".
        assert!(cache.insert("c", TestEntry::live(10)));
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_insert_merged_folds_in_the_stored_value() {
        let cache = BoundedCache::new(100, Duration::hours(1));
        assert!(cache.insert("a", TestEntry::live(30)));
        let first_expiry = cache.get("a").unwrap().expires_at;

        let merged = cache.insert_merged("a", TestEntry::live(40), |existing, incoming| {
            incoming.expires_at = incoming.expires_at.min(existing.expires_at);
        });
        assert!(merged);

        let stored = cache.get("a").unwrap();
        assert_eq!(stored.weight, 40);
        assert_eq!(stored.expires_at, first_expiry);
        assert_eq!(cache.current_size(), 40);
    }

    #[test]
    fn test_insert_merged_without_existing_value_is_plain_insert() {
        let cache = BoundedCache::new(100, Duration::hours(1));
        let inserted = cache.insert_merged("a", TestEntry::live(30), |_, _| {
            panic!("merge must not run for an absent key")
        });
        assert!(inserted);
        assert_eq!(cache.current_size(), 30);
    }

    #[test]
    fn test_oversized_entry_rejected() {
        let cache = BoundedCache::new(50, Duration::hours(1));
        assert!(!cache.insert("big", TestEntry::live(60)));
        assert!(cache.is_empty());
        assert_eq!(cache.current_size(), 0);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let cache = BoundedCache::new(100, Duration::hours(1));
        cache.insert("a", TestEntry::live(40));
        cache.remove("a");
        cache.remove("a");
        assert!(cache.is_empty());
        assert_eq!(cache.current_size(), 0);
    }
}
