//! Metadata contract for cacheable values.

use chrono::{DateTime, Utc};

use gatehub_entity::Session;

/// Metadata the [`BoundedCache`](crate::BoundedCache) needs from every
/// stored value: a deterministic byte weight for budget accounting and a
/// per-entry expiry for the expired-entry eviction pass.
pub trait CacheEntry {
    /// Stored size of this value in bytes. Must be stable for the lifetime
    /// of the value: the cache records it at insert and subtracts the same
    /// amount at removal.
    fn weight(&self) -> usize;

    /// When this value expires.
    fn expires_at(&self) -> DateTime<Utc>;
}

impl CacheEntry for Session {
    fn weight(&self) -> usize {
        self.canonical_size()
    }

    fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}
