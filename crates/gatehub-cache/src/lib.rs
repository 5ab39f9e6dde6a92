//! # gatehub-cache
//!
//! The bounded cache backing GateHub's session stores: a byte-budgeted,
//! TTL-windowed map with FIFO eviction under size pressure.

pub mod bounded;
pub mod entry;

pub use bounded::BoundedCache;
pub use entry::CacheEntry;
