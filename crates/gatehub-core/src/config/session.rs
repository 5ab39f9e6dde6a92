//! Session storage configuration.

use serde::{Deserialize, Serialize};

/// Which session store backs the auth system.
///
/// The strategy is selected once at construction time, never per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStrategy {
    /// Single-process in-memory store bounded by a byte budget.
    Memory,
    /// Durable store behind the session repository, with an optional
    /// read/write-through cache.
    Persistent,
}

impl Default for SessionStrategy {
    fn default() -> Self {
        Self::Memory
    }
}

/// Session storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Storage strategy: `"memory"` or `"persistent"`.
    #[serde(default)]
    pub strategy: SessionStrategy,
    /// Memory strategy options.
    #[serde(default)]
    pub memory: MemorySessionConfig,
    /// Persistent strategy options.
    #[serde(default)]
    pub persistent: PersistentSessionConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            strategy: SessionStrategy::default(),
            memory: MemorySessionConfig::default(),
            persistent: PersistentSessionConfig::default(),
        }
    }
}

/// Options for the in-memory session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemorySessionConfig {
    /// Byte budget for stored sessions.
    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: usize,
}

impl Default for MemorySessionConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: default_max_size_bytes(),
        }
    }
}

/// Options for the persistent session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistentSessionConfig {
    /// Whether a read/write-through cache fronts the durable store.
    #[serde(default = "default_true")]
    pub use_cache: bool,
    /// Whole-cache time-to-live as a compact duration string (e.g. `"1h"`).
    #[serde(default = "default_cache_duration")]
    pub cache_duration: String,
    /// Byte budget for the cache.
    #[serde(default = "default_max_size_bytes")]
    pub cache_size_bytes: usize,
}

impl Default for PersistentSessionConfig {
    fn default() -> Self {
        Self {
            use_cache: true,
            cache_duration: default_cache_duration(),
            cache_size_bytes: default_max_size_bytes(),
        }
    }
}

fn default_max_size_bytes() -> usize {
    1024 * 1024
}

fn default_cache_duration() -> String {
    "1h".to_string()
}

fn default_true() -> bool {
    true
}
