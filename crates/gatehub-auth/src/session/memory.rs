//! In-memory session store.

use async_trait::async_trait;

use gatehub_cache::BoundedCache;
use gatehub_core::config::session::MemorySessionConfig;
use gatehub_core::error::AppError;
use gatehub_core::result::AppResult;
use gatehub_entity::Session;

use crate::session::store::SessionStore;

/// Window for the backing cache. Matches the default token lifetime so a
/// sweep never outlives the sessions it clears by much; sessions expire
/// individually well before this in the common case.
const STORE_WINDOW_HOURS: i64 = 24;

/// Single-process session store over a byte-bounded cache.
///
/// Non-durable by design: a restart or a window sweep logs everyone out.
/// Unlike the persistent store's cache, a failed insert here is a real
/// error, because there is no durable layer behind it.
#[derive(Debug)]
pub struct MemorySessionStore {
    cache: BoundedCache<Session>,
}

impl MemorySessionStore {
    pub fn new(config: &MemorySessionConfig) -> Self {
        Self {
            cache: BoundedCache::new(
                config.max_size_bytes,
                chrono::Duration::hours(STORE_WINDOW_HOURS),
            ),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn set(&self, session: &Session) -> AppResult<()> {
        // Re-persisting an existing session keeps its original creation
        // time. The merge runs under the cache lock, so two racing
        // writes for the same id cannot bypass the floor.
        let stored = self
            .cache
            .insert_merged(&session.session_id, session.clone(), |existing, incoming| {
                if existing.created_at < incoming.created_at {
                    incoming.created_at = existing.created_at;
                }
            });
        if !stored {
            return Err(AppError::cache(
                "Session exceeds the memory store byte budget",
            ));
        }
        Ok(())
    }

    async fn get(&self, session_id: &str) -> AppResult<Option<Session>> {
        match self.cache.get(session_id) {
            Some(session) if session.is_expired() => {
                self.cache.remove(session_id);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn delete(&self, session_id: &str) -> AppResult<()> {
        self.cache.remove(session_id);
        Ok(())
    }
}
