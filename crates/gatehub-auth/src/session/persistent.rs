//! Durable session store with an optional read/write-through cache.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use gatehub_cache::BoundedCache;
use gatehub_core::config::session::PersistentSessionConfig;
use gatehub_core::duration::parse_duration;
use gatehub_core::result::AppResult;
use gatehub_database::SessionRepository;
use gatehub_entity::Session;

use crate::session::store::SessionStore;

/// Session store backed by a [`SessionRepository`], optionally fronted
/// by a byte-bounded cache.
///
/// The durable store is authoritative. Writes go to the repository
/// first; the cache is only updated after the write succeeds, so a
/// storage failure never leaves the cache ahead of the store. A cache
/// insert that fails (oversized entry) is not an error — the session is
/// durable, reads just fall through to the repository.
#[derive(Debug)]
pub struct PersistentSessionStore {
    repository: Arc<dyn SessionRepository>,
    cache: Option<BoundedCache<Session>>,
}

impl PersistentSessionStore {
    pub fn new(repository: Arc<dyn SessionRepository>, config: &PersistentSessionConfig) -> Self {
        let cache = config.use_cache.then(|| {
            let ttl = parse_duration(&config.cache_duration, chrono::Duration::hours(1));
            BoundedCache::new(config.cache_size_bytes, ttl)
        });
        Self { repository, cache }
    }
}

#[async_trait]
impl SessionStore for PersistentSessionStore {
    async fn set(&self, session: &Session) -> AppResult<()> {
        // Durable write first. The repository floors created_at on
        // conflict and returns the stored record; caching anything else
        // would let the two copies drift until eviction.
        let stored = self.repository.upsert(session).await?;
        if let Some(cache) = &self.cache {
            let key = stored.session_id.clone();
            cache.insert(&key, stored);
        }
        Ok(())
    }

    async fn get(&self, session_id: &str) -> AppResult<Option<Session>> {
        if let Some(cache) = &self.cache {
            if let Some(session) = cache.get(session_id) {
                if session.is_expired() {
                    self.delete(session_id).await?;
                    return Ok(None);
                }
                return Ok(Some(session));
            }
        }

        match self.repository.find_by_id(session_id).await? {
            Some(session) if session.is_expired() => {
                self.delete(session_id).await?;
                Ok(None)
            }
            Some(session) => {
                debug!(session_id, "Cache miss, repopulating from store");
                if let Some(cache) = &self.cache {
                    cache.insert(session_id, session.clone());
                }
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, session_id: &str) -> AppResult<()> {
        // Evict before the durable delete so a failure cannot leave a
        // cached copy of a record the caller believes is gone.
        if let Some(cache) = &self.cache {
            cache.remove(session_id);
        }
        self.repository.delete(session_id).await?;
        Ok(())
    }
}
