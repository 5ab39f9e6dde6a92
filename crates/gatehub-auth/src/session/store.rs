//! The session store seam.

use async_trait::async_trait;

use gatehub_core::result::AppResult;
use gatehub_entity::Session;

/// Keyed storage for session records.
///
/// Implementations apply lazy expiry: a read that finds an expired record
/// deletes it and reports absence, so callers never observe an expired
/// session. Storage failures propagate as errors; absence is `None`.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Insert or replace a session, keyed by its id. Replacing an
    /// existing session keeps the older `created_at` of the two.
    async fn set(&self, session: &Session) -> AppResult<()>;

    /// Fetch a live session by id. Expired records are deleted on the
    /// way out and reported as `None`.
    async fn get(&self, session_id: &str) -> AppResult<Option<Session>>;

    /// Remove a session. Idempotent: removing an absent id is not an
    /// error.
    async fn delete(&self, session_id: &str) -> AppResult<()>;

    /// Whether a live session exists under this id.
    async fn is_valid(&self, session_id: &str) -> AppResult<bool> {
        Ok(self.get(session_id).await?.is_some())
    }
}
