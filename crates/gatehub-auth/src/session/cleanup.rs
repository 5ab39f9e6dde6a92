//! Periodic purge of expired session records.
//!
//! Lazy expiry only removes records that are read again; sessions that
//! are simply abandoned would otherwise accumulate in the durable store.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use gatehub_core::result::AppResult;
use gatehub_database::SessionRepository;

/// Sweeps expired rows out of the durable session store. Drive it from
/// a scheduler (e.g. a `tokio::time::interval` loop) at whatever cadence
/// suits the deployment.
#[derive(Debug, Clone)]
pub struct SessionCleanup {
    repository: Arc<dyn SessionRepository>,
}

impl SessionCleanup {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Delete every session whose expiry has passed. Returns the number
    /// of rows removed.
    pub async fn run_cleanup(&self) -> AppResult<u64> {
        let removed = self.repository.cleanup_expired(Utc::now()).await?;
        if removed > 0 {
            info!(removed, "Purged expired session records");
        }
        Ok(removed)
    }
}
