//! Session store variants and periodic cleanup.
//!
//! The strategy is chosen once from configuration; everything behind the
//! [`SessionStore`] trait object is interchangeable from the facade's
//! point of view.

pub mod cleanup;
pub mod id;
pub mod memory;
pub mod persistent;
pub mod store;

use std::sync::Arc;

use tracing::info;

use gatehub_core::config::session::{SessionConfig, SessionStrategy};
use gatehub_core::error::AppError;
use gatehub_core::result::AppResult;
use gatehub_database::SessionRepository;

pub use cleanup::SessionCleanup;
pub use id::generate_session_id;
pub use memory::MemorySessionStore;
pub use persistent::PersistentSessionStore;
pub use store::SessionStore;

/// Build the configured session store.
///
/// The persistent strategy requires a repository; passing `None` with
/// `strategy = "persistent"` is a configuration error.
pub fn build_session_store(
    config: &SessionConfig,
    repository: Option<Arc<dyn SessionRepository>>,
) -> AppResult<Arc<dyn SessionStore>> {
    match config.strategy {
        SessionStrategy::Memory => {
            info!(
                max_size_bytes = config.memory.max_size_bytes,
                "Using in-memory session store"
            );
            Ok(Arc::new(MemorySessionStore::new(&config.memory)))
        }
        SessionStrategy::Persistent => {
            let repository = repository.ok_or_else(|| {
                AppError::configuration(
                    "Persistent session strategy requires a session repository",
                )
            })?;
            info!(
                use_cache = config.persistent.use_cache,
                "Using persistent session store"
            );
            Ok(Arc::new(PersistentSessionStore::new(
                repository,
                &config.persistent,
            )))
        }
    }
}
