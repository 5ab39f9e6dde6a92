//! Schema bootstrap for the sessions table.

use sqlx::PgPool;
use tracing::info;

use gatehub_core::error::{AppError, ErrorKind};

/// The sessions table, keyed by the opaque session id.
///
/// `roles` holds the session's role set as a JSON array; it is rewritten
/// whenever a role is assigned or removed.
const CREATE_SESSIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS sessions (
    session_id  TEXT PRIMARY KEY,
    user_id     BIGINT NOT NULL,
    roles       TEXT NOT NULL DEFAULT '[]',
    created_at  TIMESTAMPTZ NOT NULL,
    expires_at  TIMESTAMPTZ NOT NULL,
    token       TEXT NOT NULL,
    CHECK (expires_at > created_at)
)";

/// Create the schema if it does not exist yet.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Ensuring sessions schema exists...");

    sqlx::query(CREATE_SESSIONS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to create sessions table: {e}"),
                e,
            )
        })?;

    info!("Sessions schema ready");
    Ok(())
}
