//! Session repository: the durable-store seam.
//!
//! The session stores consume [`SessionRepository`] as a trait object, so
//! the durable backend is an external collaborator from their point of
//! view. [`PgSessionRepository`] is the PostgreSQL implementation.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use gatehub_core::error::{AppError, ErrorKind};
use gatehub_core::result::AppResult;
use gatehub_entity::Session;

/// Durable session persistence keyed by session id.
///
/// Failures here are storage failures: they propagate to the caller
/// unmodified, and a failed write means the mutation did not happen.
#[async_trait]
pub trait SessionRepository: Send + Sync + std::fmt::Debug {
    /// Insert or replace a session record, keyed by `session_id`, and
    /// return the record as stored. An upsert must never move
    /// `created_at` earlier-to-later: the stored record keeps the older
    /// of the two timestamps, so the returned record — not the input —
    /// is what callers may hold on to.
    async fn upsert(&self, session: &Session) -> AppResult<Session>;

    /// Fetch a session by id. `None` when no record exists; callers apply
    /// the lazy-expiry check themselves.
    async fn find_by_id(&self, session_id: &str) -> AppResult<Option<Session>>;

    /// Delete a session record. Returns whether a record was removed.
    async fn delete(&self, session_id: &str) -> AppResult<bool>;

    /// Delete every record whose expiry is before `before`. Returns the
    /// number of rows removed.
    async fn cleanup_expired(&self, before: DateTime<Utc>) -> AppResult<u64>;
}

/// Raw row shape for the sessions table.
#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: String,
    user_id: i64,
    roles: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    token: String,
}

impl TryFrom<SessionRow> for Session {
    type Error = AppError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        let roles: BTreeSet<String> = serde_json::from_str(&row.roles)?;
        Ok(Session {
            session_id: row.session_id,
            user_id: row.user_id,
            roles,
            created_at: row.created_at,
            expires_at: row.expires_at,
            token: row.token,
        })
    }
}

/// PostgreSQL-backed session repository.
#[derive(Debug, Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Create a new repository over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn upsert(&self, session: &Session) -> AppResult<Session> {
        let roles = serde_json::to_string(&session.roles)?;

        // LEAST keeps the original creation time on re-persist; RETURNING
        // hands back the stored row so callers see the floored timestamp.
        let row = sqlx::query_as::<_, SessionRow>(
            "INSERT INTO sessions (session_id, user_id, roles, created_at, expires_at, token) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (session_id) DO UPDATE SET \
                 user_id = EXCLUDED.user_id, \
                 roles = EXCLUDED.roles, \
                 created_at = LEAST(sessions.created_at, EXCLUDED.created_at), \
                 expires_at = EXCLUDED.expires_at, \
                 token = EXCLUDED.token \
             RETURNING session_id, user_id, roles, created_at, expires_at, token",
        )
        .bind(&session.session_id)
        .bind(session.user_id)
        .bind(&roles)
        .bind(session.created_at)
        .bind(session.expires_at)
        .bind(&session.token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert session", e))?;

        row.try_into()
    }

    async fn find_by_id(&self, session_id: &str) -> AppResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT session_id, user_id, roles, created_at, expires_at, token \
             FROM sessions WHERE session_id = $1",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))?;

        row.map(Session::try_from).transpose()
    }

    async fn delete(&self, session_id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete session", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn cleanup_expired(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < $1")
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to cleanup sessions", e)
            })?;
        Ok(result.rows_affected())
    }
}
