//! The auth facade: sessions, tokens, and permission checks in one place.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use gatehub_core::config::AppConfig;
use gatehub_core::result::AppResult;
use gatehub_database::SessionRepository;
use gatehub_entity::Session;

use crate::rbac::RoleRegistry;
use crate::session::{SessionStore, build_session_store, generate_session_id};
use crate::token::TokenManager;

/// Composes the token manager, a session store, and the role registry.
///
/// Callers hold tokens, never session ids: every operation takes the
/// signed token, verifies it, and works on the session it names. Invalid
/// tokens and absent sessions are ordinary negative outcomes (`None`,
/// `false`, or a silent no-op), not errors; errors mean storage or
/// signing failed.
#[derive(Debug)]
pub struct AuthSystem {
    tokens: TokenManager,
    sessions: Arc<dyn SessionStore>,
    registry: Arc<RoleRegistry>,
    token_id_length: usize,
}

impl AuthSystem {
    pub fn new(
        tokens: TokenManager,
        sessions: Arc<dyn SessionStore>,
        registry: Arc<RoleRegistry>,
        token_id_length: usize,
    ) -> Self {
        Self {
            tokens,
            sessions,
            registry,
            token_id_length,
        }
    }

    /// Assemble the full system from configuration. The repository is
    /// only required for the persistent session strategy.
    pub fn from_config(
        config: &AppConfig,
        repository: Option<Arc<dyn SessionRepository>>,
    ) -> AppResult<Self> {
        let tokens = TokenManager::new(&config.auth);
        let sessions = build_session_store(&config.session, repository)?;
        let registry = Arc::new(RoleRegistry::from_config(&config.rbac)?);
        Ok(Self::new(
            tokens,
            sessions,
            registry,
            config.auth.token_id_length,
        ))
    }

    /// The role registry, for role administration.
    pub fn registry(&self) -> &Arc<RoleRegistry> {
        &self.registry
    }

    /// Open a session for a user and return the signed token for it.
    ///
    /// Role names are not validated against the registry here; unknown
    /// names simply grant nothing at check time.
    pub async fn create_session<I, S>(&self, user_id: i64, roles: I) -> AppResult<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roles: BTreeSet<String> = roles.into_iter().map(Into::into).collect();
        let session_id = generate_session_id(self.token_id_length);
        let token = self.tokens.issue(&session_id)?;

        let now = Utc::now();
        let session = Session {
            session_id,
            user_id,
            roles,
            created_at: now,
            expires_at: now + self.tokens.expiry(),
            token: token.clone(),
        };
        self.sessions.set(&session).await?;

        info!(user_id, session_id = %session.session_id, "Session created");
        Ok(token)
    }

    /// Verify a token and fetch the live session it names. `None` for an
    /// invalid token, an absent session, or an expired one.
    pub async fn validate_session(&self, token: &str) -> AppResult<Option<Session>> {
        let Some(session_id) = self.tokens.verify(token) else {
            return Ok(None);
        };
        self.sessions.get(&session_id).await
    }

    /// Close the session a token names. A no-op for invalid tokens and
    /// already-absent sessions.
    pub async fn invalidate_session(&self, token: &str) -> AppResult<()> {
        if let Some(session_id) = self.tokens.verify(token) {
            self.sessions.delete(&session_id).await?;
            info!(session_id = %session_id, "Session invalidated");
        }
        Ok(())
    }

    /// Whether the session behind `token` holds `permission`. The
    /// session's own user id acts as the principal for `own`-scoped
    /// checks against `resource_owner`.
    pub async fn has_permission(
        &self,
        token: &str,
        permission: &str,
        resource_owner: Option<i64>,
    ) -> AppResult<bool> {
        let Some(session) = self.validate_session(token).await? else {
            return Ok(false);
        };
        Ok(self.registry.has_permission(
            &session.roles,
            permission,
            resource_owner,
            Some(session.user_id),
        ))
    }

    /// Add a registry role to the session behind `token`. Returns `false`
    /// when the token or session is invalid or the role is not defined;
    /// `true` when the session now holds the role (including when it
    /// already did).
    pub async fn assign_role(&self, token: &str, role_name: &str) -> AppResult<bool> {
        let Some(mut session) = self.validate_session(token).await? else {
            return Ok(false);
        };
        if !self.registry.contains(role_name) {
            warn!(role = role_name, "Refusing to assign undefined role");
            return Ok(false);
        }
        if session.roles.insert(role_name.to_string()) {
            self.sessions.set(&session).await?;
        }
        Ok(true)
    }

    /// Remove a role from the session behind `token`. Returns `false`
    /// when the token or session is invalid or the session did not hold
    /// the role.
    pub async fn remove_role(&self, token: &str, role_name: &str) -> AppResult<bool> {
        let Some(mut session) = self.validate_session(token).await? else {
            return Ok(false);
        };
        if !session.roles.remove(role_name) {
            return Ok(false);
        }
        self.sessions.set(&session).await?;
        Ok(true)
    }
}
