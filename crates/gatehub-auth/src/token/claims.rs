//! Claims payload embedded in every session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token claims: the session id plus standard expiry metadata. The token
/// carries the id as an opaque claim, never the session record itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// The session this token is bound to.
    pub sid: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl TokenClaims {
    /// Build claims for a session valid from `now` until `now + ttl`.
    pub fn new(session_id: &str, now: DateTime<Utc>, ttl: chrono::Duration) -> Self {
        Self {
            sid: session_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}
