//! Session entity model.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A server-side session binding a principal and a role set to an opaque
/// identifier, valid for a bounded lifetime.
///
/// Sessions are created by the auth facade on login and destroyed on
/// logout/invalidate, or treated as dead once `expires_at` has passed
/// (lazy expiry — the record may physically persist until a read or a
/// cleanup pass removes it). The record is immutable except for `roles`;
/// a role assign/remove rewrites the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque unique session identifier, never reused while live.
    pub session_id: String,
    /// The principal this session belongs to.
    pub user_id: i64,
    /// Role names assigned to this session. Assignment order is
    /// irrelevant, so the set is kept in its canonical sorted form.
    pub roles: BTreeSet<String>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session expires. Always after `created_at`.
    pub expires_at: DateTime<Utc>,
    /// The signed token issued for this session.
    pub token: String,
}

impl Session {
    /// Check whether the session has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Canonical stored size of this session in bytes.
    ///
    /// Deterministic field-by-field accounting, independent of any
    /// serialization library: the UTF-8 byte length of each string field
    /// (roles included) plus 8 bytes each for `user_id`, `created_at`,
    /// and `expires_at` (64-bit integer representations). Cache size
    /// bookkeeping adds and subtracts exactly this value.
    pub fn canonical_size(&self) -> usize {
        let roles: usize = self.roles.iter().map(|r| r.len()).sum();
        self.session_id.len() + roles + self.token.len() + 8 * 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn make_session(expires_in: Duration) -> Session {
        let now = Utc::now();
        Session {
            session_id: "abc123".to_string(),
            user_id: 7,
            roles: ["member".to_string()].into_iter().collect(),
            created_at: now,
            expires_at: now + expires_in,
            token: "tok".to_string(),
        }
    }

    #[test]
    fn test_not_expired_while_live() {
        assert!(!make_session(Duration::hours(1)).is_expired());
    }

    #[test]
    fn test_expired_after_deadline() {
        assert!(make_session(Duration::seconds(-1)).is_expired());
    }

    #[test]
    fn test_canonical_size_field_by_field() {
        let session = make_session(Duration::hours(1));
        // 6 (session_id) + 6 (roles) + 3 (token) + 24 (numeric fields)
        assert_eq!(session.canonical_size(), 39);
    }

    #[test]
    fn test_canonical_size_ignores_role_order() {
        let mut a = make_session(Duration::hours(1));
        a.roles = ["editor".into(), "viewer".into()].into_iter().collect();
        let mut b = a.clone();
        b.roles = ["viewer".into(), "editor".into()].into_iter().collect();
        assert_eq!(a.canonical_size(), b.canonical_size());
    }
}
