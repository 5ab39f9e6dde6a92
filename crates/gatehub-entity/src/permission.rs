//! Permission string model.
//!
//! Permissions take the form `resource:action:scope` where the scope is
//! `any` (every resource instance) or `own` (only resources whose owner is
//! the acting principal), or the single wildcard token `*` which grants
//! everything.

use serde::{Deserialize, Serialize};

use gatehub_core::AppError;

/// Permission qualifier distinguishing "any resource instance" from
/// "only resources owned by the acting principal".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// The action is granted on every resource instance.
    Any,
    /// The action is granted only when the acting principal owns the
    /// resource.
    Own,
}

impl Scope {
    /// Return the scope as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Own => "own",
        }
    }
}

/// A validated permission string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Permission {
    /// The literal `*`: grants every permission check unconditionally.
    Wildcard,
    /// A `resource:action:scope` grant.
    Scoped {
        /// Resource segment (`[a-z_]+`).
        resource: String,
        /// Action segment (`[a-z_]+`).
        action: String,
        /// Scope qualifier.
        scope: Scope,
    },
}

/// Segments are restricted to lowercase ASCII letters and underscores.
fn valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_lowercase() || c == '_')
}

impl std::str::FromStr for Permission {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            return Ok(Self::Wildcard);
        }

        let mut parts = s.split(':');
        let (Some(resource), Some(action), Some(scope), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AppError::malformed_permission(format!(
                "Permission '{s}' is not of the form resource:action:scope"
            )));
        };

        if !valid_segment(resource) || !valid_segment(action) {
            return Err(AppError::malformed_permission(format!(
                "Permission '{s}' has an invalid resource or action segment"
            )));
        }

        let scope = match scope {
            "any" => Scope::Any,
            "own" => Scope::Own,
            other => {
                return Err(AppError::malformed_permission(format!(
                    "Permission '{s}' has unknown scope '{other}'"
                )));
            }
        };

        Ok(Self::Scoped {
            resource: resource.to_string(),
            action: action.to_string(),
            scope,
        })
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wildcard => write!(f, "*"),
            Self::Scoped {
                resource,
                action,
                scope,
            } => write!(f, "{resource}:{action}:{}", scope.as_str()),
        }
    }
}

impl TryFrom<String> for Permission {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Permission> for String {
    fn from(value: Permission) -> Self {
        value.to_string()
    }
}
