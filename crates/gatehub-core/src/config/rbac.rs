//! Role-based access control configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// RBAC configuration: the role registry seeded at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Whether the configured roles are loaded into the registry.
    /// When disabled the registry starts empty; every permission check
    /// consequently denies until roles are created at runtime.
    #[serde(default)]
    pub enabled: bool,
    /// Role name → role definition.
    #[serde(default)]
    pub roles: HashMap<String, RoleConfig>,
}

/// A single configured role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleConfig {
    /// Permission strings in `resource:action:scope` form, or `"*"`.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Names of roles whose permissions this role inherits.
    #[serde(default)]
    pub inherits: Vec<String>,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
}
