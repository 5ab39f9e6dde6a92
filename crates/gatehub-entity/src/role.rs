//! Role entity model.

use serde::{Deserialize, Serialize};

use crate::permission::Permission;

/// A named role: a set of permissions plus the roles it inherits from.
///
/// The inheritance relation over role names must stay acyclic; the role
/// registry rejects any mutation that would introduce a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique role name.
    pub name: String,
    /// Permissions granted directly by this role.
    pub permissions: Vec<Permission>,
    /// Names of roles whose permissions this role inherits, in
    /// declaration order.
    pub inherits: Vec<String>,
    /// Human-readable description.
    pub description: Option<String>,
}
