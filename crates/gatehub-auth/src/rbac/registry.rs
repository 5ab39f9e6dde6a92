//! Role registry: role CRUD, inheritance, and permission checks.

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;
use tracing::{debug, info};

use gatehub_core::config::rbac::RbacConfig;
use gatehub_core::error::AppError;
use gatehub_core::result::AppResult;
use gatehub_entity::{Permission, Role, Scope};

/// In-process role registry.
///
/// Mutations guard two invariants: every stored permission parses, and
/// the inheritance relation stays acyclic. Inheriting a role that does
/// not exist (yet) is allowed — unknown names simply contribute nothing
/// at resolution time — so configuration order never matters.
///
/// Resolution walks inheritance with a per-call visited set, so it
/// terminates even if a cycle were ever present in the data.
#[derive(Debug, Default)]
pub struct RoleRegistry {
    roles: RwLock<HashMap<String, Role>>,
}

/// Whether `target` is reachable by following inheritance edges from
/// `start_edges` through `roles`.
fn reaches(roles: &HashMap<String, Role>, start_edges: &[String], target: &str) -> bool {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = start_edges.iter().map(String::as_str).collect();
    while let Some(name) = stack.pop() {
        if name == target {
            return true;
        }
        if !visited.insert(name) {
            continue;
        }
        if let Some(role) = roles.get(name) {
            stack.extend(role.inherits.iter().map(String::as_str));
        }
    }
    false
}

fn parse_permissions(permissions: &[String]) -> AppResult<Vec<Permission>> {
    permissions.iter().map(|p| p.parse()).collect()
}

impl RoleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a registry from configuration. When RBAC is disabled the
    /// registry starts empty and every check denies.
    pub fn from_config(config: &RbacConfig) -> AppResult<Self> {
        let registry = Self::new();
        if !config.enabled {
            return Ok(registry);
        }
        for (name, role) in &config.roles {
            registry
                .create_role(
                    name,
                    &role.permissions,
                    &role.inherits,
                    role.description.clone(),
                )
                .map_err(|e| {
                    AppError::configuration(format!("Invalid configured role '{name}': {e}"))
                })?;
        }
        info!(roles = config.roles.len(), "Loaded roles from configuration");
        Ok(registry)
    }

    /// Define a new role.
    ///
    /// Rejects a duplicate name, a malformed permission string, and any
    /// inheritance list that would close a cycle back to this role.
    pub fn create_role(
        &self,
        name: &str,
        permissions: &[String],
        inherits: &[String],
        description: Option<String>,
    ) -> AppResult<()> {
        let permissions = parse_permissions(permissions)?;
        let mut roles = self.roles.write();

        if roles.contains_key(name) {
            return Err(AppError::conflict(format!("Role '{name}' already exists")));
        }
        if reaches(&roles, inherits, name) {
            return Err(AppError::circular_inheritance(format!(
                "Role '{name}' would inherit itself"
            )));
        }

        debug!(role = name, "Role created");
        roles.insert(
            name.to_string(),
            Role {
                name: name.to_string(),
                permissions,
                inherits: inherits.to_vec(),
                description,
            },
        );
        Ok(())
    }

    /// Replace an existing role's permissions, inheritance, and
    /// description. The same cycle and format guards as creation apply.
    pub fn update_role(
        &self,
        name: &str,
        permissions: &[String],
        inherits: &[String],
        description: Option<String>,
    ) -> AppResult<()> {
        let permissions = parse_permissions(permissions)?;
        let mut roles = self.roles.write();

        if !roles.contains_key(name) {
            return Err(AppError::unknown_role(format!("Role '{name}' does not exist")));
        }
        // `reaches` tests the name before expanding it, so the role's
        // current edges never leak into the check.
        if reaches(&roles, inherits, name) {
            return Err(AppError::circular_inheritance(format!(
                "Updating role '{name}' would close an inheritance cycle"
            )));
        }

        debug!(role = name, "Role updated");
        roles.insert(
            name.to_string(),
            Role {
                name: name.to_string(),
                permissions,
                inherits: inherits.to_vec(),
                description,
            },
        );
        Ok(())
    }

    /// Remove a role. Refused while any other role still inherits it.
    pub fn delete_role(&self, name: &str) -> AppResult<()> {
        let mut roles = self.roles.write();

        if !roles.contains_key(name) {
            return Err(AppError::unknown_role(format!("Role '{name}' does not exist")));
        }
        if let Some(dependent) = roles
            .values()
            .find(|r| r.name != name && r.inherits.iter().any(|i| i == name))
        {
            return Err(AppError::conflict(format!(
                "Role '{name}' is still inherited by '{}'",
                dependent.name
            )));
        }

        debug!(role = name, "Role deleted");
        roles.remove(name);
        Ok(())
    }

    /// Fetch a role definition by name.
    pub fn role(&self, name: &str) -> Option<Role> {
        self.roles.read().get(name).cloned()
    }

    /// Whether a role with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.roles.read().contains_key(name)
    }

    /// All currently defined role names.
    pub fn role_names(&self) -> Vec<String> {
        self.roles.read().keys().cloned().collect()
    }

    /// The union of permissions granted by the given roles, transitively
    /// through inheritance. Unknown role names contribute nothing.
    pub fn resolve_permissions<I, S>(&self, role_names: I) -> HashSet<Permission>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let roles = self.roles.read();
        let mut visited: HashSet<String> = HashSet::new();
        let mut stack: Vec<String> = role_names
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        let mut permissions = HashSet::new();

        while let Some(name) = stack.pop() {
            if !visited.insert(name.clone()) {
                continue;
            }
            if let Some(role) = roles.get(&name) {
                permissions.extend(role.permissions.iter().cloned());
                stack.extend(role.inherits.iter().cloned());
            }
        }
        permissions
    }

    /// Decide whether the given roles grant `permission`.
    ///
    /// Grant order: the wildcard, then the `any`-scoped form, then the
    /// `own`-scoped form — the last only when the resource owner and the
    /// acting principal are both known and equal. A request string that
    /// does not parse is denied, never an error.
    pub fn has_permission<I, S>(
        &self,
        role_names: I,
        permission: &str,
        resource_owner: Option<i64>,
        acting_user: Option<i64>,
    ) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Ok(requested) = permission.parse::<Permission>() else {
            debug!(permission, "Malformed permission in check, denying");
            return false;
        };

        let granted = self.resolve_permissions(role_names);
        if granted.contains(&Permission::Wildcard) {
            return true;
        }

        let Permission::Scoped {
            resource, action, ..
        } = requested
        else {
            // Asking for "*" itself: only the wildcard grants it.
            return false;
        };

        let any = Permission::Scoped {
            resource: resource.clone(),
            action: action.clone(),
            scope: Scope::Any,
        };
        if granted.contains(&any) {
            return true;
        }

        let own = Permission::Scoped {
            resource,
            action,
            scope: Scope::Own,
        };
        if granted.contains(&own) {
            return matches!(
                (resource_owner, acting_user),
                (Some(owner), Some(acting)) if owner == acting
            );
        }
        false
    }

    /// Insert a role without the cycle guard. Resolution must stay
    /// terminating even over a corrupted graph.
    #[cfg(test)]
    fn insert_unchecked(&self, name: &str, permissions: &[String], inherits: &[String]) {
        self.roles.write().insert(
            name.to_string(),
            Role {
                name: name.to_string(),
                permissions: parse_permissions(permissions).unwrap(),
                inherits: inherits.to_vec(),
                description: None,
            },
        );
    }
}
