// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Role-based permission checks over the user and role repositories.

use std::sync::Arc;

use statamic_mcp_core::traits::{HandleRepository, PermissionChecker, UserRepository};
use statamic_mcp_core::types::{Role, User};
use statamic_mcp_core::Actor;
use tracing::{debug, warn};

/// Grants a permission when the actor is a super user, or when one of the
/// actor's roles lists it.
///
/// The actor is looked up by id, then by email. Unknown actors hold no
/// permissions; lookup failures deny.
pub struct RolePermissionChecker {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn HandleRepository<Role>>,
}

impl RolePermissionChecker {
    pub fn new(users: Arc<dyn UserRepository>, roles: Arc<dyn HandleRepository<Role>>) -> Self {
        Self { users, roles }
    }

    fn user(&self, actor: &Actor) -> Option<User> {
        let by_id = self.users.find(&actor.id);
        let found = match (by_id, actor.email.as_deref()) {
            (Ok(Some(user)), _) => Ok(Some(user)),
            (Ok(None), Some(email)) => self.users.find_by_email(email),
            (other, _) => other,
        };
        found
            .inspect_err(|e| warn!(actor = %actor.id, error = %e, "user lookup failed"))
            .ok()
            .flatten()
    }
}

impl PermissionChecker for RolePermissionChecker {
    fn has_permission(&self, actor: &Actor, permission: &str) -> bool {
        let Some(user) = self.user(actor) else {
            debug!(actor = %actor.id, "unknown actor");
            return false;
        };
        if user.super_user {
            return true;
        }
        user.roles.iter().any(|handle| match self.roles.find(handle) {
            Ok(Some(role)) => role.permissions.iter().any(|p| p == permission),
            Ok(None) => false,
            Err(e) => {
                warn!(role = %handle, error = %e, "role lookup failed");
                false
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use statamic_mcp_core::types::JsonObject;

    use super::*;
    use crate::MemoryStore;

    fn checker() -> RolePermissionChecker {
        let store = Arc::new(MemoryStore::new());
        HandleRepository::<Role>::save(
            store.as_ref(),
            Role {
                handle: "editor".into(),
                title: "Editor".into(),
                permissions: vec!["view articles entries".into(), "edit articles entries".into()],
            },
        )
        .unwrap();
        for (id, email, super_user, roles) in [
            ("admin", "admin@x.test", true, vec![]),
            ("ed", "ed@x.test", false, vec!["editor".to_string()]),
            ("ghost", "ghost@x.test", false, vec!["missing".to_string()]),
        ] {
            UserRepository::save(
                store.as_ref(),
                User {
                    id: id.into(),
                    email: email.into(),
                    name: None,
                    super_user,
                    roles,
                    data: JsonObject::new(),
                },
            )
            .unwrap();
        }
        RolePermissionChecker::new(store.clone(), store)
    }

    #[test]
    fn super_user_holds_everything() {
        assert!(checker().has_permission(&Actor::new("admin"), "super"));
    }

    #[test]
    fn role_permissions_are_granted() {
        let checker = checker();
        let ed = Actor::new("ed");
        assert!(checker.has_permission(&ed, "edit articles entries"));
        assert!(!checker.has_permission(&ed, "delete articles entries"));
        assert!(!checker.has_permission(&ed, "super"));
    }

    #[test]
    fn actor_resolves_by_email() {
        let actor = Actor::new("external-42").with_email("ed@x.test");
        assert!(checker().has_permission(&actor, "view articles entries"));
    }

    #[test]
    fn unknown_actor_and_unknown_role_deny() {
        let checker = checker();
        assert!(!checker.has_permission(&Actor::new("nobody"), "view articles entries"));
        assert!(!checker.has_permission(&Actor::new("ghost"), "view articles entries"));
    }
}
