// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps an action to the host permissions it requires in hosted context.
//!
//! Names follow the host convention (`edit {collection} entries`,
//! `view {taxonomy} terms`, ...). Anything without a narrower mapping, or a
//! scoped permission whose scope is missing from the request, resolves to the
//! superuser permission. User writes that set `super` or `roles` also need
//! the superuser permission. The result is never empty.

use statamic_mcp_core::{Domain, RequestField, ToolRequest};

/// Default name of the all-powerful permission.
pub const DEFAULT_SUPERUSER_PERMISSION: &str = "super";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionResolver {
    superuser: String,
}

impl Default for PermissionResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SUPERUSER_PERMISSION)
    }
}

impl PermissionResolver {
    pub fn new(superuser: impl Into<String>) -> Self {
        Self {
            superuser: superuser.into(),
        }
    }

    pub fn superuser(&self) -> &str {
        &self.superuser
    }

    /// Permissions required for `action` on `domain` (and `target`, for tools
    /// with sub-targets), in check order.
    pub fn resolve(
        &self,
        domain: Domain,
        target: Option<&str>,
        action: &str,
        request: &ToolRequest,
    ) -> Vec<String> {
        let resolved = match domain {
            Domain::Entries => scoped(request, RequestField::Collection, |collection| {
                let verb = match action {
                    "list" | "get" => "view",
                    "create" => "create",
                    "update" => "edit",
                    "delete" => "delete",
                    "publish" | "unpublish" => "publish",
                    _ => return None,
                };
                Some(format!("{verb} {collection} entries"))
            }),
            Domain::Terms => scoped(request, RequestField::Taxonomy, |taxonomy| {
                let verb = match action {
                    "list" | "get" => "view",
                    "create" => "create",
                    "update" => "edit",
                    "delete" => "delete",
                    _ => return None,
                };
                Some(format!("{verb} {taxonomy} terms"))
            }),
            Domain::Globals => match action {
                "list" => fixed("access cp"),
                "get" | "update" => scoped(request, RequestField::Handle, |handle| {
                    Some(format!("edit {handle} globals"))
                }),
                _ => None,
            },
            Domain::Blueprints => match action {
                "list" | "get" | "create" | "update" | "delete" => fixed("configure fields"),
                _ => None,
            },
            Domain::Assets => match (target, action) {
                (Some("container"), "list" | "get") => fixed("access cp"),
                (Some("container"), "create" | "update" | "delete") => {
                    fixed("configure asset containers")
                }
                (Some("asset"), _) => scoped(request, RequestField::Container, |container| {
                    let verb = match action {
                        "list" | "get" => "view",
                        "update" => "edit",
                        "move" => "move",
                        "rename" => "rename",
                        "delete" => "delete",
                        _ => return None,
                    };
                    Some(format!("{verb} {container} assets"))
                }),
                _ => None,
            },
            Domain::Users => match (target, action) {
                (Some("user"), "list" | "get") => fixed("view users"),
                (Some("user"), "create") => Some(self.with_grants("create users", request)),
                (Some("user"), "update") => Some(self.with_grants("edit users", request)),
                (Some("user"), "delete") => fixed("delete users"),
                _ => None,
            },
            Domain::Structures => match (target, action) {
                (Some("collection"), _) => fixed("configure collections"),
                (Some("taxonomy"), _) => fixed("configure taxonomies"),
                (Some("navigation"), "list") => fixed("access cp"),
                (Some("navigation"), "get") => scoped(request, RequestField::Handle, |handle| {
                    Some(format!("view {handle} nav"))
                }),
                (Some("navigation"), "create" | "update" | "delete") => fixed("configure navs"),
                (Some("site"), _) => fixed("configure sites"),
                _ => None,
            },
            Domain::System => match action {
                "info" | "cache_status" => fixed("access cp"),
                _ => None,
            },
        };

        resolved.unwrap_or_else(|| vec![self.superuser.clone()])
    }

    /// `base`, plus the superuser permission when `data` sets super status
    /// or roles.
    fn with_grants(&self, base: &str, request: &ToolRequest) -> Vec<String> {
        let mut permissions = vec![base.to_string()];
        let grants = request
            .data
            .as_ref()
            .is_some_and(|data| GRANT_FIELDS.iter().any(|key| data.contains_key(*key)));
        if grants {
            permissions.push(self.superuser.clone());
        }
        permissions
    }
}

/// User `data` keys that change what the user may do.
const GRANT_FIELDS: [&str; 2] = ["super", "roles"];

fn fixed(permission: &str) -> Option<Vec<String>> {
    Some(vec![permission.to_string()])
}

/// Builds a permission scoped to a request field; `None` when the field is absent.
fn scoped(
    request: &ToolRequest,
    field: RequestField,
    build: impl FnOnce(&str) -> Option<String>,
) -> Option<Vec<String>> {
    request.text(field).and_then(build).map(|p| vec![p])
}
