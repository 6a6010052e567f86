// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static action tables.
//!
//! Each tool declares its actions as a `static` slice of [`ActionSpec`]s built
//! with the `const` builder methods below. The registry indexes the slice by
//! `(type, action)` once, at registration.

use serde_json::Value;
use statamic_mcp_core::{RequestField, Services, ToolError, ToolRequest};

/// Actions every tool answers from its own metadata.
pub const DISCOVERY_ACTIONS: [&str; 3] = ["help", "discover", "examples"];

/// Returns true for `help`, `discover`, and `examples`.
pub fn is_discovery(action: &str) -> bool {
    DISCOVERY_ACTIONS.contains(&action)
}

/// Runs the action against the injected repositories.
pub type Handler = fn(&Services, &ToolRequest) -> Result<Value, ToolError>;

/// A check run by the router before the handler is audited and invoked.
pub type Precheck = fn(&Services, &ToolRequest) -> Result<(), ToolError>;

/// Documentation metadata for one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub description: &'static str,
    pub purpose: &'static str,
    /// Removes data; some destructive actions also demand `confirm: true`.
    pub destructive: bool,
    /// Changes stored state; triggers cache invalidation on success.
    pub mutates: bool,
    /// Example request payloads as JSON text.
    pub examples: &'static [&'static str],
}

/// One routable action.
#[derive(Debug, Clone, Copy)]
pub struct ActionSpec {
    /// The `type` this action belongs to, for tools with sub-targets.
    pub target: Option<&'static str>,
    pub name: &'static str,
    pub descriptor: ActionDescriptor,
    /// Fields that must be present before the action is authorized.
    pub requires: &'static [RequestField],
    pub precheck: Option<Precheck>,
    pub handler: Handler,
}

impl ActionSpec {
    pub const fn new(name: &'static str, description: &'static str, handler: Handler) -> Self {
        Self {
            target: None,
            name,
            descriptor: ActionDescriptor {
                description,
                purpose: "",
                destructive: false,
                mutates: false,
                examples: &[],
            },
            requires: &[],
            precheck: None,
            handler,
        }
    }

    pub const fn on(mut self, target: &'static str) -> Self {
        self.target = Some(target);
        self
    }

    pub const fn purpose(mut self, purpose: &'static str) -> Self {
        self.descriptor.purpose = purpose;
        self
    }

    pub const fn requires(mut self, fields: &'static [RequestField]) -> Self {
        self.requires = fields;
        self
    }

    pub const fn precheck(mut self, check: Precheck) -> Self {
        self.precheck = Some(check);
        self
    }

    pub const fn mutating(mut self) -> Self {
        self.descriptor.mutates = true;
        self
    }

    /// Marks the action destructive. Destructive actions always mutate.
    pub const fn destructive(mut self) -> Self {
        self.descriptor.destructive = true;
        self.descriptor.mutates = true;
        self
    }

    pub const fn examples(mut self, examples: &'static [&'static str]) -> Self {
        self.descriptor.examples = examples;
        self
    }

    /// Index key used by the registry.
    pub fn key(&self) -> String {
        action_key(self.target, self.name)
    }
}

/// Registry index key for a `(type, action)` pair.
pub fn action_key(target: Option<&str>, action: &str) -> String {
    match target {
        Some(target) => format!("{target}:{action}"),
        None => action.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn noop(_: &Services, _: &ToolRequest) -> Result<Value, ToolError> {
        Ok(json!(null))
    }

    const SPEC: ActionSpec = ActionSpec::new("delete", "Delete a container", noop)
        .on("container")
        .requires(&[RequestField::Handle])
        .destructive();

    #[test]
    fn destructive_implies_mutates() {
        assert!(SPEC.descriptor.destructive);
        assert!(SPEC.descriptor.mutates);
        assert_eq!(SPEC.key(), "container:delete");
    }

    #[test]
    fn discovery_set() {
        assert!(is_discovery("help"));
        assert!(is_discovery("examples"));
        assert!(!is_discovery("list"));
    }

    #[test]
    fn untargeted_key_is_action_name() {
        assert_eq!(action_key(None, "list"), "list");
    }
}
