// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The action router: the single entry point for every tool call.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. tool lookup
//! 2. request parsing
//! 3. discovery actions (answered immediately, never audited)
//! 4. hosted-context tool gate
//! 5. `type` and `action` resolution
//! 6. required fields
//! 7. hosted-context permissions
//! 8. the action's precheck
//!
//! Only then is the handler run inside the audit wrapper. Successful
//! mutating actions are followed by cache invalidation.

use std::collections::HashSet;

use serde_json::Value;
use statamic_mcp_audit::Auditor;
use statamic_mcp_core::{
    Envelope, ExecutionContext, RequestField, Services, ToolError, ToolRequest,
};
use tracing::{debug, warn};

use crate::action::ActionSpec;
use crate::discovery;
use crate::permissions::PermissionResolver;
use crate::tool::{RegisteredTool, ToolRegistry};

/// Page size used when neither the request nor the policy sets one.
pub const DEFAULT_LIMIT: usize = 50;
/// Largest page size honored unless the policy says otherwise.
pub const DEFAULT_MAX_LIMIT: usize = 100;

/// Router settings derived from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterPolicy {
    /// Whether hosted invocation is allowed at all.
    pub web_enabled: bool,
    /// Tools refused in hosted context even when `web_enabled` is set.
    pub web_disabled_tools: HashSet<String>,
    /// Cache segments cleared after a successful mutating action.
    pub write_segments: Vec<String>,
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for RouterPolicy {
    fn default() -> Self {
        Self {
            web_enabled: false,
            web_disabled_tools: HashSet::new(),
            write_segments: vec!["stache".to_string(), "static".to_string()],
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

impl RouterPolicy {
    /// True if `tool` may be invoked in hosted context.
    pub fn web_allows(&self, tool: &str) -> bool {
        self.web_enabled && !self.web_disabled_tools.contains(tool)
    }

    /// Applies the default page size and clamps to `1..=max_limit`.
    pub fn clamp_limit(&self, requested: Option<usize>) -> usize {
        let max = self.max_limit.max(1);
        requested.unwrap_or(self.default_limit).clamp(1, max)
    }
}

pub struct ActionRouter {
    registry: ToolRegistry,
    services: Services,
    auditor: Auditor,
    resolver: PermissionResolver,
    policy: RouterPolicy,
}

impl std::fmt::Debug for ActionRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRouter")
            .field("registry", &self.registry)
            .field("resolver", &self.resolver)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ActionRouter {
    pub fn new(registry: ToolRegistry, services: Services, auditor: Auditor) -> Self {
        Self {
            registry,
            services,
            auditor,
            resolver: PermissionResolver::default(),
            policy: RouterPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RouterPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_resolver(mut self, resolver: PermissionResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn policy(&self) -> &RouterPolicy {
        &self.policy
    }

    /// Routes one call. Never panics and always returns an envelope.
    pub fn call(&self, tool: &str, arguments: Value, context: &ExecutionContext) -> Envelope {
        match self.dispatch(tool, arguments, context) {
            Ok(data) => Envelope::success(data),
            Err(err) => {
                debug!(tool, context = %context.kind(), kind = err.kind(), error = %err, "tool call failed");
                Envelope::from_error(&err)
            }
        }
    }

    fn dispatch(
        &self,
        tool_name: &str,
        arguments: Value,
        context: &ExecutionContext,
    ) -> Result<Value, ToolError> {
        let tool = self
            .registry
            .get(tool_name)
            .ok_or_else(|| ToolError::validation(format!("Unknown tool: {tool_name}")))?;

        let raw = arguments.clone();
        let mut request = ToolRequest::from_value(arguments)?;

        if let Some(answer) = discovery::answer(&tool, &request) {
            return Ok(answer);
        }

        if context.is_hosted() && !self.policy.web_allows(tool.name()) {
            return Err(ToolError::PermissionDenied(format!(
                "Tool {} is not enabled for web access",
                tool.name()
            )));
        }

        let spec = tool.resolve(&request)?;
        debug!(tool = tool.name(), action = spec.name, target_type = ?spec.target, "action resolved");

        if let Some(missing) = spec.requires.iter().find(|field| !request.has(**field)) {
            return Err(ToolError::missing_field(missing.as_str()));
        }

        if context.is_hosted() {
            self.authorize(&tool, spec, &request, context)?;
        }

        if let Some(precheck) = spec.precheck {
            precheck(&self.services, &request)?;
        }

        request.limit = Some(self.policy.clamp_limit(request.limit));
        request.offset = Some(request.offset.unwrap_or(0));

        let invocation = self.auditor.invocation(
            tool.name(),
            spec.name,
            audit_target(&tool, spec, &request),
            context,
            &raw,
        );
        let result = self
            .auditor
            .run(&invocation, || (spec.handler)(&self.services, &request));

        if result.is_ok() && spec.descriptor.mutates {
            self.invalidate(tool.name(), spec.name);
        }
        result
    }

    fn authorize(
        &self,
        tool: &RegisteredTool,
        spec: &ActionSpec,
        request: &ToolRequest,
        context: &ExecutionContext,
    ) -> Result<(), ToolError> {
        let actor = context.actor().ok_or(ToolError::Unauthenticated)?;
        let required = self
            .resolver
            .resolve(tool.domain(), spec.target, spec.name, request);
        for permission in &required {
            if !self.services.permissions.has_permission(actor, permission) {
                return Err(ToolError::PermissionDenied(format!(
                    "Permission denied: requires '{permission}'"
                )));
            }
        }
        Ok(())
    }

    fn invalidate(&self, tool: &str, action: &str) {
        if self.policy.write_segments.is_empty() {
            return;
        }
        if let Err(e) = self.services.cache.clear(&self.policy.write_segments) {
            warn!(tool, action, error = %e, "cache invalidation failed");
        }
    }
}

/// `domain[:type][:scope]`, e.g. `entries:articles` or `assets:asset:main`.
fn audit_target(tool: &RegisteredTool, spec: &ActionSpec, request: &ToolRequest) -> String {
    let mut target = tool.domain().to_string();
    if let Some(t) = spec.target {
        target.push(':');
        target.push_str(t);
    }
    let scope = [
        RequestField::Collection,
        RequestField::Taxonomy,
        RequestField::Container,
        RequestField::Namespace,
    ]
    .into_iter()
    .find_map(|field| request.text(field));
    if let Some(scope) = scope {
        target.push(':');
        target.push_str(scope);
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn web_gate_requires_enable_and_not_disabled() {
        let mut policy = RouterPolicy::default();
        assert!(!policy.web_allows("statamic.entries"));

        policy.web_enabled = true;
        policy.web_disabled_tools.insert("statamic.users".to_string());
        assert!(policy.web_allows("statamic.entries"));
        assert!(!policy.web_allows("statamic.users"));
    }

    #[test]
    fn limits_default_and_clamp() {
        let policy = RouterPolicy {
            default_limit: 20,
            max_limit: 40,
            ..RouterPolicy::default()
        };
        assert_eq!(policy.clamp_limit(None), 20);
        assert_eq!(policy.clamp_limit(Some(500)), 40);
        assert_eq!(policy.clamp_limit(Some(0)), 1);
        assert_eq!(policy.clamp_limit(Some(7)), 7);
    }
}
