// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool trait and registry.
//!
//! A [`Tool`] is a named, static table of actions. The [`ToolRegistry`] wraps
//! each registered tool in a [`RegisteredTool`] holding the `(type, action)`
//! index, and produces the tool definitions advertised to clients.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Value, json};
use statamic_mcp_core::{Domain, RequestField, ToolError, ToolRequest};
use tracing::warn;

use crate::action::{ActionSpec, DISCOVERY_ACTIONS, action_key};
use crate::discovery;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A named tool exposing a fixed set of actions.
pub trait Tool: Send + Sync {
    /// Unique name, e.g. `statamic.entries`.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn domain(&self) -> Domain;

    /// Values accepted for `type`. Empty for single-resource tools.
    fn targets(&self) -> &'static [&'static str] {
        &[]
    }

    fn actions(&self) -> &'static [ActionSpec];
}

/// A tool plus its action index.
pub struct RegisteredTool {
    tool: Arc<dyn Tool>,
    index: HashMap<String, &'static ActionSpec>,
}

impl RegisteredTool {
    pub fn new(tool: Arc<dyn Tool>) -> Self {
        let mut index = HashMap::new();
        for spec in tool.actions() {
            if index.insert(spec.key(), spec).is_some() {
                warn!(tool = tool.name(), action = spec.name, "duplicate action key in table");
            }
        }
        Self { tool, index }
    }

    pub fn name(&self) -> &'static str {
        self.tool.name()
    }

    pub fn description(&self) -> &'static str {
        self.tool.description()
    }

    pub fn domain(&self) -> Domain {
        self.tool.domain()
    }

    pub fn targets(&self) -> &'static [&'static str] {
        self.tool.targets()
    }

    pub fn actions(&self) -> &'static [ActionSpec] {
        self.tool.actions()
    }

    pub fn has_targets(&self) -> bool {
        !self.targets().is_empty()
    }

    pub fn lookup(&self, target: Option<&str>, action: &str) -> Option<&'static ActionSpec> {
        self.index.get(&action_key(target, action)).copied()
    }

    /// Action names accepted for `target`, in table order, followed by the
    /// discovery actions.
    pub fn action_names(&self, target: Option<&str>) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for spec in self.actions() {
            if (target.is_none() || spec.target == target) && !names.contains(&spec.name) {
                names.push(spec.name);
            }
        }
        names.extend(DISCOVERY_ACTIONS);
        names
    }

    /// Resolves the request's `type` and `action` to an action spec.
    pub fn resolve(&self, request: &ToolRequest) -> Result<&'static ActionSpec, ToolError> {
        let target = if self.has_targets() {
            let target = request
                .text(RequestField::Type)
                .ok_or_else(|| ToolError::missing_field("type"))?;
            if !self.targets().contains(&target) {
                return Err(ToolError::validation(format!(
                    "Unknown type '{target}' for {}. Valid types: {}",
                    self.name(),
                    self.targets().join(", ")
                )));
            }
            Some(target)
        } else {
            None
        };

        self.lookup(target, &request.action).ok_or_else(|| {
            let valid = self.action_names(target);
            let mut message = format!(
                "Unknown action '{}' for {}. Valid actions: {}",
                request.action,
                self.name(),
                valid.join(", ")
            );
            if let Some(suggestion) = suggest(&request.action, &valid) {
                message.push_str(&format!(". Did you mean '{suggestion}'?"));
            }
            ToolError::validation(message)
        })
    }

    /// JSON Schema for the tool's argument object.
    pub fn input_schema(&self) -> Value {
        discovery::input_schema(self)
    }
}

fn suggest<'a>(unknown: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|c| (strsim::jaro_winkler(unknown, c), *c))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, c)| c)
}

/// Registry of tools, indexed by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<&'static str, Arc<RegisteredTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool, replacing any tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let registered = RegisteredTool::new(tool);
        self.tools.insert(registered.name(), Arc::new(registered));
    }

    pub fn get(&self, name: &str) -> Option<Arc<RegisteredTool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered tool names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.tools.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// (name, description) pairs, sorted by name.
    pub fn list(&self) -> Vec<(&'static str, &'static str)> {
        let mut entries: Vec<_> = self
            .tools
            .values()
            .map(|t| (t.name(), t.description()))
            .collect();
        entries.sort_by_key(|(name, _)| *name);
        entries
    }

    /// Tool definitions (`name`, `description`, `input_schema`), sorted by name.
    pub fn tool_definitions(&self) -> Vec<Value> {
        self.names()
            .into_iter()
            .filter_map(|name| self.tools.get(name))
            .map(|t| {
                json!({
                    "name": t.name(),
                    "description": t.description(),
                    "input_schema": t.input_schema(),
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
