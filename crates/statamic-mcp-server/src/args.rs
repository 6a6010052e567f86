// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The argument object every tool accepts, as advertised to MCP clients.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use statamic_mcp_core::JsonObject;

/// Arguments of a tool call. Which fields matter depends on the action;
/// call any tool with `{"action": "help"}` to list them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ToolArguments {
    /// Action to run, or one of `help`, `discover`, `examples`.
    pub action: String,
    /// Sub-target for tools that manage several record kinds (e.g. `user` or `role`).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Record identifier (entry id, user id, term slug).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Record handle (global set, blueprint, container, role, structure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<String>,
    /// Asset container handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    /// Asset path inside its container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Blueprint namespace, e.g. `collections.articles`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    /// Field values for create and update actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonObject>,
    /// Field equality filters for list actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<JsonObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// `published` or `draft`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Required for destructive actions that ask for confirmation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<bool>,
    /// Cache segments for `cache_clear`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<String>>,
}

impl ToolArguments {
    pub fn action(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Self::default()
        }
    }

    /// The raw JSON object handed to the router.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(JsonObject::new()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn omits_unset_fields_and_renames_type() {
        let args = ToolArguments {
            target: Some("role".into()),
            handle: Some("editor".into()),
            ..ToolArguments::action("get")
        };
        assert_eq!(
            args.to_value(),
            json!({"action": "get", "type": "role", "handle": "editor"})
        );
    }

    #[test]
    fn missing_action_deserializes_empty() {
        let args: ToolArguments = serde_json::from_value(json!({"id": "x"})).unwrap();
        assert!(args.action.is_empty());
    }
}
