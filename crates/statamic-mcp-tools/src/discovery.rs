// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `help`, `discover`, and `examples`: answered from a tool's own action table.

use serde_json::{Map, Value, json};
use statamic_mcp_core::{RequestField, ToolRequest};

use crate::action::{ActionSpec, DISCOVERY_ACTIONS};
use crate::tool::RegisteredTool;

/// Answers a discovery action, or `None` when `request.action` is not one.
///
/// An optional `type` narrows the answer to one sub-target; an unrecognized
/// `type` is ignored rather than rejected.
pub fn answer(tool: &RegisteredTool, request: &ToolRequest) -> Option<Value> {
    let target = request
        .text(RequestField::Type)
        .filter(|t| tool.targets().contains(t));
    match request.action.as_str() {
        "help" => Some(help(tool, target)),
        "discover" => Some(discover(tool, target)),
        "examples" => Some(examples(tool, target)),
        _ => None,
    }
}

fn in_scope<'a>(
    tool: &'a RegisteredTool,
    target: Option<&'a str>,
) -> impl Iterator<Item = &'static ActionSpec> + 'a {
    tool.actions()
        .iter()
        .filter(move |spec| target.is_none() || spec.target == target)
}

fn help(tool: &RegisteredTool, target: Option<&str>) -> Value {
    let actions: Vec<Value> = in_scope(tool, target)
        .map(|spec| {
            let mut entry = json!({
                "action": spec.name,
                "description": spec.descriptor.description,
                "required": spec.requires.iter().map(|f| f.as_str()).collect::<Vec<_>>(),
                "destructive": spec.descriptor.destructive,
            });
            if let Some(t) = spec.target {
                entry["type"] = json!(t);
            }
            entry
        })
        .collect();

    let mut out = json!({
        "tool": tool.name(),
        "description": tool.description(),
        "actions": actions,
        "discovery": DISCOVERY_ACTIONS,
    });
    if tool.has_targets() {
        out["types"] = json!(tool.targets());
    }
    out
}

fn discover(tool: &RegisteredTool, target: Option<&str>) -> Value {
    let mut capabilities = Map::new();
    for spec in in_scope(tool, target) {
        let group = spec.target.unwrap_or("default");
        let slot = capabilities
            .entry(group.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(list) = slot {
            list.push(json!({
                "action": spec.name,
                "description": spec.descriptor.description,
                "purpose": spec.descriptor.purpose,
                "required": spec.requires.iter().map(|f| f.as_str()).collect::<Vec<_>>(),
                "destructive": spec.descriptor.destructive,
                "mutates": spec.descriptor.mutates,
            }));
        }
    }

    json!({
        "tool": tool.name(),
        "domain": tool.domain(),
        "description": tool.description(),
        "types": tool.targets(),
        "capabilities": capabilities,
        "input_schema": input_schema(tool),
    })
}

fn examples(tool: &RegisteredTool, target: Option<&str>) -> Value {
    let examples: Vec<Value> = in_scope(tool, target)
        .flat_map(|spec| {
            spec.descriptor.examples.iter().map(move |raw| {
                let payload =
                    serde_json::from_str(raw).unwrap_or_else(|_| Value::String((*raw).to_string()));
                json!({
                    "action": spec.name,
                    "description": spec.descriptor.description,
                    "payload": payload,
                })
            })
        })
        .collect();

    json!({
        "tool": tool.name(),
        "examples": examples,
    })
}

/// JSON Schema for a tool's argument object.
///
/// Only `action` is required at the schema level; per-action requirements are
/// enforced by the router.
pub fn input_schema(tool: &RegisteredTool) -> Value {
    let actions = tool.action_names(None);

    let mut properties = json!({
        "action": {"type": "string", "enum": actions, "description": "Action to perform"},
        "id": {"type": "string"},
        "handle": {"type": "string"},
        "collection": {"type": "string"},
        "taxonomy": {"type": "string"},
        "container": {"type": "string"},
        "path": {"type": "string"},
        "namespace": {"type": "string"},
        "site": {"type": "string"},
        "data": {"type": "object"},
        "filters": {"type": "object"},
        "limit": {"type": "integer", "minimum": 1},
        "offset": {"type": "integer", "minimum": 0},
        "status": {"type": "string", "enum": ["published", "draft"]},
        "confirm": {"type": "boolean"},
        "segments": {"type": "array", "items": {"type": "string"}},
    });
    if tool.has_targets() {
        properties["type"] = json!({
            "type": "string",
            "enum": tool.targets(),
            "description": "Resource type the action applies to",
        });
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": ["action"],
    })
}
