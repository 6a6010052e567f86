// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `statamic.blueprints`: field schemas, addressed by namespace and handle.
//!
//! Blueprint `contents` are stored and returned as given; their structure
//! belongs to the host CMS.

use serde_json::{Value, json};
use statamic_mcp_core::types::{Blueprint, JsonObject};
use statamic_mcp_core::{
    Domain, RequestField, ResourceKind, Services, ToolError, ToolRequest,
};

use super::support::{bool_field, deleted, list_json, require_confirmation, str_field, titleize, to_json};
use crate::action::ActionSpec;
use crate::tool::Tool;

pub struct BlueprintsTool;

impl Tool for BlueprintsTool {
    fn name(&self) -> &'static str {
        "statamic.blueprints"
    }

    fn description(&self) -> &'static str {
        "List, read, create, update and delete blueprints"
    }

    fn domain(&self) -> Domain {
        Domain::Blueprints
    }

    fn actions(&self) -> &'static [ActionSpec] {
        &ACTIONS
    }
}

static ACTIONS: [ActionSpec; 5] = [
    ActionSpec::new("list", "List blueprints, optionally within one namespace", list)
        .purpose("See which field schemas exist")
        .examples(&[
            r#"{"action": "list"}"#,
            r#"{"action": "list", "namespace": "collections.articles"}"#,
        ]),
    ActionSpec::new("get", "Fetch a blueprint with its contents", get)
        .purpose("Inspect the fields an entry, term or global set accepts")
        .requires(&[RequestField::Namespace, RequestField::Handle])
        .examples(&[r#"{"action": "get", "namespace": "collections.articles", "handle": "article"}"#]),
    ActionSpec::new("create", "Create a blueprint", create)
        .purpose("Define a new field schema; data.contents holds tabs and fields")
        .requires(&[RequestField::Namespace, RequestField::Handle, RequestField::Data])
        .mutating()
        .examples(&[
            r#"{"action": "create", "namespace": "collections.articles", "handle": "article", "data": {"title": "Article", "contents": {"tabs": {"main": {"fields": [{"handle": "title", "field": {"type": "text"}}]}}}}}"#,
        ]),
    ActionSpec::new("update", "Replace a blueprint's title, visibility or contents", update)
        .purpose("Change a field schema")
        .requires(&[RequestField::Namespace, RequestField::Handle, RequestField::Data])
        .mutating()
        .examples(&[
            r#"{"action": "update", "namespace": "collections.articles", "handle": "article", "data": {"hidden": true}}"#,
        ]),
    ActionSpec::new("delete", "Delete a blueprint", delete)
        .purpose("Remove a field schema; requires confirm: true")
        .requires(&[RequestField::Namespace, RequestField::Handle])
        .precheck(require_confirmation)
        .destructive()
        .examples(&[
            r#"{"action": "delete", "namespace": "collections.articles", "handle": "article", "confirm": true}"#,
        ]),
];

fn key(request: &ToolRequest) -> Result<(&str, &str), ToolError> {
    Ok((
        request.require(RequestField::Namespace)?,
        request.require(RequestField::Handle)?,
    ))
}

fn find(services: &Services, request: &ToolRequest) -> Result<Blueprint, ToolError> {
    let (namespace, handle) = key(request)?;
    services
        .blueprints
        .find(namespace, handle)?
        .ok_or_else(|| ToolError::not_found(ResourceKind::Blueprint, format!("{namespace}.{handle}")))
}

/// `data.contents` when present, otherwise every key except `title` and `hidden`.
fn contents_from(data: &JsonObject) -> Value {
    match data.get("contents") {
        Some(contents) => contents.clone(),
        None => Value::Object(
            data.iter()
                .filter(|(k, _)| k.as_str() != "title" && k.as_str() != "hidden")
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ),
    }
}

fn list(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let blueprints: Vec<Value> = services
        .blueprints
        .all(request.text(RequestField::Namespace))?
        .iter()
        .map(|b| {
            json!({
                "namespace": b.namespace,
                "handle": b.handle,
                "title": b.title,
                "hidden": b.hidden,
            })
        })
        .collect();
    list_json(&blueprints)
}

fn get(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    to_json(&find(services, request)?)
}

fn create(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let (namespace, handle) = key(request)?;
    let data = request.require_data()?;
    if services.blueprints.find(namespace, handle)?.is_some() {
        return Err(ToolError::conflict(format!(
            "Blueprint '{namespace}.{handle}' already exists"
        )));
    }

    let blueprint = Blueprint {
        namespace: namespace.to_string(),
        handle: handle.to_string(),
        title: str_field(data, "title")
            .map(str::to_string)
            .unwrap_or_else(|| titleize(handle)),
        hidden: bool_field(data, "hidden").unwrap_or(false),
        contents: contents_from(data),
    };
    to_json(&services.blueprints.save(blueprint)?)
}

fn update(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let mut blueprint = find(services, request)?;
    let data = request.require_data()?;

    if let Some(title) = str_field(data, "title") {
        blueprint.title = title.to_string();
    }
    if let Some(hidden) = bool_field(data, "hidden") {
        blueprint.hidden = hidden;
    }
    if data.keys().any(|k| k != "title" && k != "hidden") {
        blueprint.contents = contents_from(data);
    }
    to_json(&services.blueprints.save(blueprint)?)
}

fn delete(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let blueprint = find(services, request)?;
    services
        .blueprints
        .delete(&blueprint.namespace, &blueprint.handle)?;
    Ok(deleted(
        "blueprint",
        &format!("{}.{}", blueprint.namespace, blueprint.handle),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contents_prefers_explicit_key() {
        let data: JsonObject =
            serde_json::from_value(json!({"title": "A", "contents": {"tabs": {}}})).unwrap();
        assert_eq!(contents_from(&data), json!({"tabs": {}}));

        let data: JsonObject =
            serde_json::from_value(json!({"title": "A", "hidden": true, "tabs": {"main": {}}})).unwrap();
        assert_eq!(contents_from(&data), json!({"tabs": {"main": {}}}));
    }
}
