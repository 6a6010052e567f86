// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `statamic.globals`: global sets and their per-site values.

use std::collections::BTreeMap;

use serde_json::{Value, json};
use statamic_mcp_core::services::find_or_not_found;
use statamic_mcp_core::types::{GlobalSet, JsonObject};
use statamic_mcp_core::{Domain, RequestField, Services, ToolError, ToolRequest};

use super::support::{deleted, list_json, merge, site_or_default, str_field, titleize};
use crate::action::ActionSpec;
use crate::tool::Tool;

pub struct GlobalsTool;

impl Tool for GlobalsTool {
    fn name(&self) -> &'static str {
        "statamic.globals"
    }

    fn description(&self) -> &'static str {
        "Read and edit global sets and their per-site values"
    }

    fn domain(&self) -> Domain {
        Domain::Globals
    }

    fn actions(&self) -> &'static [ActionSpec] {
        &ACTIONS
    }
}

static ACTIONS: [ActionSpec; 5] = [
    ActionSpec::new("list", "List global sets", list)
        .purpose("See which global sets exist")
        .examples(&[r#"{"action": "list"}"#]),
    ActionSpec::new("get", "Fetch a global set's values for one site", get)
        .purpose("Read site-wide settings such as SEO defaults or contact details")
        .requires(&[RequestField::Handle])
        .examples(&[
            r#"{"action": "get", "handle": "settings"}"#,
            r#"{"action": "get", "handle": "settings", "site": "fr"}"#,
        ]),
    ActionSpec::new("create", "Create a global set", create)
        .purpose("Add a global set; data.title names it and other keys seed the site's values")
        .requires(&[RequestField::Handle])
        .mutating()
        .examples(&[r#"{"action": "create", "handle": "seo", "data": {"title": "SEO", "meta_title": "My Site"}}"#]),
    ActionSpec::new("update", "Merge values into a global set for one site", update)
        .purpose("Edit site-wide settings")
        .requires(&[RequestField::Handle, RequestField::Data])
        .mutating()
        .examples(&[r#"{"action": "update", "handle": "settings", "data": {"phone": "555-0100"}}"#]),
    ActionSpec::new("delete", "Delete a global set", delete)
        .purpose("Remove a global set and all of its values")
        .requires(&[RequestField::Handle])
        .destructive()
        .examples(&[r#"{"action": "delete", "handle": "seo"}"#]),
];

fn find(services: &Services, request: &ToolRequest) -> Result<GlobalSet, ToolError> {
    find_or_not_found(services.globals.as_ref(), request.require(RequestField::Handle)?)
}

fn summary(set: &GlobalSet) -> Value {
    json!({
        "handle": set.handle,
        "title": set.title,
        "sites": set.values.keys().collect::<Vec<_>>(),
    })
}

fn site_view(set: &GlobalSet, site: &str) -> Value {
    json!({
        "handle": set.handle,
        "title": set.title,
        "site": site,
        "values": set.values.get(site).cloned().unwrap_or_default(),
    })
}

fn list(services: &Services, _request: &ToolRequest) -> Result<Value, ToolError> {
    let sets: Vec<Value> = services.globals.all()?.iter().map(summary).collect();
    list_json(&sets)
}

fn get(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let set = find(services, request)?;
    Ok(site_view(&set, &site_or_default(services, request)?))
}

fn create(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let handle = request.require(RequestField::Handle)?;
    if services.globals.find(handle)?.is_some() {
        return Err(ToolError::conflict(format!(
            "Global set '{handle}' already exists"
        )));
    }

    let mut values: JsonObject = request.data_or_empty();
    let title = str_field(&values, "title")
        .map(str::to_string)
        .unwrap_or_else(|| titleize(handle));
    values.remove("title");

    let site = site_or_default(services, request)?;
    let set = GlobalSet {
        handle: handle.to_string(),
        title,
        values: BTreeMap::from([(site.clone(), values)]),
    };
    let saved = services.globals.save(set)?;
    Ok(site_view(&saved, &site))
}

fn update(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let mut set = find(services, request)?;
    let site = site_or_default(services, request)?;
    merge(set.values.entry(site.clone()).or_default(), request.require_data()?);
    let saved = services.globals.save(set)?;
    Ok(site_view(&saved, &site))
}

fn delete(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let set = find(services, request)?;
    services.globals.delete(&set.handle)?;
    Ok(deleted("global", &set.handle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_view_defaults_to_empty_values() {
        let set = GlobalSet {
            handle: "settings".into(),
            title: "Settings".into(),
            values: BTreeMap::new(),
        };
        let view = site_view(&set, "default");
        assert_eq!(view["values"], json!({}));
        assert_eq!(summary(&set)["sites"], json!([]));
    }
}
