// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `statamic.system`: install overview and cache control.

use serde_json::{Value, json};
use statamic_mcp_core::types::Query;
use statamic_mcp_core::{Domain, Services, ToolError, ToolRequest};

use crate::action::ActionSpec;
use crate::tool::Tool;

pub struct SystemTool;

impl Tool for SystemTool {
    fn name(&self) -> &'static str {
        "statamic.system"
    }

    fn description(&self) -> &'static str {
        "Report install information and inspect or clear caches"
    }

    fn domain(&self) -> Domain {
        Domain::System
    }

    fn actions(&self) -> &'static [ActionSpec] {
        &ACTIONS
    }
}

static ACTIONS: [ActionSpec; 3] = [
    ActionSpec::new("info", "Report versions and resource counts", info)
        .purpose("Get an overview of the install before making changes")
        .examples(&[r#"{"action": "info"}"#]),
    ActionSpec::new("cache_status", "Report the state of each cache segment", cache_status)
        .purpose("Check whether caches are warm or recently cleared")
        .examples(&[r#"{"action": "cache_status"}"#]),
    ActionSpec::new("cache_clear", "Clear cache segments", cache_clear)
        .purpose("Clear the named segments, or every known segment; safe to repeat")
        .examples(&[
            r#"{"action": "cache_clear"}"#,
            r#"{"action": "cache_clear", "segments": ["stache", "static"]}"#,
        ]),
];

/// Total match count for an unfiltered listing.
fn everything() -> Query {
    Query {
        limit: 0,
        ..Query::default()
    }
}

fn info(services: &Services, _request: &ToolRequest) -> Result<Value, ToolError> {
    let collections = services.collections.all()?;
    let taxonomies = services.taxonomies.all()?;
    let term_total = taxonomies
        .iter()
        .map(|t| services.terms.count(&t.handle))
        .sum::<Result<usize, _>>()?;
    let containers = services.containers.all()?;
    let asset_total = containers
        .iter()
        .map(|c| services.assets.count(&c.handle))
        .sum::<Result<usize, _>>()?;
    let sites = services.sites.all()?;

    Ok(json!({
        "server": {
            "name": "statamic-mcp",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "default_site": sites.first().map(|s| s.handle.clone()),
        "sites": sites.iter().map(|s| s.handle.clone()).collect::<Vec<_>>(),
        "counts": {
            "collections": collections.len(),
            "entries": services.entries.query(None, &everything())?.total,
            "taxonomies": taxonomies.len(),
            "terms": term_total,
            "global_sets": services.globals.all()?.len(),
            "asset_containers": containers.len(),
            "assets": asset_total,
            "blueprints": services.blueprints.all(None)?.len(),
            "users": services.users.query(&everything())?.total,
            "roles": services.roles.all()?.len(),
            "navigations": services.navigations.all()?.len(),
        },
    }))
}

fn cache_status(services: &Services, _request: &ToolRequest) -> Result<Value, ToolError> {
    Ok(json!({ "segments": serde_json::to_value(services.cache.status()?)? }))
}

fn cache_clear(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let known: Vec<String> = services
        .cache
        .status()?
        .into_iter()
        .map(|s| s.name)
        .collect();

    let segments = match &request.segments {
        Some(requested) if !requested.is_empty() => {
            if let Some(unknown) = requested.iter().find(|s| !known.contains(s)) {
                return Err(ToolError::validation(format!(
                    "Unknown cache segment '{unknown}'. Valid segments: {}",
                    known.join(", ")
                )));
            }
            requested.clone()
        }
        _ => known,
    };

    services.cache.clear(&segments)?;
    Ok(json!({ "cleared": segments }))
}
