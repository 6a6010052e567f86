// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `statamic.terms`: taxonomy terms. Every action is scoped to a taxonomy
//! whose existence is checked before dispatch. A term's `id` is its slug.

use chrono::Utc;
use serde_json::Value;
use statamic_mcp_core::types::Term;
use statamic_mcp_core::{
    Domain, RequestField, ResourceKind, Services, ToolError, ToolRequest,
};

use super::support::{
    deleted, merge, page_json, query_from, site_or_default, slugify, str_field, to_json,
};
use crate::action::ActionSpec;
use crate::tool::Tool;

pub struct TermsTool;

impl Tool for TermsTool {
    fn name(&self) -> &'static str {
        "statamic.terms"
    }

    fn description(&self) -> &'static str {
        "List, read, create, update and delete taxonomy terms"
    }

    fn domain(&self) -> Domain {
        Domain::Terms
    }

    fn actions(&self) -> &'static [ActionSpec] {
        &ACTIONS
    }
}

static ACTIONS: [ActionSpec; 5] = [
    ActionSpec::new("list", "List the terms of a taxonomy", list)
        .purpose("Browse a taxonomy's vocabulary")
        .requires(&[RequestField::Taxonomy])
        .precheck(taxonomy_exists)
        .examples(&[r#"{"action": "list", "taxonomy": "categories"}"#]),
    ActionSpec::new("get", "Fetch one term by slug", get)
        .purpose("Read a term's data")
        .requires(&[RequestField::Taxonomy, RequestField::Id])
        .precheck(taxonomy_exists)
        .examples(&[r#"{"action": "get", "taxonomy": "categories", "id": "news"}"#]),
    ActionSpec::new("create", "Create a term", create)
        .purpose("Add a term; the slug comes from data.slug or the title")
        .requires(&[RequestField::Taxonomy, RequestField::Data])
        .precheck(taxonomy_exists)
        .mutating()
        .examples(&[r#"{"action": "create", "taxonomy": "categories", "data": {"title": "News"}}"#]),
    ActionSpec::new("update", "Merge data into a term", update)
        .purpose("Edit a term's fields")
        .requires(&[RequestField::Taxonomy, RequestField::Id, RequestField::Data])
        .precheck(taxonomy_exists)
        .mutating()
        .examples(&[
            r#"{"action": "update", "taxonomy": "categories", "id": "news", "data": {"title": "Latest News"}}"#,
        ]),
    ActionSpec::new("delete", "Delete a term", delete)
        .purpose("Remove a term from its taxonomy")
        .requires(&[RequestField::Taxonomy, RequestField::Id])
        .precheck(taxonomy_exists)
        .destructive()
        .examples(&[r#"{"action": "delete", "taxonomy": "categories", "id": "news"}"#]),
];

fn taxonomy_exists(services: &Services, request: &ToolRequest) -> Result<(), ToolError> {
    services
        .taxonomy(request.require(RequestField::Taxonomy)?)
        .map(|_| ())
}

fn find(services: &Services, taxonomy: &str, slug: &str) -> Result<Term, ToolError> {
    services
        .terms
        .find(taxonomy, slug)?
        .ok_or_else(|| ToolError::not_found(ResourceKind::Term, format!("{taxonomy}::{slug}")))
}

fn list(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let taxonomy = request.require(RequestField::Taxonomy)?;
    page_json(&services.terms.query(taxonomy, &query_from(request))?)
}

fn get(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let taxonomy = request.require(RequestField::Taxonomy)?;
    to_json(&find(services, taxonomy, request.require(RequestField::Id)?)?)
}

fn create(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let taxonomy = request.require(RequestField::Taxonomy)?;
    let data = request.require_data()?;

    let slug = str_field(data, "slug")
        .or_else(|| str_field(data, "title"))
        .map(slugify)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ToolError::validation("Term data requires a title or slug"))?;

    if services.terms.find(taxonomy, &slug)?.is_some() {
        return Err(ToolError::conflict(format!(
            "Term '{slug}' already exists in taxonomy '{taxonomy}'"
        )));
    }

    let term = Term {
        taxonomy: taxonomy.to_string(),
        slug,
        site: site_or_default(services, request)?,
        data: data.clone(),
        updated_at: Utc::now(),
    };
    to_json(&services.terms.save(term)?)
}

fn update(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let taxonomy = request.require(RequestField::Taxonomy)?;
    let mut term = find(services, taxonomy, request.require(RequestField::Id)?)?;
    merge(&mut term.data, request.require_data()?);
    term.updated_at = Utc::now();
    to_json(&services.terms.save(term)?)
}

fn delete(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let taxonomy = request.require(RequestField::Taxonomy)?;
    let term = find(services, taxonomy, request.require(RequestField::Id)?)?;
    services.terms.delete(taxonomy, &term.slug)?;
    Ok(deleted("term", &term.slug))
}
