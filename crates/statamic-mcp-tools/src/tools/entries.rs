// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `statamic.entries`: content entries within collections.

use chrono::Utc;
use serde_json::Value;
use statamic_mcp_core::types::Entry;
use statamic_mcp_core::{
    Domain, RequestField, ResourceKind, Services, ToolError, ToolRequest,
};
use uuid::Uuid;

use super::support::{
    bool_field, deleted, merge, page_json, query_from, site_or_default, slugify, str_field, to_json,
};
use crate::action::ActionSpec;
use crate::tool::Tool;

pub struct EntriesTool;

impl Tool for EntriesTool {
    fn name(&self) -> &'static str {
        "statamic.entries"
    }

    fn description(&self) -> &'static str {
        "List, read, create, update, delete, publish and unpublish collection entries"
    }

    fn domain(&self) -> Domain {
        Domain::Entries
    }

    fn actions(&self) -> &'static [ActionSpec] {
        &ACTIONS
    }
}

static ACTIONS: [ActionSpec; 7] = [
    ActionSpec::new("list", "List entries, optionally within one collection", list)
        .purpose("Browse content with filters, site and status selection, and pagination")
        .precheck(collection_exists_if_given)
        .examples(&[
            r#"{"action": "list", "collection": "articles", "limit": 10}"#,
            r#"{"action": "list", "collection": "articles", "status": "draft", "filters": {"author": "jane"}}"#,
        ]),
    ActionSpec::new("get", "Fetch one entry by id", get)
        .purpose("Read an entry's full data")
        .requires(&[RequestField::Id])
        .precheck(entry_in_given_collection)
        .examples(&[r#"{"action": "get", "id": "4f7c1d2e"}"#]),
    ActionSpec::new("create", "Create an entry in a collection", create)
        .purpose("Add content; the slug comes from data.slug or the title")
        .requires(&[RequestField::Collection, RequestField::Data])
        .precheck(collection_exists)
        .mutating()
        .examples(&[
            r#"{"action": "create", "collection": "articles", "data": {"title": "Hello World", "content": "First post"}}"#,
        ]),
    ActionSpec::new("update", "Merge data into an existing entry", update)
        .purpose("Edit content fields; keys not supplied are left unchanged")
        .requires(&[RequestField::Id, RequestField::Data])
        .precheck(entry_in_given_collection)
        .mutating()
        .examples(&[r#"{"action": "update", "id": "4f7c1d2e", "data": {"title": "Hello again"}}"#]),
    ActionSpec::new("delete", "Delete an entry", delete)
        .purpose("Remove content permanently")
        .requires(&[RequestField::Id])
        .precheck(entry_in_given_collection)
        .destructive()
        .examples(&[r#"{"action": "delete", "id": "4f7c1d2e"}"#]),
    ActionSpec::new("publish", "Publish an entry", publish)
        .purpose("Make an entry publicly visible")
        .requires(&[RequestField::Id])
        .precheck(entry_in_given_collection)
        .mutating()
        .examples(&[r#"{"action": "publish", "id": "4f7c1d2e"}"#]),
    ActionSpec::new("unpublish", "Unpublish an entry", unpublish)
        .purpose("Return an entry to draft")
        .requires(&[RequestField::Id])
        .precheck(entry_in_given_collection)
        .mutating()
        .examples(&[r#"{"action": "unpublish", "id": "4f7c1d2e"}"#]),
];

fn collection_exists(services: &Services, request: &ToolRequest) -> Result<(), ToolError> {
    services
        .collection(request.require(RequestField::Collection)?)
        .map(|_| ())
}

fn collection_exists_if_given(services: &Services, request: &ToolRequest) -> Result<(), ToolError> {
    match request.text(RequestField::Collection) {
        Some(handle) => services.collection(handle).map(|_| ()),
        None => Ok(()),
    }
}

/// An entry addressed by id must live in the `collection` the request names;
/// hosted permissions are scoped to that collection.
fn entry_in_given_collection(services: &Services, request: &ToolRequest) -> Result<(), ToolError> {
    let Some(collection) = request.text(RequestField::Collection) else {
        return Ok(());
    };
    let id = request.require(RequestField::Id)?;
    match find(services, id) {
        Ok(entry) if entry.collection == collection => Ok(()),
        Ok(_) | Err(ToolError::NotFound { .. }) => {
            Err(ToolError::not_found(ResourceKind::Entry, id))
        }
        Err(e) => Err(e),
    }
}

fn find(services: &Services, id: &str) -> Result<Entry, ToolError> {
    services
        .entries
        .find(id)?
        .ok_or_else(|| ToolError::not_found(ResourceKind::Entry, id))
}

fn ensure_slug_free(services: &Services, entry: &Entry) -> Result<(), ToolError> {
    match services
        .entries
        .find_by_slug(&entry.collection, &entry.slug, &entry.site)?
    {
        Some(existing) if existing.id != entry.id => Err(ToolError::conflict(format!(
            "Entry with slug '{}' already exists in collection '{}'",
            entry.slug, entry.collection
        ))),
        _ => Ok(()),
    }
}

fn list(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let page = services
        .entries
        .query(request.text(RequestField::Collection), &query_from(request))?;
    page_json(&page)
}

fn get(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    to_json(&find(services, request.require(RequestField::Id)?)?)
}

fn create(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let collection = request.require(RequestField::Collection)?;
    let data = request.require_data()?;

    let slug = str_field(data, "slug")
        .map(slugify)
        .or_else(|| str_field(data, "title").map(slugify))
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ToolError::validation("Entry data requires a title or slug"))?;

    let now = Utc::now();
    let entry = Entry {
        id: Uuid::new_v4().to_string(),
        collection: collection.to_string(),
        slug,
        site: site_or_default(services, request)?,
        published: bool_field(data, "published").unwrap_or(true),
        data: data.clone(),
        created_at: now,
        updated_at: now,
    };
    ensure_slug_free(services, &entry)?;
    to_json(&services.entries.save(entry)?)
}

fn update(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let mut entry = find(services, request.require(RequestField::Id)?)?;
    let data = request.require_data()?;

    merge(&mut entry.data, data);
    if let Some(slug) = str_field(data, "slug").map(slugify).filter(|s| !s.is_empty()) {
        entry.slug = slug;
        ensure_slug_free(services, &entry)?;
    }
    if let Some(published) = bool_field(data, "published") {
        entry.published = published;
    }
    entry.updated_at = Utc::now();
    to_json(&services.entries.save(entry)?)
}

fn delete(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let entry = find(services, request.require(RequestField::Id)?)?;
    services.entries.delete(&entry.id)?;
    Ok(deleted("entry", &entry.id))
}

fn set_published(
    services: &Services,
    request: &ToolRequest,
    published: bool,
) -> Result<Value, ToolError> {
    let mut entry = find(services, request.require(RequestField::Id)?)?;
    entry.published = published;
    entry.updated_at = Utc::now();
    to_json(&services.entries.save(entry)?)
}

fn publish(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    set_published(services, request, true)
}

fn unpublish(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    set_published(services, request, false)
}
