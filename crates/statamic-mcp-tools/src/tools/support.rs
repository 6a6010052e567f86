// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers shared by the domain handlers.

use serde::Serialize;
use serde_json::{Value, json};
use statamic_mcp_core::types::{JsonObject, Page, Query};
use statamic_mcp_core::{RequestField, Services, ToolError, ToolRequest};

use crate::router::DEFAULT_LIMIT;

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<Value, ToolError> {
    Ok(serde_json::to_value(value)?)
}

/// Serializes a page with its pagination metadata.
pub(crate) fn page_json<T: Serialize>(page: &Page<T>) -> Result<Value, ToolError> {
    Ok(json!({
        "items": to_json(&page.items)?,
        "total": page.total,
        "limit": page.limit,
        "offset": page.offset,
        "has_more": page.has_more(),
    }))
}

/// Wraps a full (unpaginated) listing.
pub(crate) fn list_json<T: Serialize>(items: &[T]) -> Result<Value, ToolError> {
    Ok(json!({
        "items": to_json(&items)?,
        "total": items.len(),
    }))
}

pub(crate) fn deleted(kind: &str, key: &str) -> Value {
    json!({ "deleted": true, "type": kind, "key": key })
}

/// Listing parameters from the request. The router has already normalized
/// `limit` and `offset`.
pub(crate) fn query_from(request: &ToolRequest) -> Query {
    Query {
        filters: request.filters_or_empty(),
        site: request.text(RequestField::Site).map(str::to_string),
        status: request.status,
        limit: request.limit.unwrap_or(DEFAULT_LIMIT),
        offset: request.offset.unwrap_or(0),
    }
}

/// The request's site, or the install's default site.
pub(crate) fn site_or_default(services: &Services, request: &ToolRequest) -> Result<String, ToolError> {
    match request.text(RequestField::Site) {
        Some(site) => Ok(site.to_string()),
        None => services.default_site(),
    }
}

/// Lowercase, ASCII-alphanumeric words joined by `-`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// `main_nav` → `Main Nav`. Used when a create omits a title.
pub(crate) fn titleize(handle: &str) -> String {
    handle
        .split(['_', '-', '.'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shallow merge: every key of `patch` overwrites the same key in `target`.
pub(crate) fn merge(target: &mut JsonObject, patch: &JsonObject) {
    for (key, value) in patch {
        target.insert(key.clone(), value.clone());
    }
}

pub(crate) fn str_field<'a>(data: &'a JsonObject, key: &str) -> Option<&'a str> {
    data.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

pub(crate) fn bool_field(data: &JsonObject, key: &str) -> Option<bool> {
    data.get(key).and_then(Value::as_bool)
}

/// A string array from `data`; non-string items are rejected.
pub(crate) fn string_list(data: &JsonObject, key: &str) -> Result<Option<Vec<String>>, ToolError> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    ToolError::validation(format!("Field '{key}' must be a list of strings"))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => Err(ToolError::validation(format!(
            "Field '{key}' must be a list of strings"
        ))),
    }
}

/// Precheck requiring an explicit `confirm: true`.
pub(crate) fn require_confirmation(_: &Services, request: &ToolRequest) -> Result<(), ToolError> {
    if request.confirmed() {
        Ok(())
    } else {
        Err(ToolError::validation(format!(
            "Action '{}' is destructive and requires confirm: true",
            request.action
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust  2024 edition "), "rust-2024-edition");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn titleize_handles() {
        assert_eq!(titleize("main_nav"), "Main Nav");
        assert_eq!(titleize("blog-posts"), "Blog Posts");
    }

    #[test]
    fn string_list_rejects_mixed_arrays() {
        let data: JsonObject = serde_json::from_value(json!({"roles": ["a", 1]})).unwrap();
        assert!(string_list(&data, "roles").is_err());
        let data: JsonObject = serde_json::from_value(json!({"roles": ["a", "b"]})).unwrap();
        assert_eq!(string_list(&data, "roles").unwrap(), Some(vec!["a".into(), "b".into()]));
        assert_eq!(string_list(&data, "missing").unwrap(), None);
    }

    #[test]
    fn merge_overwrites_keys() {
        let mut target: JsonObject = serde_json::from_value(json!({"a": 1, "b": 2})).unwrap();
        let patch: JsonObject = serde_json::from_value(json!({"b": 3, "c": 4})).unwrap();
        merge(&mut target, &patch);
        assert_eq!(Value::Object(target), json!({"a": 1, "b": 3, "c": 4}));
    }
}
