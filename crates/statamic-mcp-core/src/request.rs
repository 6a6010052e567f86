// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed view of a tool's JSON argument object.
//!
//! Every recognized key has an explicit optional field; unrecognized keys are
//! dropped during deserialization rather than rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::ToolError;
use crate::types::{JsonObject, PublishStatus};

/// A validated tool request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolRequest {
    /// The action to perform (`list`, `create`, `help`, ...).
    #[serde(default)]
    pub action: String,
    /// Sub-target for tools that manage several resource types.
    #[serde(default, rename = "type")]
    pub target: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub taxonomy: Option<String>,
    #[serde(default)]
    pub container: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub data: Option<JsonObject>,
    #[serde(default)]
    pub filters: Option<JsonObject>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
    #[serde(default)]
    pub status: Option<PublishStatus>,
    #[serde(default)]
    pub confirm: Option<bool>,
    #[serde(default)]
    pub segments: Option<Vec<String>>,
}

/// Request keys an action can declare as required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum RequestField {
    Type,
    Id,
    Handle,
    Collection,
    Taxonomy,
    Container,
    Path,
    Namespace,
    Site,
    Data,
}

impl RequestField {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl ToolRequest {
    /// Parses a raw argument value.
    ///
    /// Fails when the value is not an object, when a recognized key has the
    /// wrong JSON type, or when `action` is missing or blank.
    pub fn from_value(arguments: Value) -> Result<Self, ToolError> {
        if !arguments.is_object() {
            return Err(ToolError::validation(
                "Tool arguments must be a JSON object",
            ));
        }
        let mut request: ToolRequest = serde_json::from_value(arguments)
            .map_err(|e| ToolError::validation(format!("Invalid request: {e}")))?;
        request.action = request.action.trim().to_string();
        if request.action.is_empty() {
            return Err(ToolError::missing_field("action"));
        }
        Ok(request)
    }

    /// Returns true when the field carries a usable value.
    ///
    /// Strings must be non-blank; `data` must be a non-empty object.
    pub fn has(&self, field: RequestField) -> bool {
        match field {
            RequestField::Data => self.data.as_ref().is_some_and(|d| !d.is_empty()),
            other => self.text(other).is_some(),
        }
    }

    /// The non-blank string value of a string field.
    pub fn text(&self, field: RequestField) -> Option<&str> {
        let value = match field {
            RequestField::Type => self.target.as_deref(),
            RequestField::Id => self.id.as_deref(),
            RequestField::Handle => self.handle.as_deref(),
            RequestField::Collection => self.collection.as_deref(),
            RequestField::Taxonomy => self.taxonomy.as_deref(),
            RequestField::Container => self.container.as_deref(),
            RequestField::Path => self.path.as_deref(),
            RequestField::Namespace => self.namespace.as_deref(),
            RequestField::Site => self.site.as_deref(),
            RequestField::Data => None,
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    /// Like [`ToolRequest::text`] but fails with a missing-field error.
    pub fn require(&self, field: RequestField) -> Result<&str, ToolError> {
        self.text(field)
            .ok_or_else(|| ToolError::missing_field(field.as_str()))
    }

    /// The `data` object, failing when absent or empty.
    pub fn require_data(&self) -> Result<&JsonObject, ToolError> {
        self.data
            .as_ref()
            .filter(|d| !d.is_empty())
            .ok_or_else(|| ToolError::missing_field("data"))
    }

    /// The `data` object, or an empty one.
    pub fn data_or_empty(&self) -> JsonObject {
        self.data.clone().unwrap_or_default()
    }

    /// The `filters` object, or an empty one.
    pub fn filters_or_empty(&self) -> JsonObject {
        self.filters.clone().unwrap_or_default()
    }

    /// True only for an explicit `confirm: true`.
    pub fn confirmed(&self) -> bool {
        self.confirm == Some(true)
    }

    /// Reads a string out of `data`.
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.get(key))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unknown_keys_are_ignored() {
        let request = ToolRequest::from_value(json!({
            "action": "list",
            "collection": "articles",
            "something_else": [1, 2, 3]
        }))
        .unwrap();
        assert_eq!(request.action, "list");
        assert_eq!(request.collection.as_deref(), Some("articles"));
    }

    #[test]
    fn missing_action_is_a_validation_error() {
        let err = ToolRequest::from_value(json!({"collection": "articles"})).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: action");

        let err = ToolRequest::from_value(json!({"action": "  "})).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: action");
    }

    #[test]
    fn non_object_arguments_are_rejected() {
        let err = ToolRequest::from_value(json!(["list"])).unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
    }

    #[test]
    fn wrong_type_for_known_key_is_rejected() {
        let err = ToolRequest::from_value(json!({"action": "list", "limit": "ten"})).unwrap_err();
        assert!(err.to_string().starts_with("Invalid request:"));
    }

    #[test]
    fn type_key_maps_to_target() {
        let request =
            ToolRequest::from_value(json!({"action": "delete", "type": "container"})).unwrap();
        assert_eq!(request.text(RequestField::Type), Some("container"));
    }

    #[test]
    fn blank_strings_and_empty_data_count_as_missing() {
        let request = ToolRequest::from_value(json!({
            "action": "create",
            "id": "   ",
            "data": {}
        }))
        .unwrap();
        assert!(!request.has(RequestField::Id));
        assert!(!request.has(RequestField::Data));
        assert_eq!(
            request.require(RequestField::Id).unwrap_err().to_string(),
            "Missing required field: id"
        );
        assert_eq!(
            request.require_data().unwrap_err().to_string(),
            "Missing required field: data"
        );
    }

    #[test]
    fn confirm_must_be_explicit_true() {
        let mut request = ToolRequest::default();
        assert!(!request.confirmed());
        request.confirm = Some(false);
        assert!(!request.confirmed());
        request.confirm = Some(true);
        assert!(request.confirmed());
    }

    #[test]
    fn status_parses_lowercase() {
        let request =
            ToolRequest::from_value(json!({"action": "list", "status": "draft"})).unwrap();
        assert_eq!(request.status, Some(PublishStatus::Draft));
    }
}
