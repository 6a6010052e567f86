// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The uniform response envelope returned by every tool call.
//!
//! On the wire an envelope is always an object with a `success` boolean and
//! exactly one of `data` (success) or `errors` (failure).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolError;

/// Result of a tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireEnvelope", try_from = "WireEnvelope")]
pub enum Envelope {
    Success { data: Value },
    Failure { errors: Vec<String> },
}

impl Envelope {
    /// Wraps handler output in a success envelope.
    pub fn success(data: Value) -> Self {
        Self::Success { data }
    }

    /// Builds a failure envelope carrying a single message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            errors: vec![message.into()],
        }
    }

    /// Builds a failure envelope from a [`ToolError`].
    pub fn from_error(err: &ToolError) -> Self {
        Self::failure(err.to_string())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The success payload, if any.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// The failure messages; empty for a success.
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Success { .. } => &[],
            Self::Failure { errors } => errors,
        }
    }

    /// Serializes to a JSON value.
    pub fn to_value(&self) -> Value {
        Value::from(WireEnvelope::from(self.clone()))
    }
}

impl From<Result<Value, ToolError>> for Envelope {
    fn from(result: Result<Value, ToolError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::from_error(&err),
        }
    }
}

/// Serialized form. Kept private so the enum stays the only way to build one.
#[derive(Serialize, Deserialize)]
struct WireEnvelope {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
}

impl From<Envelope> for WireEnvelope {
    fn from(envelope: Envelope) -> Self {
        match envelope {
            Envelope::Success { data } => Self {
                success: true,
                data: Some(data),
                errors: None,
            },
            Envelope::Failure { errors } => Self {
                success: false,
                data: None,
                errors: Some(errors),
            },
        }
    }
}

impl From<WireEnvelope> for Value {
    fn from(wire: WireEnvelope) -> Self {
        let mut object = serde_json::Map::new();
        object.insert("success".into(), Value::Bool(wire.success));
        if let Some(data) = wire.data {
            object.insert("data".into(), data);
        }
        if let Some(errors) = wire.errors {
            object.insert(
                "errors".into(),
                Value::Array(errors.into_iter().map(Value::String).collect()),
            );
        }
        Value::Object(object)
    }
}

impl TryFrom<WireEnvelope> for Envelope {
    type Error = String;

    fn try_from(wire: WireEnvelope) -> Result<Self, Self::Error> {
        match (wire.success, wire.data, wire.errors) {
            (true, Some(data), None) => Ok(Envelope::Success { data }),
            (false, None, Some(errors)) => Ok(Envelope::Failure { errors }),
            (success, _, _) => Err(format!(
                "envelope with success={success} must carry exactly one of data or errors"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_serializes_with_data_only() {
        let envelope = Envelope::success(json!({"id": "abc"}));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"success": true, "data": {"id": "abc"}}));
        assert_eq!(envelope.to_value(), value);
    }

    #[test]
    fn failure_serializes_with_errors_only() {
        let envelope = Envelope::failure("Missing required field: id");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({"success": false, "errors": ["Missing required field: id"]})
        );
        assert!(envelope.data().is_none());
    }

    #[test]
    fn inconsistent_wire_shape_is_rejected() {
        let bad = json!({"success": true, "errors": ["nope"]});
        assert!(serde_json::from_value::<Envelope>(bad).is_err());

        let both = json!({"success": false, "data": {}, "errors": ["x"]});
        assert!(serde_json::from_value::<Envelope>(both).is_err());
    }

    #[test]
    fn from_result_maps_both_arms() {
        let ok: Envelope = Ok::<_, ToolError>(json!({"n": 1})).into();
        assert!(ok.is_success());
        assert!(ok.errors().is_empty());

        let err: Envelope = Err::<Value, _>(ToolError::Unauthenticated).into();
        assert_eq!(err.errors(), ["Authentication required".to_string()]);
    }
}
