// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for the wire shape of the response envelope.

use proptest::prelude::*;
use serde_json::{Value, json};
use statamic_mcp_core::{Envelope, ToolError};

proptest! {
    /// `success` always agrees with which of `data` / `errors` is present.
    #[test]
    fn success_flag_matches_variant(message in ".{0,40}", n in any::<i64>(), ok in any::<bool>()) {
        let result: Result<Value, ToolError> = if ok {
            Ok(json!({"n": n}))
        } else {
            Err(ToolError::Unexpected(message.clone()))
        };
        let value = Envelope::from(result).to_value();
        let object = value.as_object().unwrap();

        prop_assert_eq!(object["success"].as_bool(), Some(ok));
        prop_assert_eq!(object.contains_key("data"), ok);
        prop_assert_eq!(object.contains_key("errors"), !ok);
        if !ok {
            prop_assert_eq!(&object["errors"], &json!([message]));
        }
    }

    /// Serialized envelopes parse back into the same envelope.
    #[test]
    fn wire_form_parses_back(messages in proptest::collection::vec(".{1,20}", 1..4)) {
        let envelope = Envelope::Failure { errors: messages };
        let text = serde_json::to_string(&envelope).unwrap();
        let parsed: Envelope = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(parsed, envelope);
    }
}
