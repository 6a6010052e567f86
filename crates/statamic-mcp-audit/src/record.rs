// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Audit record payloads.
//!
//! A record is written once when a handler starts and once when it finishes.
//! The finished record is derived from the started one by value; an emitted
//! record is never modified afterwards.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use statamic_mcp_core::{ContextKind, ToolError};
use statamic_mcp_security::redact_text;
use strum::Display;
use uuid::Uuid;

/// Lifecycle position of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Started,
    Success,
    Failure,
}

/// What is being invoked, by whom, with which (already sanitized) arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub id: Uuid,
    pub tool: String,
    pub action: String,
    /// Domain and sub-target, e.g. `entries:articles` or `assets:container`.
    pub target: String,
    pub actor: Option<String>,
    pub context: ContextKind,
    pub arguments: Value,
}

/// One audit log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub invocation_id: Uuid,
    pub tool: String,
    pub action: String,
    pub target: String,
    pub actor: Option<String>,
    pub context: ContextKind,
    pub arguments: Value,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

impl AuditRecord {
    /// The record written at handler entry.
    pub fn started(invocation: &Invocation) -> Self {
        Self {
            invocation_id: invocation.id,
            tool: invocation.tool.clone(),
            action: invocation.action.clone(),
            target: invocation.target.clone(),
            actor: invocation.actor.clone(),
            context: invocation.context,
            arguments: invocation.arguments.clone(),
            timestamp: Utc::now(),
            duration_ms: None,
            outcome: Outcome::Started,
            error: None,
            error_kind: None,
        }
    }

    /// The record written at handler exit.
    ///
    /// Error text is passed through free-text redaction; the caller still
    /// receives the original message.
    pub fn finished(&self, elapsed: Duration, error: Option<&ToolError>) -> Self {
        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        Self {
            timestamp: Utc::now(),
            duration_ms: Some(duration_ms),
            outcome: if error.is_some() {
                Outcome::Failure
            } else {
                Outcome::Success
            },
            error: error.map(|e| redact_text(&e.to_string())),
            error_kind: error.map(|e| e.kind().to_string()),
            ..self.clone()
        }
    }
}
