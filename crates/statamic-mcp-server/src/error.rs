// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use statamic_mcp_audit::AuditError;
use statamic_mcp_memory::FixtureError;
use thiserror::Error;

/// Errors raised while assembling or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error("failed to open audit log: {0}")]
    Audit(#[from] AuditError),

    #[error("web.disabled_tools names unknown tool '{name}'{}", suggestion_suffix(.suggestion))]
    UnknownTool {
        name: String,
        suggestion: Option<String>,
    },

    #[error("MCP transport error: {0}")]
    Transport(String),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean '{s}'?)"))
        .unwrap_or_default()
}
