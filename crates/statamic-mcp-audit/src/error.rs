// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// Failure while writing an audit record.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit sink I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("audit record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("audit sink lock poisoned")]
    Poisoned,
}
