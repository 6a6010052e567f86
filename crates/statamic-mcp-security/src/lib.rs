// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Redaction of sensitive values before they reach audit logs.

pub mod redact;

pub use redact::{DEFAULT_SENSITIVE_KEYS, REDACTED, Sanitizer, redact_text};
