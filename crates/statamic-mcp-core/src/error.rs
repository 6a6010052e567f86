// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by the router, the audit wrapper, and the tool handlers.
//!
//! [`ToolError`] is the taxonomy surfaced to callers (always flattened into a
//! failure envelope); [`RepositoryError`] is what the data-layer traits return.

use thiserror::Error;

use crate::types::ResourceKind;

/// The error type produced anywhere between the router boundary and a handler.
///
/// Every variant renders to the flat, human-readable message that ends up in
/// the `errors` array of a failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// A required field is missing or malformed for the requested action.
    #[error("{0}")]
    Validation(String),

    /// A referenced entity does not exist.
    #[error("{kind} not found: {key}")]
    NotFound { kind: ResourceKind, key: String },

    /// The caller is authenticated but lacks a permission, or the tool is
    /// unavailable in the current context.
    #[error("{0}")]
    PermissionDenied(String),

    /// Hosted invocation without an authenticated actor.
    #[error("Authentication required")]
    Unauthenticated,

    /// Create on an existing key, or delete of an entity with dependents.
    #[error("{0}")]
    Conflict(String),

    /// Anything else raised by a collaborator.
    #[error("{0}")]
    Unexpected(String),
}

impl ToolError {
    /// Builds a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Builds the canonical "missing required field" validation error.
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("Missing required field: {field}"))
    }

    /// Builds a not-found error for the given resource kind and key.
    pub fn not_found(kind: ResourceKind, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
        }
    }

    /// Builds a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Stable label for logs and audit records. Never sent to callers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound { .. } => "not_found",
            Self::PermissionDenied(_) => "permission_denied",
            Self::Unauthenticated => "unauthenticated",
            Self::Conflict(_) => "conflict",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

/// Errors returned by repository and collaborator traits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The write would violate a uniqueness or dependency constraint.
    #[error("{0}")]
    Conflict(String),

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for ToolError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(message) => ToolError::Conflict(message),
            other => ToolError::Unexpected(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::Unexpected(format!("serialization failed: {err}"))
    }
}
