// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Execution context: who is calling, and through which path.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// An authenticated principal in hosted context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// User identifier as known to the permission collaborator.
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Actor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Label for the invocation path, as recorded in audit logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    Cli,
    Web,
}

/// The path a request arrived through.
///
/// `Cli` is direct invocation (stdio server, command line) and skips all
/// permission checks. `Web` is hosted invocation and is always checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionContext {
    Cli,
    Web { actor: Option<Actor> },
}

impl ExecutionContext {
    pub fn cli() -> Self {
        Self::Cli
    }

    pub fn web(actor: Actor) -> Self {
        Self::Web { actor: Some(actor) }
    }

    /// Hosted context without an authenticated actor.
    pub fn anonymous_web() -> Self {
        Self::Web { actor: None }
    }

    pub fn kind(&self) -> ContextKind {
        match self {
            Self::Cli => ContextKind::Cli,
            Self::Web { .. } => ContextKind::Web,
        }
    }

    pub fn is_hosted(&self) -> bool {
        matches!(self, Self::Web { .. })
    }

    pub fn actor(&self) -> Option<&Actor> {
        match self {
            Self::Cli => None,
            Self::Web { actor } => actor.as_ref(),
        }
    }
}
