// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for statamic-mcp.
//!
//! Provides the response envelope, the typed tool request, the error taxonomy,
//! CMS record types, and the repository traits every backend implements. All
//! other crates in the workspace build on these definitions.

pub mod context;
pub mod envelope;
pub mod error;
pub mod request;
pub mod services;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use context::{Actor, ContextKind, ExecutionContext};
pub use envelope::Envelope;
pub use error::{RepositoryError, ToolError};
pub use request::{RequestField, ToolRequest};
pub use services::Services;
pub use types::{Domain, JsonObject, ResourceKind};

pub use traits::{
    AssetRepository, BlueprintRepository, CacheInvalidator, EntryRepository, HandleRepository,
    PermissionChecker, TermRepository, UserRepository,
};
