// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits injected into the tool handlers.
//!
//! Everything the handlers touch in the host CMS goes through one of these
//! traits, so tests and the bundled binary can substitute their own backends.

pub mod collaborators;
pub mod repository;

pub use collaborators::{CacheInvalidator, PermissionChecker};
pub use repository::{
    AssetRepository, BlueprintRepository, EntryRepository, HandleRepository, TermRepository,
    UserRepository,
};
