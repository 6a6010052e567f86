// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Non-storage collaborators: cache invalidation and permission checks.

use crate::context::Actor;
use crate::error::RepositoryError;
use crate::types::CacheSegmentStatus;

/// Process-wide cache namespace of the host CMS.
///
/// Clearing is idempotent: clearing an already-clear segment is a no-op.
pub trait CacheInvalidator: Send + Sync {
    /// Clears the named segments.
    fn clear(&self, segments: &[String]) -> Result<(), RepositoryError>;

    /// Reports the state of every known segment.
    fn status(&self) -> Result<Vec<CacheSegmentStatus>, RepositoryError>;
}

/// Permission predicate of the host CMS, queried once per required permission.
pub trait PermissionChecker: Send + Sync {
    fn has_permission(&self, actor: &Actor, permission: &str) -> bool;
}
