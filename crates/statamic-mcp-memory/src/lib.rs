// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory backend for statamic-mcp.
//!
//! Backs every repository trait with process memory so the tool server can
//! run, and be tested, without a host CMS.
//!
//! # Components
//!
//! - [`MemoryStore`] - all repositories behind one `RwLock`
//! - [`MemoryCache`] - cache collaborator that records every clear
//! - [`RolePermissionChecker`] - super-user and role based permission checks
//! - [`Fixture`] - JSON seed data with reference validation

pub mod cache;
pub mod fixture;
pub mod permissions;
pub mod store;

use std::sync::Arc;

use statamic_mcp_core::Services;
use statamic_mcp_core::traits::{CacheInvalidator, PermissionChecker};

pub use cache::{DEFAULT_SEGMENTS, MemoryCache};
pub use fixture::{Fixture, FixtureError, FixtureUser};
pub use permissions::RolePermissionChecker;
pub use store::MemoryStore;

/// Wires one store into every repository slot of [`Services`], with
/// role-based permission checks over the same store.
pub fn services(store: Arc<MemoryStore>, cache: Arc<dyn CacheInvalidator>) -> Services {
    let permissions = Arc::new(RolePermissionChecker::new(store.clone(), store.clone()));
    services_with(store, cache, permissions)
}

/// Like [`services`], with a caller-supplied permission checker.
pub fn services_with(
    store: Arc<MemoryStore>,
    cache: Arc<dyn CacheInvalidator>,
    permissions: Arc<dyn PermissionChecker>,
) -> Services {
    Services {
        collections: store.clone(),
        entries: store.clone(),
        taxonomies: store.clone(),
        terms: store.clone(),
        globals: store.clone(),
        containers: store.clone(),
        assets: store.clone(),
        blueprints: store.clone(),
        users: store.clone(),
        roles: store.clone(),
        navigations: store.clone(),
        sites: store,
        cache,
        permissions,
    }
}
