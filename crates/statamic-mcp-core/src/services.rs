// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The bundle of collaborators handed to every tool handler.

use std::sync::Arc;

use crate::error::ToolError;
use crate::traits::{
    AssetRepository, BlueprintRepository, CacheInvalidator, EntryRepository, HandleRepository,
    PermissionChecker, TermRepository, UserRepository,
};
use crate::types::{
    AssetContainer, Collection, GlobalSet, Navigation, Record, Role, Site, Taxonomy,
};

/// Constructor-injected collaborators. Cheap to clone.
#[derive(Clone)]
pub struct Services {
    pub collections: Arc<dyn HandleRepository<Collection>>,
    pub entries: Arc<dyn EntryRepository>,
    pub taxonomies: Arc<dyn HandleRepository<Taxonomy>>,
    pub terms: Arc<dyn TermRepository>,
    pub globals: Arc<dyn HandleRepository<GlobalSet>>,
    pub containers: Arc<dyn HandleRepository<AssetContainer>>,
    pub assets: Arc<dyn AssetRepository>,
    pub blueprints: Arc<dyn BlueprintRepository>,
    pub users: Arc<dyn UserRepository>,
    pub roles: Arc<dyn HandleRepository<Role>>,
    pub navigations: Arc<dyn HandleRepository<Navigation>>,
    pub sites: Arc<dyn HandleRepository<Site>>,
    pub cache: Arc<dyn CacheInvalidator>,
    pub permissions: Arc<dyn PermissionChecker>,
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

/// Looks a handle up and turns a miss into a [`ToolError::NotFound`].
pub fn find_or_not_found<T: Record>(
    repository: &dyn HandleRepository<T>,
    handle: &str,
) -> Result<T, ToolError> {
    repository
        .find(handle)?
        .ok_or_else(|| ToolError::not_found(T::KIND, handle))
}

impl Services {
    /// The default site handle: the first configured site, or `default`.
    pub fn default_site(&self) -> Result<String, ToolError> {
        Ok(self
            .sites
            .all()?
            .into_iter()
            .next()
            .map(|site| site.handle)
            .unwrap_or_else(|| "default".to_string()))
    }

    pub fn collection(&self, handle: &str) -> Result<Collection, ToolError> {
        find_or_not_found(self.collections.as_ref(), handle)
    }

    pub fn taxonomy(&self, handle: &str) -> Result<Taxonomy, ToolError> {
        find_or_not_found(self.taxonomies.as_ref(), handle)
    }

    pub fn container(&self, handle: &str) -> Result<AssetContainer, ToolError> {
        find_or_not_found(self.containers.as_ref(), handle)
    }
}
