// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Repository traits standing in for the host CMS's data facades.
//!
//! Lookups return `Ok(None)` for a missing record; only store failures and
//! constraint violations are errors.

use crate::error::RepositoryError;
use crate::types::{Asset, Blueprint, Entry, Page, Query, Record, Term, User};

/// Repository for records addressed by a single handle
/// (collections, taxonomies, global sets, containers, roles, navigations, sites).
pub trait HandleRepository<T: Record>: Send + Sync {
    /// All records, ordered by handle.
    fn all(&self) -> Result<Vec<T>, RepositoryError>;

    fn find(&self, handle: &str) -> Result<Option<T>, RepositoryError>;

    /// Inserts or replaces the record and returns the stored value.
    fn save(&self, record: T) -> Result<T, RepositoryError>;

    fn delete(&self, handle: &str) -> Result<(), RepositoryError>;
}

/// Entry storage.
pub trait EntryRepository: Send + Sync {
    /// Entries in `collection` (all collections when `None`) matching the query.
    fn query(&self, collection: Option<&str>, query: &Query) -> Result<Page<Entry>, RepositoryError>;

    fn find(&self, id: &str) -> Result<Option<Entry>, RepositoryError>;

    fn find_by_slug(
        &self,
        collection: &str,
        slug: &str,
        site: &str,
    ) -> Result<Option<Entry>, RepositoryError>;

    fn save(&self, entry: Entry) -> Result<Entry, RepositoryError>;

    fn delete(&self, id: &str) -> Result<(), RepositoryError>;

    /// Number of entries in a collection, across sites.
    fn count(&self, collection: &str) -> Result<usize, RepositoryError>;
}

/// Term storage, keyed by `(taxonomy, slug)`.
pub trait TermRepository: Send + Sync {
    fn query(&self, taxonomy: &str, query: &Query) -> Result<Page<Term>, RepositoryError>;

    fn find(&self, taxonomy: &str, slug: &str) -> Result<Option<Term>, RepositoryError>;

    fn save(&self, term: Term) -> Result<Term, RepositoryError>;

    fn delete(&self, taxonomy: &str, slug: &str) -> Result<(), RepositoryError>;

    fn count(&self, taxonomy: &str) -> Result<usize, RepositoryError>;
}

/// Asset metadata storage, keyed by `(container, path)`.
pub trait AssetRepository: Send + Sync {
    fn query(&self, container: &str, query: &Query) -> Result<Page<Asset>, RepositoryError>;

    fn find(&self, container: &str, path: &str) -> Result<Option<Asset>, RepositoryError>;

    fn save(&self, asset: Asset) -> Result<Asset, RepositoryError>;

    fn delete(&self, container: &str, path: &str) -> Result<(), RepositoryError>;

    fn count(&self, container: &str) -> Result<usize, RepositoryError>;
}

/// Blueprint storage, keyed by `(namespace, handle)`.
pub trait BlueprintRepository: Send + Sync {
    /// Blueprints in one namespace, or every namespace when `None`.
    fn all(&self, namespace: Option<&str>) -> Result<Vec<Blueprint>, RepositoryError>;

    fn find(&self, namespace: &str, handle: &str) -> Result<Option<Blueprint>, RepositoryError>;

    fn save(&self, blueprint: Blueprint) -> Result<Blueprint, RepositoryError>;

    fn delete(&self, namespace: &str, handle: &str) -> Result<(), RepositoryError>;
}

/// User storage.
pub trait UserRepository: Send + Sync {
    fn query(&self, query: &Query) -> Result<Page<User>, RepositoryError>;

    fn find(&self, id: &str) -> Result<Option<User>, RepositoryError>;

    fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    fn save(&self, user: User) -> Result<User, RepositoryError>;

    /// Stores a new password for the user. The plain value is never returned.
    fn set_password(&self, id: &str, password: &str) -> Result<(), RepositoryError>;

    fn delete(&self, id: &str) -> Result<(), RepositoryError>;

    /// Number of users holding the role.
    fn count_with_role(&self, role: &str) -> Result<usize, RepositoryError>;
}
