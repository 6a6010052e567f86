// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record types exchanged with the repository traits.
//!
//! Content payloads (`data`, `values`, `meta`, blueprint `contents`) are kept
//! as opaque JSON: their schema belongs to the host CMS, not to this crate.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

/// A JSON object, as used for content payloads.
pub type JsonObject = Map<String, Value>;

/// The resource kinds a tool can operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Entry,
    Collection,
    Taxonomy,
    Term,
    #[strum(serialize = "Global set")]
    GlobalSet,
    #[strum(serialize = "Asset container")]
    AssetContainer,
    Asset,
    Blueprint,
    User,
    Role,
    Navigation,
    Site,
}

/// The domain a tool belongs to. Used for permission resolution and audit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Entries,
    Terms,
    Globals,
    Blueprints,
    Assets,
    Users,
    Structures,
    System,
}

/// Publication filter for entry listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    Published,
    Draft,
}

/// Filter and pagination parameters for listing queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Field equality filters applied to the record's data.
    pub filters: JsonObject,
    /// Restrict to a single site.
    pub site: Option<String>,
    /// Restrict by publication state (entries only).
    pub status: Option<PublishStatus>,
    pub limit: usize,
    pub offset: usize,
}

/// One page of a listing query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of matching records before pagination.
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

impl<T> Page<T> {
    /// Slices an already-filtered result set into a page.
    pub fn from_matches(matches: Vec<T>, limit: usize, offset: usize) -> Self {
        let total = matches.len();
        let items = matches.into_iter().skip(offset).take(limit).collect();
        Self {
            items,
            total,
            limit,
            offset,
        }
    }

    /// Returns true when more records exist after this page.
    pub fn has_more(&self) -> bool {
        self.offset + self.items.len() < self.total
    }
}

/// A content collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub sites: Vec<String>,
    #[serde(default)]
    pub taxonomies: Vec<String>,
    #[serde(default)]
    pub dated: bool,
}

/// A content entry belonging to a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub collection: String,
    pub slug: String,
    pub site: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub data: JsonObject,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// A taxonomy (term vocabulary).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub sites: Vec<String>,
}

/// A term inside a taxonomy, keyed by slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub taxonomy: String,
    pub slug: String,
    pub site: String,
    #[serde(default)]
    pub data: JsonObject,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// A global variable set with per-site values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSet {
    pub handle: String,
    pub title: String,
    /// Site handle to values.
    #[serde(default)]
    pub values: BTreeMap<String, JsonObject>,
}

/// A named asset storage location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetContainer {
    pub handle: String,
    pub title: String,
    pub disk: String,
    #[serde(default = "default_true")]
    pub allow_uploads: bool,
}

/// Metadata for a stored file inside a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub container: String,
    /// Folder-relative path, e.g. `images/hero.jpg`.
    pub path: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub meta: JsonObject,
    #[serde(default = "Utc::now")]
    pub last_modified: DateTime<Utc>,
}

impl Asset {
    /// Folder part of the path, empty at the container root.
    pub fn folder(&self) -> &str {
        self.path.rsplit_once('/').map(|(folder, _)| folder).unwrap_or("")
    }

    /// File name part of the path.
    pub fn basename(&self) -> &str {
        self.path
            .rsplit_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.path)
    }
}

/// A field schema owned by a namespace (`collections.articles`, `globals`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub namespace: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub hidden: bool,
    /// Tabs, sections, and fields as defined by the host CMS.
    #[serde(default)]
    pub contents: Value,
}

/// A control-panel user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "super")]
    pub super_user: bool,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub data: JsonObject,
}

/// A named bundle of permissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// A navigation structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Navigation {
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub max_depth: Option<u32>,
    #[serde(default)]
    pub collections: Vec<String>,
    #[serde(default)]
    pub tree: Vec<Value>,
}

/// A site in a multi-site install.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub handle: String,
    pub name: String,
    pub url: String,
    pub locale: String,
}

/// State of one cache segment as reported by the cache collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSegmentStatus {
    pub name: String,
    /// Approximate number of cached items.
    pub items: u64,
    pub last_cleared: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// Records addressed by a single handle through [`crate::traits::HandleRepository`].
pub trait Record: Clone + Send + Sync + 'static {
    /// The kind used in not-found messages.
    const KIND: ResourceKind;

    /// The record's handle.
    fn handle(&self) -> &str;
}

macro_rules! handle_record {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Record for $ty {
                const KIND: ResourceKind = ResourceKind::$kind;

                fn handle(&self) -> &str {
                    &self.handle
                }
            }
        )*
    };
}

handle_record!(
    Collection => Collection,
    Taxonomy => Taxonomy,
    GlobalSet => GlobalSet,
    AssetContainer => AssetContainer,
    Role => Role,
    Navigation => Navigation,
    Site => Site,
);

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn page_slices_and_reports_more() {
        let page = Page::from_matches((0..10).collect::<Vec<_>>(), 3, 6);
        assert_eq!(page.items, vec![6, 7, 8]);
        assert_eq!(page.total, 10);
        assert!(page.has_more());

        let last = Page::from_matches((0..10).collect::<Vec<_>>(), 5, 8);
        assert_eq!(last.items, vec![8, 9]);
        assert!(!last.has_more());
    }

    #[test]
    fn domain_display_round_trips() {
        for domain in [Domain::Entries, Domain::Structures, Domain::System] {
            let s = domain.to_string();
            assert_eq!(Domain::from_str(&s).unwrap(), domain);
        }
        assert_eq!(Domain::Globals.to_string(), "globals");
    }

    #[test]
    fn asset_path_parts() {
        let asset = Asset {
            container: "main".into(),
            path: "images/2024/hero.jpg".into(),
            size: 10,
            mime_type: None,
            meta: JsonObject::new(),
            last_modified: Utc::now(),
        };
        assert_eq!(asset.folder(), "images/2024");
        assert_eq!(asset.basename(), "hero.jpg");

        let root = Asset {
            path: "logo.svg".into(),
            ..asset
        };
        assert_eq!(root.folder(), "");
        assert_eq!(root.basename(), "logo.svg");
    }

    #[test]
    fn user_super_flag_uses_host_field_name() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u1",
            "email": "a@example.com",
            "super": true
        }))
        .unwrap();
        assert!(user.super_user);
        assert!(user.roles.is_empty());
    }
}
