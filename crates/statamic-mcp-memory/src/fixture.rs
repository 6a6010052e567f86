// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON fixtures that seed a [`MemoryStore`].
//!
//! A fixture is one JSON object with an optional array per record type.
//! References are checked on load: every entry needs its collection, every
//! term its taxonomy, every asset its container, and every user role must
//! exist. Duplicate keys are rejected.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use statamic_mcp_core::types::{
    Asset, AssetContainer, Blueprint, Collection, Entry, GlobalSet, Navigation, Role, Site,
    Taxonomy, Term, User,
};
use thiserror::Error;
use tracing::info;

use crate::store::{MemoryStore, State, hash_password};

/// Errors raised while reading or applying a fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixture JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid fixture: {0}")]
    Invalid(String),
}

/// A user plus an optional plain-text password, hashed on load.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureUser {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub password: Option<String>,
}

/// Seed data for a [`MemoryStore`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Fixture {
    pub sites: Vec<Site>,
    pub collections: Vec<Collection>,
    pub entries: Vec<Entry>,
    pub taxonomies: Vec<Taxonomy>,
    pub terms: Vec<Term>,
    pub globals: Vec<GlobalSet>,
    pub asset_containers: Vec<AssetContainer>,
    pub assets: Vec<Asset>,
    pub blueprints: Vec<Blueprint>,
    pub roles: Vec<Role>,
    pub users: Vec<FixtureUser>,
    pub navigations: Vec<Navigation>,
}

impl Fixture {
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, FixtureError> {
        let json = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The single-site install used when no fixture is configured.
    pub fn minimal() -> Self {
        Self {
            sites: vec![Site {
                handle: "default".into(),
                name: "Default".into(),
                url: "/".into(),
                locale: "en_US".into(),
            }],
            ..Self::default()
        }
    }

    /// Validates references and builds the store.
    pub fn into_store(self) -> Result<MemoryStore, FixtureError> {
        let mut state = State {
            sites: keyed("site", self.sites, |s| s.handle.clone())?,
            collections: keyed("collection", self.collections, |c| c.handle.clone())?,
            taxonomies: keyed("taxonomy", self.taxonomies, |t| t.handle.clone())?,
            globals: keyed("global set", self.globals, |g| g.handle.clone())?,
            containers: keyed("asset container", self.asset_containers, |c| {
                c.handle.clone()
            })?,
            roles: keyed("role", self.roles, |r| r.handle.clone())?,
            navigations: keyed("navigation", self.navigations, |n| n.handle.clone())?,
            entries: keyed("entry", self.entries, |e| e.id.clone())?,
            terms: keyed("term", self.terms, |t| (t.taxonomy.clone(), t.slug.clone()))?,
            assets: keyed("asset", self.assets, |a| (a.container.clone(), a.path.clone()))?,
            blueprints: keyed("blueprint", self.blueprints, |b| {
                (b.namespace.clone(), b.handle.clone())
            })?,
            ..State::default()
        };

        for entry in state.entries.values() {
            require(&state.collections, &entry.collection, "entry", &entry.id, "collection")?;
        }
        for (taxonomy, slug) in state.terms.keys() {
            require(&state.taxonomies, taxonomy, "term", slug, "taxonomy")?;
        }
        for (container, path) in state.assets.keys() {
            require(&state.containers, container, "asset", path, "asset container")?;
        }

        for FixtureUser { user, password } in self.users {
            for role in &user.roles {
                require(&state.roles, role, "user", &user.id, "role")?;
            }
            if let Some(password) = password {
                let hash = hash_password(&password)
                    .map_err(|e| FixtureError::Invalid(format!("user {:?}: {e}", user.id)))?;
                state.password_hashes.insert(user.id.clone(), hash);
            }
            let id = user.id.clone();
            if state.users.insert(id.clone(), user).is_some() {
                return Err(FixtureError::Invalid(format!("duplicate user {id:?}")));
            }
        }

        info!(
            sites = state.sites.len(),
            collections = state.collections.len(),
            entries = state.entries.len(),
            users = state.users.len(),
            "memory store seeded"
        );
        Ok(MemoryStore::from_state(state))
    }
}

fn keyed<K: Ord + std::fmt::Debug, T>(
    kind: &str,
    records: Vec<T>,
    key: impl Fn(&T) -> K,
) -> Result<BTreeMap<K, T>, FixtureError> {
    let mut map = BTreeMap::new();
    for record in records {
        let k = key(&record);
        if map.contains_key(&k) {
            return Err(FixtureError::Invalid(format!("duplicate {kind} {k:?}")));
        }
        map.insert(k, record);
    }
    Ok(map)
}

fn require<T>(
    table: &BTreeMap<String, T>,
    handle: &str,
    owner_kind: &str,
    owner: &str,
    kind: &str,
) -> Result<(), FixtureError> {
    if table.contains_key(handle) {
        Ok(())
    } else {
        Err(FixtureError::Invalid(format!(
            "{owner_kind} '{owner}' references unknown {kind} '{handle}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use statamic_mcp_core::traits::{EntryRepository, HandleRepository, UserRepository};

    use super::*;

    const FIXTURE: &str = r#"{
        "sites": [{"handle": "default", "name": "Default", "url": "/", "locale": "en_US"}],
        "collections": [{"handle": "articles", "title": "Articles"}],
        "entries": [{"id": "e1", "collection": "articles", "slug": "hello", "site": "default",
                     "published": true, "data": {"title": "Hello"}}],
        "roles": [{"handle": "editor", "title": "Editor", "permissions": ["view articles entries"]}],
        "users": [{"id": "u1", "email": "ed@x.test", "roles": ["editor"], "password": "pw"}]
    }"#;

    #[test]
    fn loads_records_and_hashes_passwords() {
        let store = Fixture::from_json(FIXTURE).unwrap().into_store().unwrap();
        assert!(HandleRepository::<Collection>::find(&store, "articles").unwrap().is_some());
        assert_eq!(EntryRepository::count(&store, "articles").unwrap(), 1);
        let user = UserRepository::find(&store, "u1").unwrap().unwrap();
        assert_eq!(user.roles, vec!["editor"]);
        assert!(store.verify_password("u1", "pw"));
    }

    #[test]
    fn rejects_dangling_entry_collection() {
        let json = r#"{"entries": [{"id": "e1", "collection": "nope", "slug": "x", "site": "default"}]}"#;
        let err = Fixture::from_json(json).unwrap().into_store().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid fixture: entry 'e1' references unknown collection 'nope'"
        );
    }

    #[test]
    fn rejects_duplicate_handles() {
        let json = r#"{"roles": [{"handle": "a", "title": "A"}, {"handle": "a", "title": "B"}]}"#;
        let err = Fixture::from_json(json).unwrap().into_store().unwrap_err();
        assert!(err.to_string().contains("duplicate role"));
    }

    #[test]
    fn rejects_unknown_sections() {
        let err = Fixture::from_json(r#"{"pages": []}"#).unwrap_err();
        assert!(matches!(err, FixtureError::Parse(_)));
    }

    #[test]
    fn minimal_fixture_has_default_site() {
        let store = Fixture::minimal().into_store().unwrap();
        let sites: Vec<Site> = HandleRepository::all(&store).unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].handle, "default");
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        let fixture = Fixture::from_path(file.path()).unwrap();
        assert_eq!(fixture.entries.len(), 1);

        let missing = Fixture::from_path(Path::new("/nonexistent/fixture.json")).unwrap_err();
        assert!(matches!(missing, FixtureError::Io { .. }));
    }
}
