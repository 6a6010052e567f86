// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `MemoryStore`: every repository trait over one `RwLock`-guarded state.
//!
//! Handle-keyed records and users are kept in `BTreeMap`s so listings come
//! back ordered by key. Writes are last-write-wins; uniqueness constraints
//! (entry slug per collection and site, user email) are enforced on save.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use serde::Serialize;
use serde_json::Value;
use statamic_mcp_core::traits::{
    AssetRepository, BlueprintRepository, EntryRepository, HandleRepository, TermRepository,
    UserRepository,
};
use statamic_mcp_core::types::{
    Asset, AssetContainer, Blueprint, Collection, Entry, GlobalSet, JsonObject, Navigation, Page,
    PublishStatus, Query, Role, Site, Taxonomy, Term, User,
};
use statamic_mcp_core::RepositoryError;
use tracing::warn;

#[derive(Debug, Default)]
pub(crate) struct State {
    pub(crate) collections: BTreeMap<String, Collection>,
    pub(crate) taxonomies: BTreeMap<String, Taxonomy>,
    pub(crate) globals: BTreeMap<String, GlobalSet>,
    pub(crate) containers: BTreeMap<String, AssetContainer>,
    pub(crate) roles: BTreeMap<String, Role>,
    pub(crate) navigations: BTreeMap<String, Navigation>,
    pub(crate) sites: BTreeMap<String, Site>,
    /// Keyed by entry id.
    pub(crate) entries: BTreeMap<String, Entry>,
    /// Keyed by `(taxonomy, slug)`.
    pub(crate) terms: BTreeMap<(String, String), Term>,
    /// Keyed by `(container, path)`.
    pub(crate) assets: BTreeMap<(String, String), Asset>,
    /// Keyed by `(namespace, handle)`.
    pub(crate) blueprints: BTreeMap<(String, String), Blueprint>,
    /// Keyed by user id.
    pub(crate) users: BTreeMap<String, User>,
    pub(crate) password_hashes: HashMap<String, String>,
}

/// In-memory implementation of every repository trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_state(state: State) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Returns true if `password` is the user's current password.
    pub fn verify_password(&self, id: &str, password: &str) -> bool {
        let stored = match self.read() {
            Ok(state) => state.password_hashes.get(id).cloned(),
            Err(_) => None,
        };
        stored.is_some_and(|phc| verify_password_hash(&phc, password))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, RepositoryError> {
        self.state.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, RepositoryError> {
        self.state.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Storage("memory store lock poisoned".to_string())
}

/// Argon2id with a random salt, encoded as a PHC string.
pub(crate) fn hash_password(password: &str) -> Result<String, RepositoryError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| RepositoryError::Storage(format!("password hashing failed: {e}")))
}

fn verify_password_hash(phc: &str, password: &str) -> bool {
    match PasswordHash::new(phc) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!(error = %e, "stored password hash is malformed");
            false
        }
    }
}

/// Keeps the records whose fields match every filter.
///
/// A filter key is looked up on the record itself, then inside its `data`
/// and `meta` objects. Array fields match when they contain the value.
/// `extra` can add computed fields (such as an asset's folder) first.
fn retain_matching<T: Serialize>(
    records: Vec<T>,
    filters: &JsonObject,
    extra: fn(&T, &mut JsonObject),
) -> Result<Vec<T>, RepositoryError> {
    if filters.is_empty() {
        return Ok(records);
    }
    let mut kept = Vec::with_capacity(records.len());
    for record in records {
        let mut fields = match serde_json::to_value(&record) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => JsonObject::new(),
            Err(e) => return Err(RepositoryError::Storage(e.to_string())),
        };
        extra(&record, &mut fields);
        if filters.iter().all(|(key, expected)| field_matches(&fields, key, expected)) {
            kept.push(record);
        }
    }
    Ok(kept)
}

fn field_matches(fields: &JsonObject, key: &str, expected: &Value) -> bool {
    let nested = |object: &str| fields.get(object).and_then(|o| o.get(key));
    let actual = fields
        .get(key)
        .or_else(|| nested("data"))
        .or_else(|| nested("meta"));
    match actual {
        Some(Value::Array(items)) if !expected.is_array() => items.contains(expected),
        Some(actual) => actual == expected,
        None => expected.is_null(),
    }
}

fn no_extra<T>(_: &T, _: &mut JsonObject) {}

fn asset_extra(asset: &Asset, fields: &mut JsonObject) {
    fields.insert("folder".into(), Value::String(asset.folder().to_string()));
    fields.insert("basename".into(), Value::String(asset.basename().to_string()));
}

macro_rules! handle_repository {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl HandleRepository<$ty> for MemoryStore {
                fn all(&self) -> Result<Vec<$ty>, RepositoryError> {
                    Ok(self.read()?.$field.values().cloned().collect())
                }

                fn find(&self, handle: &str) -> Result<Option<$ty>, RepositoryError> {
                    Ok(self.read()?.$field.get(handle).cloned())
                }

                fn save(&self, record: $ty) -> Result<$ty, RepositoryError> {
                    self.write()?
                        .$field
                        .insert(record.handle.clone(), record.clone());
                    Ok(record)
                }

                fn delete(&self, handle: &str) -> Result<(), RepositoryError> {
                    self.write()?.$field.remove(handle);
                    Ok(())
                }
            }
        )*
    };
}

handle_repository!(
    Collection => collections,
    Taxonomy => taxonomies,
    GlobalSet => globals,
    AssetContainer => containers,
    Role => roles,
    Navigation => navigations,
    Site => sites,
);

impl EntryRepository for MemoryStore {
    fn query(&self, collection: Option<&str>, query: &Query) -> Result<Page<Entry>, RepositoryError> {
        let mut matches: Vec<Entry> = self
            .read()?
            .entries
            .values()
            .filter(|e| collection.is_none_or(|c| e.collection == c))
            .filter(|e| query.site.as_deref().is_none_or(|s| e.site == s))
            .filter(|e| match query.status {
                None => true,
                Some(PublishStatus::Published) => e.published,
                Some(PublishStatus::Draft) => !e.published,
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| {
            (a.collection.as_str(), a.created_at, a.slug.as_str())
                .cmp(&(b.collection.as_str(), b.created_at, b.slug.as_str()))
        });
        let matches = retain_matching(matches, &query.filters, no_extra)?;
        Ok(Page::from_matches(matches, query.limit, query.offset))
    }

    fn find(&self, id: &str) -> Result<Option<Entry>, RepositoryError> {
        Ok(self.read()?.entries.get(id).cloned())
    }

    fn find_by_slug(
        &self,
        collection: &str,
        slug: &str,
        site: &str,
    ) -> Result<Option<Entry>, RepositoryError> {
        Ok(self
            .read()?
            .entries
            .values()
            .find(|e| e.collection == collection && e.slug == slug && e.site == site)
            .cloned())
    }

    fn save(&self, entry: Entry) -> Result<Entry, RepositoryError> {
        let mut state = self.write()?;
        let taken = state.entries.values().any(|e| {
            e.id != entry.id
                && e.collection == entry.collection
                && e.slug == entry.slug
                && e.site == entry.site
        });
        if taken {
            return Err(RepositoryError::Conflict(format!(
                "Entry with slug '{}' already exists in collection '{}'",
                entry.slug, entry.collection
            )));
        }
        state.entries.insert(entry.id.clone(), entry.clone());
        Ok(entry)
    }

    fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.write()?.entries.remove(id);
        Ok(())
    }

    fn count(&self, collection: &str) -> Result<usize, RepositoryError> {
        Ok(self
            .read()?
            .entries
            .values()
            .filter(|e| e.collection == collection)
            .count())
    }
}

impl TermRepository for MemoryStore {
    fn query(&self, taxonomy: &str, query: &Query) -> Result<Page<Term>, RepositoryError> {
        let matches: Vec<Term> = self
            .read()?
            .terms
            .values()
            .filter(|t| t.taxonomy == taxonomy)
            .filter(|t| query.site.as_deref().is_none_or(|s| t.site == s))
            .cloned()
            .collect();
        let matches = retain_matching(matches, &query.filters, no_extra)?;
        Ok(Page::from_matches(matches, query.limit, query.offset))
    }

    fn find(&self, taxonomy: &str, slug: &str) -> Result<Option<Term>, RepositoryError> {
        Ok(self
            .read()?
            .terms
            .get(&(taxonomy.to_string(), slug.to_string()))
            .cloned())
    }

    fn save(&self, term: Term) -> Result<Term, RepositoryError> {
        self.write()?
            .terms
            .insert((term.taxonomy.clone(), term.slug.clone()), term.clone());
        Ok(term)
    }

    fn delete(&self, taxonomy: &str, slug: &str) -> Result<(), RepositoryError> {
        self.write()?
            .terms
            .remove(&(taxonomy.to_string(), slug.to_string()));
        Ok(())
    }

    fn count(&self, taxonomy: &str) -> Result<usize, RepositoryError> {
        Ok(self
            .read()?
            .terms
            .keys()
            .filter(|(t, _)| t == taxonomy)
            .count())
    }
}

impl AssetRepository for MemoryStore {
    fn query(&self, container: &str, query: &Query) -> Result<Page<Asset>, RepositoryError> {
        let matches: Vec<Asset> = self
            .read()?
            .assets
            .values()
            .filter(|a| a.container == container)
            .cloned()
            .collect();
        let matches = retain_matching(matches, &query.filters, asset_extra)?;
        Ok(Page::from_matches(matches, query.limit, query.offset))
    }

    fn find(&self, container: &str, path: &str) -> Result<Option<Asset>, RepositoryError> {
        Ok(self
            .read()?
            .assets
            .get(&(container.to_string(), path.to_string()))
            .cloned())
    }

    fn save(&self, asset: Asset) -> Result<Asset, RepositoryError> {
        self.write()?
            .assets
            .insert((asset.container.clone(), asset.path.clone()), asset.clone());
        Ok(asset)
    }

    fn delete(&self, container: &str, path: &str) -> Result<(), RepositoryError> {
        self.write()?
            .assets
            .remove(&(container.to_string(), path.to_string()));
        Ok(())
    }

    fn count(&self, container: &str) -> Result<usize, RepositoryError> {
        Ok(self
            .read()?
            .assets
            .keys()
            .filter(|(c, _)| c == container)
            .count())
    }
}

impl BlueprintRepository for MemoryStore {
    fn all(&self, namespace: Option<&str>) -> Result<Vec<Blueprint>, RepositoryError> {
        Ok(self
            .read()?
            .blueprints
            .values()
            .filter(|b| namespace.is_none_or(|ns| b.namespace == ns))
            .cloned()
            .collect())
    }

    fn find(&self, namespace: &str, handle: &str) -> Result<Option<Blueprint>, RepositoryError> {
        Ok(self
            .read()?
            .blueprints
            .get(&(namespace.to_string(), handle.to_string()))
            .cloned())
    }

    fn save(&self, blueprint: Blueprint) -> Result<Blueprint, RepositoryError> {
        self.write()?.blueprints.insert(
            (blueprint.namespace.clone(), blueprint.handle.clone()),
            blueprint.clone(),
        );
        Ok(blueprint)
    }

    fn delete(&self, namespace: &str, handle: &str) -> Result<(), RepositoryError> {
        self.write()?
            .blueprints
            .remove(&(namespace.to_string(), handle.to_string()));
        Ok(())
    }
}

impl UserRepository for MemoryStore {
    fn query(&self, query: &Query) -> Result<Page<User>, RepositoryError> {
        let mut matches: Vec<User> = self.read()?.users.values().cloned().collect();
        matches.sort_by(|a, b| a.email.cmp(&b.email));
        let matches = retain_matching(matches, &query.filters, no_extra)?;
        Ok(Page::from_matches(matches, query.limit, query.offset))
    }

    fn find(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.read()?.users.get(id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn save(&self, user: User) -> Result<User, RepositoryError> {
        let mut state = self.write()?;
        let taken = state
            .users
            .values()
            .any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(&user.email));
        if taken {
            return Err(RepositoryError::Conflict(format!(
                "User with email '{}' already exists",
                user.email
            )));
        }
        state.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    fn set_password(&self, id: &str, password: &str) -> Result<(), RepositoryError> {
        let hash = hash_password(password)?;
        let mut state = self.write()?;
        if !state.users.contains_key(id) {
            return Err(RepositoryError::Storage(format!("no user with id '{id}'")));
        }
        state.password_hashes.insert(id.to_string(), hash);
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let mut state = self.write()?;
        state.users.remove(id);
        state.password_hashes.remove(id);
        Ok(())
    }

    fn count_with_role(&self, role: &str) -> Result<usize, RepositoryError> {
        Ok(self
            .read()?
            .users
            .values()
            .filter(|u| u.roles.iter().any(|r| r == role))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use serde_json::json;

    use super::*;

    fn entry(id: &str, slug: &str, published: bool, data: Value) -> Entry {
        Entry {
            id: id.into(),
            collection: "articles".into(),
            slug: slug.into(),
            site: "default".into(),
            published,
            data: data.as_object().cloned().unwrap_or_default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn query(limit: usize) -> Query {
        Query {
            limit,
            ..Query::default()
        }
    }

    #[test]
    fn handle_repository_orders_by_handle_and_deletes_idempotently() {
        let store = MemoryStore::new();
        for handle in ["pages", "articles"] {
            HandleRepository::<Collection>::save(
                &store,
                Collection {
                    handle: handle.into(),
                    title: handle.into(),
                    route: None,
                    sites: vec![],
                    taxonomies: vec![],
                    dated: false,
                },
            )
            .unwrap();
        }
        let all: Vec<Collection> = HandleRepository::all(&store).unwrap();
        assert_eq!(all[0].handle, "articles");
        assert_eq!(all[1].handle, "pages");

        HandleRepository::<Collection>::delete(&store, "pages").unwrap();
        HandleRepository::<Collection>::delete(&store, "pages").unwrap();
        assert_eq!(HandleRepository::<Collection>::all(&store).unwrap().len(), 1);
    }

    #[test]
    fn entry_query_filters_status_and_data() {
        let store = MemoryStore::new();
        EntryRepository::save(&store, entry("1", "a", true, json!({"author": "jane"}))).unwrap();
        EntryRepository::save(&store, entry("2", "b", false, json!({"author": "jane"}))).unwrap();
        EntryRepository::save(&store, entry("3", "c", false, json!({"author": "joe"}))).unwrap();

        let q = Query {
            status: Some(PublishStatus::Draft),
            filters: json!({"author": "jane"}).as_object().cloned().unwrap(),
            ..query(10)
        };
        let page = EntryRepository::query(&store, Some("articles"), &q).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, "2");
    }

    #[test]
    fn entry_query_orders_by_creation_and_paginates() {
        let store = MemoryStore::new();
        let start = Utc::now();
        for i in 0..5 {
            let mut e = entry(&format!("id-{i}"), &format!("s{i}"), true, json!({}));
            e.created_at = start + Duration::seconds(i);
            EntryRepository::save(&store, e).unwrap();
        }
        let page = EntryRepository::query(&store, None, &Query { offset: 1, ..query(2) }).unwrap();
        assert_eq!(page.total, 5);
        let slugs: Vec<_> = page.items.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["s1", "s2"]);
        assert!(page.has_more());
    }

    #[test]
    fn entry_slug_is_unique_per_collection_and_site() {
        let store = MemoryStore::new();
        EntryRepository::save(&store, entry("1", "hello", true, json!({}))).unwrap();
        let err = EntryRepository::save(&store, entry("2", "hello", true, json!({}))).unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        // Re-saving the same entry is an update.
        EntryRepository::save(&store, entry("1", "hello", false, json!({}))).unwrap();
    }

    #[test]
    fn asset_folder_filter_uses_path() {
        let store = MemoryStore::new();
        for path in ["photos/a.jpg", "photos/b.jpg", "docs/c.pdf"] {
            AssetRepository::save(
                &store,
                Asset {
                    container: "main".into(),
                    path: path.into(),
                    size: 1,
                    mime_type: None,
                    meta: JsonObject::new(),
                    last_modified: Utc::now(),
                },
            )
            .unwrap();
        }
        let q = Query {
            filters: json!({"folder": "photos"}).as_object().cloned().unwrap(),
            ..query(10)
        };
        assert_eq!(AssetRepository::query(&store, "main", &q).unwrap().total, 2);
        assert_eq!(AssetRepository::count(&store, "main").unwrap(), 3);
    }

    #[test]
    fn user_roles_filter_matches_membership() {
        let store = MemoryStore::new();
        for (id, email, roles) in [("u1", "a@x.test", vec!["editor"]), ("u2", "b@x.test", vec![])] {
            UserRepository::save(
                &store,
                User {
                    id: id.into(),
                    email: email.into(),
                    name: None,
                    super_user: false,
                    roles: roles.into_iter().map(String::from).collect(),
                    data: JsonObject::new(),
                },
            )
            .unwrap();
        }
        let q = Query {
            filters: json!({"roles": "editor"}).as_object().cloned().unwrap(),
            ..query(10)
        };
        let page = UserRepository::query(&store, &q).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "u1");
        assert_eq!(store.count_with_role("editor").unwrap(), 1);
    }

    #[test]
    fn passwords_are_hashed_and_verifiable() {
        let store = MemoryStore::new();
        UserRepository::save(
            &store,
            User {
                id: "u1".into(),
                email: "a@x.test".into(),
                name: None,
                super_user: false,
                roles: vec![],
                data: JsonObject::new(),
            },
        )
        .unwrap();
        store.set_password("u1", "secret123").unwrap();
        assert!(store.verify_password("u1", "secret123"));
        assert!(!store.verify_password("u1", "wrong"));

        let stored = store.read().unwrap().password_hashes["u1"].clone();
        assert!(stored.starts_with("$argon2id$"), "{stored}");
        assert!(!stored.contains("secret123"));

        assert!(store.set_password("nobody", "x").is_err());
    }

    #[test]
    fn equal_passwords_get_distinct_salts() {
        let first = hash_password("hunter2").unwrap();
        let second = hash_password("hunter2").unwrap();
        assert_ne!(first, second);
        assert!(verify_password_hash(&first, "hunter2"));
        assert!(verify_password_hash(&second, "hunter2"));
        assert!(!verify_password_hash("not-a-phc-string", "hunter2"));
    }

    #[test]
    fn email_lookup_ignores_case() {
        let store = MemoryStore::new();
        UserRepository::save(
            &store,
            User {
                id: "u1".into(),
                email: "Jane@Example.test".into(),
                name: None,
                super_user: false,
                roles: vec![],
                data: JsonObject::new(),
            },
        )
        .unwrap();
        assert!(store.find_by_email("jane@example.test").unwrap().is_some());
    }
}
