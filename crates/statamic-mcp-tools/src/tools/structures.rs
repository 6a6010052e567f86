// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `statamic.structures`: collections, taxonomies, navigations and sites.

use serde_json::Value;
use statamic_mcp_core::services::find_or_not_found;
use statamic_mcp_core::traits::HandleRepository;
use statamic_mcp_core::types::{
    Collection, JsonObject, Navigation, Query, Record, Site, Taxonomy,
};
use statamic_mcp_core::{Domain, RequestField, Services, ToolError, ToolRequest};

use super::support::{bool_field, deleted, list_json, str_field, string_list, titleize, to_json};
use crate::action::ActionSpec;
use crate::tool::Tool;

pub struct StructuresTool;

impl Tool for StructuresTool {
    fn name(&self) -> &'static str {
        "statamic.structures"
    }

    fn description(&self) -> &'static str {
        "Manage collections, taxonomies, navigations and sites"
    }

    fn domain(&self) -> Domain {
        Domain::Structures
    }

    fn targets(&self) -> &'static [&'static str] {
        &["collection", "taxonomy", "navigation", "site"]
    }

    fn actions(&self) -> &'static [ActionSpec] {
        &ACTIONS
    }
}

const COLLECTION: &str = "collection";
const TAXONOMY: &str = "taxonomy";
const NAVIGATION: &str = "navigation";
const SITE: &str = "site";

static ACTIONS: [ActionSpec; 20] = [
    ActionSpec::new("list", "List collections", list_collections)
        .on(COLLECTION)
        .purpose("See which content collections exist")
        .examples(&[r#"{"action": "list", "type": "collection"}"#]),
    ActionSpec::new("get", "Fetch a collection", get_collection)
        .on(COLLECTION)
        .purpose("Read a collection's route, sites and taxonomies")
        .requires(&[RequestField::Handle])
        .examples(&[r#"{"action": "get", "type": "collection", "handle": "articles"}"#]),
    ActionSpec::new("create", "Create a collection", create_collection)
        .on(COLLECTION)
        .purpose("Add a content collection")
        .requires(&[RequestField::Handle])
        .mutating()
        .examples(&[
            r#"{"action": "create", "type": "collection", "handle": "articles", "data": {"title": "Articles", "route": "/blog/{slug}", "dated": true}}"#,
        ]),
    ActionSpec::new("update", "Update a collection", update_collection)
        .on(COLLECTION)
        .purpose("Change a collection's title, route, sites or taxonomies")
        .requires(&[RequestField::Handle, RequestField::Data])
        .mutating()
        .examples(&[
            r#"{"action": "update", "type": "collection", "handle": "articles", "data": {"taxonomies": ["tags"]}}"#,
        ]),
    ActionSpec::new("delete", "Delete an empty collection", delete_collection)
        .on(COLLECTION)
        .purpose("Remove a collection; refused while it has entries")
        .requires(&[RequestField::Handle])
        .destructive()
        .examples(&[r#"{"action": "delete", "type": "collection", "handle": "articles"}"#]),
    ActionSpec::new("list", "List taxonomies", list_taxonomies)
        .on(TAXONOMY)
        .purpose("See which taxonomies exist")
        .examples(&[r#"{"action": "list", "type": "taxonomy"}"#]),
    ActionSpec::new("get", "Fetch a taxonomy", get_taxonomy)
        .on(TAXONOMY)
        .purpose("Read a taxonomy's settings")
        .requires(&[RequestField::Handle])
        .examples(&[r#"{"action": "get", "type": "taxonomy", "handle": "tags"}"#]),
    ActionSpec::new("create", "Create a taxonomy", create_taxonomy)
        .on(TAXONOMY)
        .purpose("Add a taxonomy")
        .requires(&[RequestField::Handle])
        .mutating()
        .examples(&[r#"{"action": "create", "type": "taxonomy", "handle": "tags", "data": {"title": "Tags"}}"#]),
    ActionSpec::new("update", "Update a taxonomy", update_taxonomy)
        .on(TAXONOMY)
        .purpose("Rename a taxonomy or change its sites")
        .requires(&[RequestField::Handle, RequestField::Data])
        .mutating()
        .examples(&[r#"{"action": "update", "type": "taxonomy", "handle": "tags", "data": {"title": "Topics"}}"#]),
    ActionSpec::new("delete", "Delete an empty taxonomy", delete_taxonomy)
        .on(TAXONOMY)
        .purpose("Remove a taxonomy; refused while it has terms")
        .requires(&[RequestField::Handle])
        .destructive()
        .examples(&[r#"{"action": "delete", "type": "taxonomy", "handle": "tags"}"#]),
    ActionSpec::new("list", "List navigations", list_navigations)
        .on(NAVIGATION)
        .purpose("See which navigation menus exist")
        .examples(&[r#"{"action": "list", "type": "navigation"}"#]),
    ActionSpec::new("get", "Fetch a navigation with its tree", get_navigation)
        .on(NAVIGATION)
        .purpose("Read a menu's structure")
        .requires(&[RequestField::Handle])
        .examples(&[r#"{"action": "get", "type": "navigation", "handle": "main"}"#]),
    ActionSpec::new("create", "Create a navigation", create_navigation)
        .on(NAVIGATION)
        .purpose("Add a navigation menu")
        .requires(&[RequestField::Handle])
        .mutating()
        .examples(&[
            r#"{"action": "create", "type": "navigation", "handle": "footer", "data": {"title": "Footer", "max_depth": 2}}"#,
        ]),
    ActionSpec::new("update", "Update a navigation", update_navigation)
        .on(NAVIGATION)
        .purpose("Rename a menu, change its depth or replace its tree")
        .requires(&[RequestField::Handle, RequestField::Data])
        .mutating()
        .examples(&[
            r#"{"action": "update", "type": "navigation", "handle": "footer", "data": {"tree": [{"title": "About", "url": "/about"}]}}"#,
        ]),
    ActionSpec::new("delete", "Delete a navigation", delete_navigation)
        .on(NAVIGATION)
        .purpose("Remove a navigation menu")
        .requires(&[RequestField::Handle])
        .destructive()
        .examples(&[r#"{"action": "delete", "type": "navigation", "handle": "footer"}"#]),
    ActionSpec::new("list", "List sites", list_sites)
        .on(SITE)
        .purpose("See the sites of a multi-site install; the first is the default")
        .examples(&[r#"{"action": "list", "type": "site"}"#]),
    ActionSpec::new("get", "Fetch a site", get_site)
        .on(SITE)
        .purpose("Read a site's URL and locale")
        .requires(&[RequestField::Handle])
        .examples(&[r#"{"action": "get", "type": "site", "handle": "default"}"#]),
    ActionSpec::new("create", "Create a site", create_site)
        .on(SITE)
        .purpose("Add a site")
        .requires(&[RequestField::Handle])
        .mutating()
        .examples(&[
            r#"{"action": "create", "type": "site", "handle": "fr", "data": {"name": "French", "url": "/fr/", "locale": "fr_FR"}}"#,
        ]),
    ActionSpec::new("update", "Update a site", update_site)
        .on(SITE)
        .purpose("Change a site's name, URL or locale")
        .requires(&[RequestField::Handle, RequestField::Data])
        .mutating()
        .examples(&[r#"{"action": "update", "type": "site", "handle": "fr", "data": {"url": "https://fr.example.com/"}}"#]),
    ActionSpec::new("delete", "Delete a site other than the last one", delete_site)
        .on(SITE)
        .purpose("Remove a site; at least one site always remains")
        .requires(&[RequestField::Handle])
        .destructive()
        .examples(&[r#"{"action": "delete", "type": "site", "handle": "fr"}"#]),
];

fn list_all<T: Record + serde::Serialize>(
    repository: &dyn HandleRepository<T>,
) -> Result<Value, ToolError> {
    list_json(&repository.all()?)
}

fn get_one<T: Record + serde::Serialize>(
    repository: &dyn HandleRepository<T>,
    request: &ToolRequest,
) -> Result<Value, ToolError> {
    to_json(&find_or_not_found(repository, request.require(RequestField::Handle)?)?)
}

fn delete_one<T: Record>(
    repository: &dyn HandleRepository<T>,
    request: &ToolRequest,
    kind: &str,
) -> Result<Value, ToolError> {
    let record = find_or_not_found(repository, request.require(RequestField::Handle)?)?;
    repository.delete(record.handle())?;
    Ok(deleted(kind, record.handle()))
}

fn list_collections(services: &Services, _request: &ToolRequest) -> Result<Value, ToolError> {
    list_all(services.collections.as_ref())
}

fn get_collection(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    get_one(services.collections.as_ref(), request)
}

fn list_taxonomies(services: &Services, _request: &ToolRequest) -> Result<Value, ToolError> {
    list_all(services.taxonomies.as_ref())
}

fn get_taxonomy(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    get_one(services.taxonomies.as_ref(), request)
}

fn list_navigations(services: &Services, _request: &ToolRequest) -> Result<Value, ToolError> {
    list_all(services.navigations.as_ref())
}

fn get_navigation(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    get_one(services.navigations.as_ref(), request)
}

fn delete_navigation(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    delete_one(services.navigations.as_ref(), request, NAVIGATION)
}

fn list_sites(services: &Services, _request: &ToolRequest) -> Result<Value, ToolError> {
    list_all(services.sites.as_ref())
}

fn get_site(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    get_one(services.sites.as_ref(), request)
}

/// Fails with a conflict when `handle` is already taken.
fn ensure_new<T: Record>(repository: &dyn HandleRepository<T>, handle: &str) -> Result<(), ToolError> {
    if repository.find(handle)?.is_some() {
        return Err(ToolError::conflict(format!(
            "{} '{handle}' already exists",
            T::KIND
        )));
    }
    Ok(())
}

fn title_or(data: &JsonObject, key: &str, handle: &str) -> String {
    str_field(data, key)
        .map(str::to_string)
        .unwrap_or_else(|| titleize(handle))
}

fn ensure_sites_exist(services: &Services, sites: &[String]) -> Result<(), ToolError> {
    for site in sites {
        find_or_not_found(services.sites.as_ref(), site)?;
    }
    Ok(())
}

fn create_collection(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let handle = request.require(RequestField::Handle)?;
    ensure_new(services.collections.as_ref(), handle)?;
    let data = request.data_or_empty();

    let sites = match string_list(&data, "sites")? {
        Some(sites) => {
            ensure_sites_exist(services, &sites)?;
            sites
        }
        None => vec![services.default_site()?],
    };
    let taxonomies = string_list(&data, "taxonomies")?.unwrap_or_default();
    for taxonomy in &taxonomies {
        services.taxonomy(taxonomy)?;
    }

    let collection = Collection {
        handle: handle.to_string(),
        title: title_or(&data, "title", handle),
        route: str_field(&data, "route").map(str::to_string),
        sites,
        taxonomies,
        dated: bool_field(&data, "dated").unwrap_or(false),
    };
    to_json(&services.collections.save(collection)?)
}

fn update_collection(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let mut collection = services.collection(request.require(RequestField::Handle)?)?;
    let data = request.require_data()?;

    if let Some(title) = str_field(data, "title") {
        collection.title = title.to_string();
    }
    if data.contains_key("route") {
        collection.route = str_field(data, "route").map(str::to_string);
    }
    if let Some(sites) = string_list(data, "sites")? {
        ensure_sites_exist(services, &sites)?;
        collection.sites = sites;
    }
    if let Some(taxonomies) = string_list(data, "taxonomies")? {
        for taxonomy in &taxonomies {
            services.taxonomy(taxonomy)?;
        }
        collection.taxonomies = taxonomies;
    }
    if let Some(dated) = bool_field(data, "dated") {
        collection.dated = dated;
    }
    to_json(&services.collections.save(collection)?)
}

fn delete_collection(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let collection = services.collection(request.require(RequestField::Handle)?)?;
    let entries = services.entries.count(&collection.handle)?;
    if entries > 0 {
        return Err(ToolError::conflict(format!(
            "Collection '{}' still has {entries} entries; delete them first",
            collection.handle
        )));
    }
    services.collections.delete(&collection.handle)?;
    Ok(deleted(COLLECTION, &collection.handle))
}

fn create_taxonomy(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let handle = request.require(RequestField::Handle)?;
    ensure_new(services.taxonomies.as_ref(), handle)?;
    let data = request.data_or_empty();

    let sites = match string_list(&data, "sites")? {
        Some(sites) => {
            ensure_sites_exist(services, &sites)?;
            sites
        }
        None => vec![services.default_site()?],
    };
    let taxonomy = Taxonomy {
        handle: handle.to_string(),
        title: title_or(&data, "title", handle),
        sites,
    };
    to_json(&services.taxonomies.save(taxonomy)?)
}

fn update_taxonomy(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let mut taxonomy = services.taxonomy(request.require(RequestField::Handle)?)?;
    let data = request.require_data()?;
    if let Some(title) = str_field(data, "title") {
        taxonomy.title = title.to_string();
    }
    if let Some(sites) = string_list(data, "sites")? {
        ensure_sites_exist(services, &sites)?;
        taxonomy.sites = sites;
    }
    to_json(&services.taxonomies.save(taxonomy)?)
}

fn delete_taxonomy(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let taxonomy = services.taxonomy(request.require(RequestField::Handle)?)?;
    let terms = services.terms.count(&taxonomy.handle)?;
    if terms > 0 {
        return Err(ToolError::conflict(format!(
            "Taxonomy '{}' still has {terms} terms; delete them first",
            taxonomy.handle
        )));
    }
    let users = collections_using(services, |c| c.taxonomies.contains(&taxonomy.handle))?;
    if !users.is_empty() {
        return Err(ToolError::conflict(format!(
            "Taxonomy '{}' is used by collection(s) {}; detach it first",
            taxonomy.handle,
            users.join(", ")
        )));
    }
    services.taxonomies.delete(&taxonomy.handle)?;
    Ok(deleted(TAXONOMY, &taxonomy.handle))
}

/// Handles of the collections matching `uses`.
fn collections_using(
    services: &Services,
    uses: impl Fn(&Collection) -> bool,
) -> Result<Vec<String>, ToolError> {
    Ok(services
        .collections
        .all()?
        .into_iter()
        .filter(|collection| uses(collection))
        .map(|collection| collection.handle)
        .collect())
}

fn max_depth(data: &JsonObject) -> Result<Option<u32>, ToolError> {
    match data.get("max_depth") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0)
            .map(Some)
            .ok_or_else(|| ToolError::validation("Field 'max_depth' must be a positive integer")),
    }
}

fn tree(data: &JsonObject) -> Result<Option<Vec<Value>>, ToolError> {
    match data.get("tree") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items.clone())),
        Some(_) => Err(ToolError::validation("Field 'tree' must be a list")),
    }
}

fn create_navigation(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let handle = request.require(RequestField::Handle)?;
    ensure_new(services.navigations.as_ref(), handle)?;
    let data = request.data_or_empty();
    let navigation = Navigation {
        handle: handle.to_string(),
        title: title_or(&data, "title", handle),
        max_depth: max_depth(&data)?,
        collections: string_list(&data, "collections")?.unwrap_or_default(),
        tree: tree(&data)?.unwrap_or_default(),
    };
    to_json(&services.navigations.save(navigation)?)
}

fn update_navigation(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let mut navigation =
        find_or_not_found(services.navigations.as_ref(), request.require(RequestField::Handle)?)?;
    let data = request.require_data()?;
    if let Some(title) = str_field(data, "title") {
        navigation.title = title.to_string();
    }
    if data.contains_key("max_depth") {
        navigation.max_depth = max_depth(data)?;
    }
    if let Some(collections) = string_list(data, "collections")? {
        navigation.collections = collections;
    }
    if let Some(tree) = tree(data)? {
        navigation.tree = tree;
    }
    to_json(&services.navigations.save(navigation)?)
}

fn create_site(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let handle = request.require(RequestField::Handle)?;
    ensure_new(services.sites.as_ref(), handle)?;
    let data = request.data_or_empty();
    let site = Site {
        handle: handle.to_string(),
        name: title_or(&data, "name", handle),
        url: str_field(&data, "url").unwrap_or("/").to_string(),
        locale: str_field(&data, "locale").unwrap_or("en_US").to_string(),
    };
    to_json(&services.sites.save(site)?)
}

fn update_site(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let mut site = find_or_not_found(services.sites.as_ref(), request.require(RequestField::Handle)?)?;
    let data = request.require_data()?;
    if let Some(name) = str_field(data, "name") {
        site.name = name.to_string();
    }
    if let Some(url) = str_field(data, "url") {
        site.url = url.to_string();
    }
    if let Some(locale) = str_field(data, "locale") {
        site.locale = locale.to_string();
    }
    to_json(&services.sites.save(site)?)
}

fn delete_site(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let site = find_or_not_found(services.sites.as_ref(), request.require(RequestField::Handle)?)?;
    if services.sites.all()?.len() <= 1 {
        return Err(ToolError::conflict(format!(
            "Cannot delete site '{}': it is the last site",
            site.handle
        )));
    }
    if services.default_site()? == site.handle {
        return Err(ToolError::conflict(format!(
            "Cannot delete site '{}': it is the default site",
            site.handle
        )));
    }
    let users = collections_using(services, |c| c.sites.contains(&site.handle))?;
    if !users.is_empty() {
        return Err(ToolError::conflict(format!(
            "Site '{}' is used by collection(s) {}; remove it from them first",
            site.handle,
            users.join(", ")
        )));
    }
    let taxonomies: Vec<String> = services
        .taxonomies
        .all()?
        .into_iter()
        .filter(|taxonomy| taxonomy.sites.contains(&site.handle))
        .map(|taxonomy| taxonomy.handle)
        .collect();
    if !taxonomies.is_empty() {
        return Err(ToolError::conflict(format!(
            "Site '{}' is used by taxonomy(s) {}; remove it from them first",
            site.handle,
            taxonomies.join(", ")
        )));
    }
    let entries = services
        .entries
        .query(
            None,
            &Query {
                site: Some(site.handle.clone()),
                limit: 1,
                ..Query::default()
            },
        )?
        .total;
    if entries > 0 {
        return Err(ToolError::conflict(format!(
            "Site '{}' still has {entries} entries; delete them first",
            site.handle
        )));
    }
    services.sites.delete(&site.handle)?;
    Ok(deleted(SITE, &site.handle))
}
