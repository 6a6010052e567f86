// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `statamic.assets`: asset containers (`type: container`) and the asset
//! records inside them (`type: asset`). File bytes are not handled here;
//! only the records and their metadata.

use chrono::Utc;
use serde_json::Value;
use statamic_mcp_core::services::find_or_not_found;
use statamic_mcp_core::types::{Asset, AssetContainer};
use statamic_mcp_core::{
    Domain, RequestField, ResourceKind, Services, ToolError, ToolRequest,
};

use super::support::{
    bool_field, deleted, list_json, merge, page_json, query_from, str_field, titleize, to_json,
};
use crate::action::ActionSpec;
use crate::tool::Tool;

pub struct AssetsTool;

impl Tool for AssetsTool {
    fn name(&self) -> &'static str {
        "statamic.assets"
    }

    fn description(&self) -> &'static str {
        "Manage asset containers and the asset records inside them"
    }

    fn domain(&self) -> Domain {
        Domain::Assets
    }

    fn targets(&self) -> &'static [&'static str] {
        &["container", "asset"]
    }

    fn actions(&self) -> &'static [ActionSpec] {
        &ACTIONS
    }
}

const CONTAINER: &str = "container";
const ASSET: &str = "asset";

static ACTIONS: [ActionSpec; 11] = [
    ActionSpec::new("list", "List asset containers", list_containers)
        .on(CONTAINER)
        .purpose("See where assets can be stored")
        .examples(&[r#"{"action": "list", "type": "container"}"#]),
    ActionSpec::new("get", "Fetch an asset container", get_container)
        .on(CONTAINER)
        .purpose("Read a container's settings and asset count")
        .requires(&[RequestField::Handle])
        .examples(&[r#"{"action": "get", "type": "container", "handle": "main"}"#]),
    ActionSpec::new("create", "Create an asset container", create_container)
        .on(CONTAINER)
        .purpose("Add a storage location on a configured disk")
        .requires(&[RequestField::Handle])
        .mutating()
        .examples(&[
            r#"{"action": "create", "type": "container", "handle": "images", "data": {"title": "Images", "disk": "public"}}"#,
        ]),
    ActionSpec::new("update", "Update an asset container", update_container)
        .on(CONTAINER)
        .purpose("Rename a container or change its disk or upload setting")
        .requires(&[RequestField::Handle, RequestField::Data])
        .mutating()
        .examples(&[
            r#"{"action": "update", "type": "container", "handle": "images", "data": {"allow_uploads": false}}"#,
        ]),
    ActionSpec::new("delete", "Delete an empty asset container", delete_container)
        .on(CONTAINER)
        .purpose("Remove a container; refused while it still holds assets")
        .requires(&[RequestField::Handle])
        .destructive()
        .examples(&[r#"{"action": "delete", "type": "container", "handle": "images"}"#]),
    ActionSpec::new("list", "List assets in a container", list_assets)
        .on(ASSET)
        .purpose("Browse a container's files with filters and pagination")
        .requires(&[RequestField::Container])
        .precheck(container_exists)
        .examples(&[
            r#"{"action": "list", "type": "asset", "container": "main", "filters": {"folder": "photos"}}"#,
        ]),
    ActionSpec::new("get", "Fetch one asset", get_asset)
        .on(ASSET)
        .purpose("Read an asset's metadata")
        .requires(&[RequestField::Container, RequestField::Path])
        .precheck(container_exists)
        .examples(&[r#"{"action": "get", "type": "asset", "container": "main", "path": "photos/cat.jpg"}"#]),
    ActionSpec::new("update", "Merge metadata into an asset", update_asset)
        .on(ASSET)
        .purpose("Edit alt text, captions and other metadata")
        .requires(&[RequestField::Container, RequestField::Path, RequestField::Data])
        .precheck(container_exists)
        .mutating()
        .examples(&[
            r#"{"action": "update", "type": "asset", "container": "main", "path": "photos/cat.jpg", "data": {"alt": "A cat"}}"#,
        ]),
    ActionSpec::new("move", "Move an asset to another folder", move_asset)
        .on(ASSET)
        .purpose("Reorganize files; data.folder is the destination, empty for the root")
        .requires(&[RequestField::Container, RequestField::Path, RequestField::Data])
        .precheck(container_exists)
        .mutating()
        .examples(&[
            r#"{"action": "move", "type": "asset", "container": "main", "path": "photos/cat.jpg", "data": {"folder": "animals"}}"#,
        ]),
    ActionSpec::new("rename", "Rename an asset", rename_asset)
        .on(ASSET)
        .purpose("Change a file name; data.filename is the new name")
        .requires(&[RequestField::Container, RequestField::Path, RequestField::Data])
        .precheck(container_exists)
        .mutating()
        .examples(&[
            r#"{"action": "rename", "type": "asset", "container": "main", "path": "photos/cat.jpg", "data": {"filename": "kitten.jpg"}}"#,
        ]),
    ActionSpec::new("delete", "Delete an asset", delete_asset)
        .on(ASSET)
        .purpose("Remove an asset record")
        .requires(&[RequestField::Container, RequestField::Path])
        .precheck(container_exists)
        .destructive()
        .examples(&[r#"{"action": "delete", "type": "asset", "container": "main", "path": "photos/cat.jpg"}"#]),
];

fn container_exists(services: &Services, request: &ToolRequest) -> Result<(), ToolError> {
    services
        .container(request.require(RequestField::Container)?)
        .map(|_| ())
}

fn find_container(services: &Services, request: &ToolRequest) -> Result<AssetContainer, ToolError> {
    find_or_not_found(services.containers.as_ref(), request.require(RequestField::Handle)?)
}

fn container_json(services: &Services, container: &AssetContainer) -> Result<Value, ToolError> {
    let mut value = to_json(container)?;
    value["asset_count"] = services.assets.count(&container.handle)?.into();
    Ok(value)
}

fn list_containers(services: &Services, _request: &ToolRequest) -> Result<Value, ToolError> {
    let containers = services
        .containers
        .all()?
        .iter()
        .map(|c| container_json(services, c))
        .collect::<Result<Vec<_>, _>>()?;
    list_json(&containers)
}

fn get_container(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    container_json(services, &find_container(services, request)?)
}

fn create_container(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let handle = request.require(RequestField::Handle)?;
    if services.containers.find(handle)?.is_some() {
        return Err(ToolError::conflict(format!(
            "Asset container '{handle}' already exists"
        )));
    }
    let data = request.data_or_empty();
    let container = AssetContainer {
        handle: handle.to_string(),
        title: str_field(&data, "title")
            .map(str::to_string)
            .unwrap_or_else(|| titleize(handle)),
        disk: str_field(&data, "disk").unwrap_or("public").to_string(),
        allow_uploads: bool_field(&data, "allow_uploads").unwrap_or(true),
    };
    container_json(services, &services.containers.save(container)?)
}

fn update_container(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let mut container = find_container(services, request)?;
    let data = request.require_data()?;
    if let Some(title) = str_field(data, "title") {
        container.title = title.to_string();
    }
    if let Some(disk) = str_field(data, "disk") {
        container.disk = disk.to_string();
    }
    if let Some(allow) = bool_field(data, "allow_uploads") {
        container.allow_uploads = allow;
    }
    container_json(services, &services.containers.save(container)?)
}

fn delete_container(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let container = find_container(services, request)?;
    let count = services.assets.count(&container.handle)?;
    if count > 0 {
        return Err(ToolError::conflict(format!(
            "Asset container '{}' still contains {count} asset(s); delete or move them first",
            container.handle
        )));
    }
    services.containers.delete(&container.handle)?;
    Ok(deleted("container", &container.handle))
}

fn find_asset(services: &Services, request: &ToolRequest) -> Result<Asset, ToolError> {
    let container = request.require(RequestField::Container)?;
    let path = request.require(RequestField::Path)?;
    services
        .assets
        .find(container, path)?
        .ok_or_else(|| ToolError::not_found(ResourceKind::Asset, format!("{container}::{path}")))
}

/// Saves `asset` under `new_path` and removes the old record.
fn relocate(services: &Services, mut asset: Asset, new_path: String) -> Result<Value, ToolError> {
    if new_path == asset.path {
        return to_json(&asset);
    }
    if services.assets.find(&asset.container, &new_path)?.is_some() {
        return Err(ToolError::conflict(format!(
            "Asset '{new_path}' already exists in container '{}'",
            asset.container
        )));
    }
    let old_path = std::mem::replace(&mut asset.path, new_path);
    asset.last_modified = Utc::now();
    let saved = services.assets.save(asset)?;
    services.assets.delete(&saved.container, &old_path)?;
    to_json(&saved)
}

fn join_path(folder: &str, basename: &str) -> String {
    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        basename.to_string()
    } else {
        format!("{folder}/{basename}")
    }
}

fn list_assets(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let container = request.require(RequestField::Container)?;
    page_json(&services.assets.query(container, &query_from(request))?)
}

fn get_asset(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    to_json(&find_asset(services, request)?)
}

fn update_asset(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let mut asset = find_asset(services, request)?;
    merge(&mut asset.meta, request.require_data()?);
    asset.last_modified = Utc::now();
    to_json(&services.assets.save(asset)?)
}

fn move_asset(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let asset = find_asset(services, request)?;
    let folder = request
        .data
        .as_ref()
        .and_then(|d| d.get("folder"))
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::missing_field("data.folder"))?;
    let new_path = join_path(folder, asset.basename());
    relocate(services, asset, new_path)
}

fn rename_asset(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let asset = find_asset(services, request)?;
    let filename = request
        .data_str("filename")
        .ok_or_else(|| ToolError::missing_field("data.filename"))?;
    if filename.contains('/') {
        return Err(ToolError::validation(
            "data.filename must not contain '/'; use move to change folders",
        ));
    }
    let new_path = join_path(asset.folder(), filename);
    relocate(services, asset, new_path)
}

fn delete_asset(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let asset = find_asset(services, request)?;
    services.assets.delete(&asset.container, &asset.path)?;
    Ok(deleted("asset", &asset.path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_path_handles_root_and_slashes() {
        assert_eq!(join_path("", "a.jpg"), "a.jpg");
        assert_eq!(join_path("/photos/", "a.jpg"), "photos/a.jpg");
        assert_eq!(join_path("a/b", "c.png"), "a/b/c.png");
    }
}
