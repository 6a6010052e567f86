// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `statamic.users`: users (`type: user`) and roles (`type: role`).
//!
//! Passwords are handed to the repository and never returned.

use serde_json::Value;
use statamic_mcp_core::services::find_or_not_found;
use statamic_mcp_core::types::{JsonObject, Role, User};
use statamic_mcp_core::{
    Domain, RequestField, ResourceKind, Services, ToolError, ToolRequest,
};
use uuid::Uuid;

use super::support::{
    bool_field, deleted, list_json, page_json, query_from, str_field, string_list, titleize,
    to_json,
};
use crate::action::ActionSpec;
use crate::tool::Tool;

pub struct UsersTool;

impl Tool for UsersTool {
    fn name(&self) -> &'static str {
        "statamic.users"
    }

    fn description(&self) -> &'static str {
        "Manage control-panel users and roles"
    }

    fn domain(&self) -> Domain {
        Domain::Users
    }

    fn targets(&self) -> &'static [&'static str] {
        &["user", "role"]
    }

    fn actions(&self) -> &'static [ActionSpec] {
        &ACTIONS
    }
}

const USER: &str = "user";
const ROLE: &str = "role";

/// Keys of a user's `data` that map onto record fields rather than custom data.
const USER_FIELDS: [&str; 5] = ["email", "name", "super", "roles", "password"];

static ACTIONS: [ActionSpec; 10] = [
    ActionSpec::new("list", "List users", list_users)
        .on(USER)
        .purpose("Browse accounts with filters and pagination")
        .examples(&[r#"{"action": "list", "type": "user", "limit": 20}"#]),
    ActionSpec::new("get", "Fetch a user by id", get_user)
        .on(USER)
        .purpose("Read an account's profile and roles")
        .requires(&[RequestField::Id])
        .examples(&[r#"{"action": "get", "type": "user", "id": "u-1"}"#]),
    ActionSpec::new("create", "Create a user", create_user)
        .on(USER)
        .purpose("Add an account; data.email is required and must be unique")
        .requires(&[RequestField::Data])
        .mutating()
        .examples(&[
            r#"{"action": "create", "type": "user", "data": {"email": "jane@example.com", "name": "Jane", "roles": ["editor"], "password": "changeme"}}"#,
        ]),
    ActionSpec::new("update", "Update a user", update_user)
        .on(USER)
        .purpose("Change profile fields, roles, super status or password")
        .requires(&[RequestField::Id, RequestField::Data])
        .mutating()
        .examples(&[r#"{"action": "update", "type": "user", "id": "u-1", "data": {"name": "Jane Doe"}}"#]),
    ActionSpec::new("delete", "Delete a user", delete_user)
        .on(USER)
        .purpose("Remove an account")
        .requires(&[RequestField::Id])
        .destructive()
        .examples(&[r#"{"action": "delete", "type": "user", "id": "u-1"}"#]),
    ActionSpec::new("list", "List roles", list_roles)
        .on(ROLE)
        .purpose("See which permission bundles exist")
        .examples(&[r#"{"action": "list", "type": "role"}"#]),
    ActionSpec::new("get", "Fetch a role", get_role)
        .on(ROLE)
        .purpose("Read a role's permissions")
        .requires(&[RequestField::Handle])
        .examples(&[r#"{"action": "get", "type": "role", "handle": "editor"}"#]),
    ActionSpec::new("create", "Create a role", create_role)
        .on(ROLE)
        .purpose("Define a permission bundle")
        .requires(&[RequestField::Handle])
        .mutating()
        .examples(&[
            r#"{"action": "create", "type": "role", "handle": "editor", "data": {"title": "Editor", "permissions": ["access cp", "edit articles entries"]}}"#,
        ]),
    ActionSpec::new("update", "Update a role", update_role)
        .on(ROLE)
        .purpose("Rename a role or replace its permissions")
        .requires(&[RequestField::Handle, RequestField::Data])
        .mutating()
        .examples(&[
            r#"{"action": "update", "type": "role", "handle": "editor", "data": {"permissions": ["access cp"]}}"#,
        ]),
    ActionSpec::new("delete", "Delete a role no user holds", delete_role)
        .on(ROLE)
        .purpose("Remove a role; refused while users are assigned to it")
        .requires(&[RequestField::Handle])
        .destructive()
        .examples(&[r#"{"action": "delete", "type": "role", "handle": "editor"}"#]),
];

fn find_user(services: &Services, request: &ToolRequest) -> Result<User, ToolError> {
    let id = request.require(RequestField::Id)?;
    services
        .users
        .find(id)?
        .ok_or_else(|| ToolError::not_found(ResourceKind::User, id))
}

fn ensure_email_free(services: &Services, email: &str, id: &str) -> Result<(), ToolError> {
    match services.users.find_by_email(email)? {
        Some(existing) if existing.id != id => Err(ToolError::conflict(format!(
            "A user with email '{email}' already exists"
        ))),
        _ => Ok(()),
    }
}

fn ensure_roles_exist(services: &Services, roles: &[String]) -> Result<(), ToolError> {
    for role in roles {
        find_or_not_found(services.roles.as_ref(), role)?;
    }
    Ok(())
}

fn custom_data(data: &JsonObject) -> impl Iterator<Item = (&String, &Value)> {
    data.iter().filter(|(k, _)| !USER_FIELDS.contains(&k.as_str()))
}

fn list_users(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    page_json(&services.users.query(&query_from(request))?)
}

fn get_user(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    to_json(&find_user(services, request)?)
}

fn create_user(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let data = request.require_data()?;
    let email = str_field(data, "email").ok_or_else(|| ToolError::missing_field("data.email"))?;
    if !email.contains('@') {
        return Err(ToolError::validation(format!("Invalid email address: {email}")));
    }

    let id = Uuid::new_v4().to_string();
    ensure_email_free(services, email, &id)?;
    let roles = string_list(data, "roles")?.unwrap_or_default();
    ensure_roles_exist(services, &roles)?;

    let user = User {
        id,
        email: email.to_string(),
        name: str_field(data, "name").map(str::to_string),
        super_user: bool_field(data, "super").unwrap_or(false),
        roles,
        data: custom_data(data)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    };
    let saved = services.users.save(user)?;
    if let Some(password) = str_field(data, "password") {
        services.users.set_password(&saved.id, password)?;
    }
    to_json(&saved)
}

fn update_user(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let mut user = find_user(services, request)?;
    let data = request.require_data()?;

    if let Some(email) = str_field(data, "email") {
        ensure_email_free(services, email, &user.id)?;
        user.email = email.to_string();
    }
    if let Some(name) = str_field(data, "name") {
        user.name = Some(name.to_string());
    }
    if let Some(super_user) = bool_field(data, "super") {
        user.super_user = super_user;
    }
    if let Some(roles) = string_list(data, "roles")? {
        ensure_roles_exist(services, &roles)?;
        user.roles = roles;
    }
    for (key, value) in custom_data(data) {
        user.data.insert(key.clone(), value.clone());
    }

    let saved = services.users.save(user)?;
    if let Some(password) = str_field(data, "password") {
        services.users.set_password(&saved.id, password)?;
    }
    to_json(&saved)
}

fn delete_user(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let user = find_user(services, request)?;
    services.users.delete(&user.id)?;
    Ok(deleted("user", &user.id))
}

fn find_role(services: &Services, request: &ToolRequest) -> Result<Role, ToolError> {
    find_or_not_found(services.roles.as_ref(), request.require(RequestField::Handle)?)
}

fn list_roles(services: &Services, _request: &ToolRequest) -> Result<Value, ToolError> {
    list_json(&services.roles.all()?)
}

fn get_role(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    to_json(&find_role(services, request)?)
}

fn create_role(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let handle = request.require(RequestField::Handle)?;
    if services.roles.find(handle)?.is_some() {
        return Err(ToolError::conflict(format!("Role '{handle}' already exists")));
    }
    let data = request.data_or_empty();
    let role = Role {
        handle: handle.to_string(),
        title: str_field(&data, "title")
            .map(str::to_string)
            .unwrap_or_else(|| titleize(handle)),
        permissions: string_list(&data, "permissions")?.unwrap_or_default(),
    };
    to_json(&services.roles.save(role)?)
}

fn update_role(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let mut role = find_role(services, request)?;
    let data = request.require_data()?;
    if let Some(title) = str_field(data, "title") {
        role.title = title.to_string();
    }
    if let Some(permissions) = string_list(data, "permissions")? {
        role.permissions = permissions;
    }
    to_json(&services.roles.save(role)?)
}

fn delete_role(services: &Services, request: &ToolRequest) -> Result<Value, ToolError> {
    let role = find_role(services, request)?;
    let holders = services.users.count_with_role(&role.handle)?;
    if holders > 0 {
        return Err(ToolError::conflict(format!(
            "Role '{}' is assigned to {holders} user(s); reassign them first",
            role.handle
        )));
    }
    services.roles.delete(&role.handle)?;
    Ok(deleted("role", &role.handle))
}
