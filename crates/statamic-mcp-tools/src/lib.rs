// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool routing for statamic-mcp.
//!
//! The [`ActionRouter`] is the only entry point: it resolves a tool call to
//! an [`ActionSpec`], gates it by context and permission, and runs the
//! handler inside the audit wrapper. The built-in tools live in [`tools`].

pub mod action;
pub mod discovery;
pub mod permissions;
pub mod router;
pub mod tool;
pub mod tools;

pub use action::{ActionDescriptor, ActionSpec, DISCOVERY_ACTIONS, is_discovery};
pub use permissions::{DEFAULT_SUPERUSER_PERMISSION, PermissionResolver};
pub use router::{ActionRouter, RouterPolicy};
pub use tool::{RegisteredTool, Tool, ToolRegistry};
pub use tools::{builtin_registry, builtin_tools};
