// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MCP server for statamic-mcp.
//!
//! [`App::from_config`] wires the in-memory backend, audit sinks, and router
//! policy from configuration; [`serve_stdio`] exposes the router to an MCP
//! client over stdin/stdout.

pub mod app;
pub mod args;
pub mod error;
pub mod server;

pub use app::App;
pub use args::ToolArguments;
pub use error::ServerError;
pub use server::{StatamicMcpServer, serve_stdio};
