// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MCP server handler exposing the eight content tools.
//!
//! Every tool forwards its arguments to the [`ActionRouter`] in CLI context
//! and returns the serialized envelope as text content. A failure envelope
//! is returned as an error result so clients can tell them apart without
//! parsing; protocol-level errors are reserved for serialization failures.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, ServiceExt, tool, tool_handler, tool_router};
use statamic_mcp_core::ExecutionContext;
use statamic_mcp_tools::ActionRouter;
use tracing::{debug, info};

use crate::args::ToolArguments;
use crate::error::ServerError;

const INSTRUCTIONS: &str = "Tools for reading and managing a Statamic site's content. \
Each tool takes an `action` plus the fields that action needs. Call any tool with \
{\"action\": \"help\"} to list its actions and required fields, \
{\"action\": \"discover\"} for its capabilities and argument schema, or \
{\"action\": \"examples\"} for ready-to-use payloads. Every call returns \
{\"success\": true, \"data\": ...} or {\"success\": false, \"errors\": [...]}. \
Destructive blueprint deletes need \"confirm\": true.";

/// The MCP-facing server. Cheap to clone; all clones share one router.
#[derive(Clone)]
pub struct StatamicMcpServer {
    router: Arc<ActionRouter>,
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for StatamicMcpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatamicMcpServer")
            .field("router", &self.router)
            .finish_non_exhaustive()
    }
}

impl StatamicMcpServer {
    pub fn new(router: Arc<ActionRouter>) -> Self {
        Self {
            router,
            tool_router: Self::tool_router(),
        }
    }

    pub fn router(&self) -> &ActionRouter {
        &self.router
    }

    /// Routes one call and wraps the envelope as a tool result.
    pub fn dispatch(&self, tool: &str, args: &ToolArguments) -> Result<CallToolResult, McpError> {
        debug!(tool, action = %args.action, "mcp tool call");
        let envelope = self
            .router
            .call(tool, args.to_value(), &ExecutionContext::cli());
        let text = serde_json::to_string(&envelope)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        let content = vec![Content::text(text)];
        Ok(if envelope.is_success() {
            CallToolResult::success(content)
        } else {
            CallToolResult::error(content)
        })
    }
}

#[tool_router]
impl StatamicMcpServer {
    #[tool(
        name = "statamic.entries",
        description = "List, read, create, update, delete, publish and unpublish collection entries. Call with {\"action\": \"help\"} for details."
    )]
    pub async fn entries(
        &self,
        Parameters(args): Parameters<ToolArguments>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch("statamic.entries", &args)
    }

    #[tool(
        name = "statamic.terms",
        description = "List, read, create, update and delete taxonomy terms. Every action needs `taxonomy`."
    )]
    pub async fn terms(
        &self,
        Parameters(args): Parameters<ToolArguments>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch("statamic.terms", &args)
    }

    #[tool(
        name = "statamic.globals",
        description = "List, read, create, update and delete global sets and their per-site values."
    )]
    pub async fn globals(
        &self,
        Parameters(args): Parameters<ToolArguments>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch("statamic.globals", &args)
    }

    #[tool(
        name = "statamic.blueprints",
        description = "List, read, create, update and delete blueprints by namespace and handle. Delete requires confirm: true."
    )]
    pub async fn blueprints(
        &self,
        Parameters(args): Parameters<ToolArguments>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch("statamic.blueprints", &args)
    }

    #[tool(
        name = "statamic.assets",
        description = "Manage asset containers (type: container) and asset metadata (type: asset): list, get, create, update, move, rename, delete."
    )]
    pub async fn assets(
        &self,
        Parameters(args): Parameters<ToolArguments>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch("statamic.assets", &args)
    }

    #[tool(
        name = "statamic.users",
        description = "Manage control-panel users (type: user) and roles (type: role)."
    )]
    pub async fn users(
        &self,
        Parameters(args): Parameters<ToolArguments>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch("statamic.users", &args)
    }

    #[tool(
        name = "statamic.structures",
        description = "Manage collections, taxonomies, navigations and sites (type: collection | taxonomy | navigation | site)."
    )]
    pub async fn structures(
        &self,
        Parameters(args): Parameters<ToolArguments>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch("statamic.structures", &args)
    }

    #[tool(
        name = "statamic.system",
        description = "System information, cache status, and cache clearing."
    )]
    pub async fn system(
        &self,
        Parameters(args): Parameters<ToolArguments>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch("statamic.system", &args)
    }
}

#[tool_handler]
impl ServerHandler for StatamicMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Serves `router` over stdin/stdout until the client disconnects.
pub async fn serve_stdio(router: Arc<ActionRouter>) -> Result<(), ServerError> {
    info!(tools = router.registry().len(), "starting MCP server on stdio");
    let service = StatamicMcpServer::new(router)
        .serve(rmcp::transport::io::stdio())
        .await
        .map_err(|e| ServerError::Transport(e.to_string()))?;
    let reason = service
        .waiting()
        .await
        .map_err(|e| ServerError::Transport(e.to_string()))?;
    info!(?reason, "MCP server stopped");
    Ok(())
}
