//! MCP server implementation for mnemograph.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, ServerHandler},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool_handler,
};

use crate::context::Context;

/// mnemograph MCP server.
///
/// Exposes the status and maintenance surface of the selected graph backend
/// to MCP clients. The knowledge-graph engine's own tools are layered on top
/// by the embedding application.
#[derive(Clone)]
pub struct McpServer {
    pub(crate) ctx: Arc<Context>,
    tool_router: ToolRouter<McpServer>,
}

impl McpServer {
    /// Create a new MCP server with the given context.
    pub fn new(ctx: Context) -> Self {
        tracing::info!(backend = %ctx.driver.provider(), "Initializing mnemograph MCP server");

        Self {
            ctx: Arc::new(ctx),
            tool_router: Self::tool_router(),
        }
    }

    /// Build the combined tool router from all tool modules.
    fn tool_router() -> ToolRouter<Self> {
        Self::status_tools()
    }

    /// Get direct access to the context.
    pub fn context(&self) -> &Context {
        &self.ctx
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                r#"mnemograph - Knowledge Graph Memory MCP Server

Stores agent memory in a graph database. One of three backends is active,
selected at startup: neo4j (server, default), falkordb (server), or
surreal (embedded, zero-setup in-memory or file-backed).

## Tools

- **get_status** - Active backend, liveness, group id, and model name
- **clear_graph** - Destructively wipe all graph data in the active backend
"#
                .to_string(),
            ),
        }
    }
}
