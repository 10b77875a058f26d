//! Status and maintenance tools.

use rmcp::{model::CallToolResult, tool, tool_router, ErrorData as McpError};
use serde::Serialize;

use crate::config::DatabaseType;
use crate::error::AppError;
use crate::mcp::server::McpServer;

/// Result of the clear_graph tool.
#[derive(Debug, Serialize)]
pub struct ClearGraphResult {
    pub cleared: bool,
    pub database_type: DatabaseType,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router(router = status_tools, vis = "pub(crate)")]
impl McpServer {
    /// Report which backend is active and whether it answers a liveness
    /// round-trip right now.
    #[tool(
        description = "Get server status: active graph backend, liveness, group id, and model name."
    )]
    pub async fn get_status(&self) -> Result<CallToolResult, McpError> {
        let _permit = self
            .ctx
            .semaphore
            .acquire()
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let status = self.ctx.status().await;

        tracing::info!(
            backend = %status.database_type,
            healthy = status.healthy,
            "Status reported"
        );

        Ok(CallToolResult::success(vec![rmcp::model::Content::json(
            serde_json::to_value(status).unwrap(),
        )
        .unwrap()]))
    }

    /// Wipe all graph data in the active backend.
    ///
    /// Destructive and irreversible; intended for resetting a scratch memory
    /// store, mirroring the `--destroy-graph` startup flag.
    #[tool(description = "Destructively clear all graph data in the active backend.")]
    pub async fn clear_graph(&self) -> Result<CallToolResult, McpError> {
        let _permit = self
            .ctx
            .semaphore
            .acquire()
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        self.ctx
            .driver
            .clear()
            .await
            .map_err(|e: AppError| McpError::from(e))?;

        let response = ClearGraphResult {
            cleared: true,
            database_type: self.ctx.driver.provider(),
        };

        tracing::info!(backend = %response.database_type, "Graph cleared");

        Ok(CallToolResult::success(vec![rmcp::model::Content::json(
            serde_json::to_value(response).unwrap(),
        )
        .unwrap()]))
    }
}
