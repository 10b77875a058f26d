//! Serve command: run the MCP server over the selected transport.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use clap::Args;
use color_eyre::Result;
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use rmcp::ServiceExt;
use tower::ServiceBuilder;

use crate::config::{CliOverrides, Config, DatabaseType, Transport};
use crate::context::{Context, DriverStatus};
use crate::mcp::McpServer;

use super::App;

/// Arguments for the `serve` subcommand.
///
/// Every optional flag overlays the corresponding environment-derived
/// configuration value; unspecified flags leave the environment value alone.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Graph database backend to use
    #[arg(long, value_enum)]
    pub database_type: Option<DatabaseType>,

    /// MCP transport
    #[arg(long, value_enum)]
    pub transport: Option<Transport>,

    /// Namespace identifier partitioning graph data
    #[arg(long)]
    pub group_id: Option<String>,

    /// LLM model name handed to the knowledge-graph engine
    #[arg(long)]
    pub model: Option<String>,

    /// Override the Neo4j bolt URI
    #[arg(long)]
    pub neo4j_uri: Option<String>,

    /// Override the FalkorDB redis URI
    #[arg(long)]
    pub falkordb_uri: Option<String>,

    /// Override the embedded database path (":memory:" for in-memory)
    #[arg(long)]
    pub surreal_db: Option<String>,

    /// Wipe all graph data before serving
    #[arg(long)]
    pub destroy_graph: bool,

    /// Host address to bind to (http transport)
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on (http transport)
    #[arg(long, default_value = "8000")]
    pub port: u16,
}

impl ServeArgs {
    /// The configuration overlay carried by these arguments.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            database_type: self.database_type,
            transport: self.transport,
            group_id: self.group_id.clone(),
            model_name: self.model.clone(),
            neo4j_uri: self.neo4j_uri.clone(),
            falkordb_uri: self.falkordb_uri.clone(),
            surreal_db: self.surreal_db.clone(),
        }
    }
}

/// Handler for the /status route on the http transport.
async fn status_handler(
    axum::extract::State(ctx): axum::extract::State<Arc<Context>>,
) -> Json<DriverStatus> {
    Json(ctx.status().await)
}

impl App {
    /// Run the MCP server.
    ///
    /// Builds the configuration (environment plus CLI overlay), runs the
    /// initialization routine, then serves over the configured transport.
    /// Configuration or liveness failures abort before any request is
    /// accepted.
    pub async fn run_serve(&self, args: &ServeArgs) -> Result<()> {
        let config = Config::from_cli_and_env(&args.overrides())?;

        tracing::info!(
            backend = %config.database_type,
            transport = %config.transport,
            group_id = %config.group_id,
            "Starting mnemograph MCP server"
        );

        let ctx = Context::initialize(config.clone())
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Initialization failed: {}", e))?;

        if args.destroy_graph {
            tracing::warn!("--destroy-graph set, wiping all graph data");
            ctx.driver
                .clear()
                .await
                .map_err(|e| color_eyre::eyre::eyre!("Failed to destroy graph: {}", e))?;
        }

        match config.transport {
            Transport::Stdio => self.serve_stdio(ctx).await,
            Transport::Http => self.serve_http(ctx, &args.host, args.port).await,
        }
    }

    /// Serve over stdio for local clients.
    async fn serve_stdio(&self, ctx: Context) -> Result<()> {
        let server = McpServer::new(ctx);

        let service = server.serve(rmcp::transport::stdio()).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to start MCP server");
            color_eyre::eyre::eyre!("Failed to start MCP server: {}", e)
        })?;

        tracing::info!("MCP server started, waiting for connections");

        service.waiting().await.map_err(|e| {
            tracing::error!(error = %e, "MCP server error");
            color_eyre::eyre::eyre!("MCP server error: {}", e)
        })?;

        tracing::info!("MCP server shutting down");
        Ok(())
    }

    /// Serve over streamable HTTP, with a plain /status route alongside the
    /// MCP endpoint.
    async fn serve_http(&self, ctx: Context, host: &str, port: u16) -> Result<()> {
        let shared = Arc::new(ctx.clone());

        let service = StreamableHttpService::new(
            move || Ok(McpServer::new(ctx.clone())),
            Arc::new(LocalSessionManager::default()),
            StreamableHttpServerConfig::default(),
        );

        let app = Router::new()
            .route("/status", get(status_handler))
            .with_state(shared)
            .fallback_service(ServiceBuilder::new().service(service));

        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .map_err(|e| color_eyre::eyre::eyre!("Invalid address {}:{}: {}", host, port, e))?;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Failed to bind to {}: {}", addr, e))?;

        tracing::info!("mnemograph HTTP server listening on http://{}", addr);

        axum::serve(listener, app).await.map_err(|e| {
            tracing::error!(error = %e, "HTTP server error");
            color_eyre::eyre::eyre!("HTTP server error: {}", e)
        })?;

        tracing::info!("HTTP server shutting down");
        Ok(())
    }
}
