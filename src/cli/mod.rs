//! CLI module for mnemograph.
//!
//! Subcommands:
//! - `serve`: Run the MCP server (stdio or HTTP transport)
//! - `healthcheck`: Restart and probe the container deployment stack

mod healthcheck;
mod serve;

use clap::{Parser, Subcommand};

pub use serve::ServeArgs;

/// mnemograph - Knowledge Graph Memory
#[derive(Parser)]
#[command(name = "mnemograph")]
#[command(about = "Knowledge graph memory - MCP server with selectable graph backends")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the MCP server
    Serve(ServeArgs),

    /// Restart the container stack and health-check its services
    Healthcheck,
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Serve(ref args) => self.run_serve(args).await,
            Command::Healthcheck => self.run_healthcheck().await,
        }
    }
}
