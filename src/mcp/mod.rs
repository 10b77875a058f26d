//! MCP protocol layer.

pub mod server;
pub mod tools;

pub use server::McpServer;
