//! mnemograph - Knowledge Graph Memory MCP Server
//!
//! A configuration and driver-selection shell around a knowledge-graph
//! memory engine: pick one of three graph database backends at startup,
//! verify it is alive, and expose it over MCP. Ships a stack doctor for the
//! container deployment.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod graph;
pub mod healthcheck;
pub mod mcp;
