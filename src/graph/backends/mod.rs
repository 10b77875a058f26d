//! Backend implementations for the supported graph databases.
//!
//! Each backend implements [`GraphBackend`](crate::graph::GraphBackend) and
//! is selected by the [`GraphDriver`](crate::graph::GraphDriver) enum tag:
//!
//! | Backend | Module | Kind |
//! |---------|--------|------|
//! | Neo4j | [`neo4j`] | server-based (default) |
//! | FalkorDB | [`falkordb`] | server-based |
//! | SurrealDB | [`surreal`] | embedded |
//!
//! # Implementing a Backend
//!
//! 1. Create a driver struct with an async `connect(&XConfig)` constructor
//! 2. Implement `GraphBackend` for it
//! 3. Add a variant to `GraphDriver` and a branch to `create_driver`

pub mod falkordb;
pub mod neo4j;
pub mod surreal;
