//! Neo4j backend over the bolt protocol.

use async_trait::async_trait;
use neo4rs::{query, ConfigBuilder, Graph};

use crate::config::{DatabaseType, Neo4jConfig};
use crate::error::AppError;
use crate::graph::traits::GraphBackend;

/// Connected Neo4j driver.
///
/// Wraps the `neo4rs` connection pool; cheap to clone.
#[derive(Clone)]
pub struct Neo4jDriver {
    graph: Graph,
    database: String,
}

impl Neo4jDriver {
    /// Opens a bolt connection pool against the configured endpoint.
    ///
    /// An unset password is sent as the empty string, which Neo4j rejects
    /// unless auth is disabled server-side.
    pub async fn connect(config: &Neo4jConfig) -> Result<Self, AppError> {
        tracing::info!(
            uri = %config.uri,
            user = %config.user,
            database = %config.database,
            "Connecting to Neo4j"
        );

        let graph_config = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(config.password.as_deref().unwrap_or(""))
            .db(config.database.as_str())
            .build()?;
        let graph = Graph::connect(graph_config).await?;

        Ok(Self {
            graph,
            database: config.database.clone(),
        })
    }

    /// The Neo4j database name this driver targets.
    pub fn database(&self) -> &str {
        &self.database
    }
}

#[async_trait]
impl GraphBackend for Neo4jDriver {
    fn provider(&self) -> DatabaseType {
        DatabaseType::Neo4j
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.graph.run(query("RETURN 1")).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        tracing::warn!(database = %self.database, "Clearing all Neo4j graph data");
        self.graph.run(query("MATCH (n) DETACH DELETE n")).await?;
        Ok(())
    }
}
