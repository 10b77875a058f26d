//! FalkorDB backend over the Redis protocol.
//!
//! FalkorDB exposes its graph commands (`GRAPH.QUERY`, `GRAPH.DELETE`) on a
//! Redis server, so the driver is a thin layer over a multiplexed redis
//! connection.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, IntoConnectionInfo};

use crate::config::{DatabaseType, FalkorConfig};
use crate::error::AppError;
use crate::graph::traits::GraphBackend;

/// Connected FalkorDB driver.
///
/// The connection manager reconnects transparently; cheap to clone.
#[derive(Clone)]
pub struct FalkorDriver {
    conn: ConnectionManager,
    graph_name: String,
}

impl FalkorDriver {
    /// Opens a multiplexed connection against the configured Redis endpoint.
    ///
    /// A password from the configuration takes precedence over one embedded
    /// in the URI.
    pub async fn connect(config: &FalkorConfig) -> Result<Self, AppError> {
        tracing::info!(uri = %config.uri, graph = %config.database, "Connecting to FalkorDB");

        let mut info = config.uri.as_str().into_connection_info()?;
        if let Some(ref password) = config.password {
            info.redis.password = Some(password.clone());
        }

        let client = redis::Client::open(info)?;
        let conn = client.get_connection_manager().await?;

        Ok(Self {
            conn,
            graph_name: config.database.clone(),
        })
    }

    /// The graph key this driver operates on.
    pub fn graph_name(&self) -> &str {
        &self.graph_name
    }

    /// Runs a Cypher statement against the configured graph key.
    ///
    /// FalkorDB creates the graph on first use, so this works on a fresh
    /// instance without any provisioning step.
    async fn run_cypher(&self, cypher: &str) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        redis::cmd("GRAPH.QUERY")
            .arg(self.graph_name.as_str())
            .arg(cypher)
            .query_async::<redis::Value>(&mut conn)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl GraphBackend for FalkorDriver {
    fn provider(&self) -> DatabaseType {
        DatabaseType::Falkordb
    }

    async fn health_check(&self) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await?;
        self.run_cypher("RETURN 1").await
    }

    async fn clear(&self) -> Result<(), AppError> {
        tracing::warn!(graph = %self.graph_name, "Clearing all FalkorDB graph data");
        self.run_cypher("MATCH (n) DETACH DELETE n").await
    }
}

#[cfg(all(test, feature = "integration"))]
mod integration_tests {
    //! Requires a running FalkorDB instance at the default endpoint.

    use super::*;
    use crate::config::FalkorConfig;

    #[tokio::test]
    async fn connect_and_probe() {
        let config = FalkorConfig::default();
        let driver = FalkorDriver::connect(&config).await.expect("connect failed");
        driver.health_check().await.expect("health check failed");
    }
}
