//! Graph abstraction layer: one capability trait, three backends, one factory.
//!
//! The server never talks to a concrete database type directly. It holds a
//! [`GraphDriver`] - a tagged union over the connected backend drivers -
//! produced by [`create_driver`] from the aggregate configuration. Dispatch
//! is purely on the configured [`DatabaseType`]; the two unselected backends
//! are never instantiated and never contacted.

mod traits;

pub mod backends;

pub use traits::GraphBackend;

use crate::config::{Config, DatabaseType};
use crate::error::AppError;

use backends::falkordb::FalkorDriver;
use backends::neo4j::Neo4jDriver;
use backends::surreal::SurrealDriver;

/// A connected driver for exactly one backend.
///
/// Created once at startup and shared read-only for the process lifetime.
pub enum GraphDriver {
    Neo4j(Neo4jDriver),
    Falkordb(FalkorDriver),
    Surreal(SurrealDriver),
}

impl std::fmt::Debug for GraphDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GraphDriver({:?})", self.provider())
    }
}

impl GraphDriver {
    /// Which backend variant this driver talks to.
    pub fn provider(&self) -> DatabaseType {
        match self {
            Self::Neo4j(driver) => driver.provider(),
            Self::Falkordb(driver) => driver.provider(),
            Self::Surreal(driver) => driver.provider(),
        }
    }

    /// One lightweight round-trip against the connected store.
    pub async fn health_check(&self) -> Result<(), AppError> {
        match self {
            Self::Neo4j(driver) => driver.health_check().await,
            Self::Falkordb(driver) => driver.health_check().await,
            Self::Surreal(driver) => driver.health_check().await,
        }
    }

    /// Wipes all graph data in the connected store.
    pub async fn clear(&self) -> Result<(), AppError> {
        match self {
            Self::Neo4j(driver) => driver.clear().await,
            Self::Falkordb(driver) => driver.clear().await,
            Self::Surreal(driver) => driver.clear().await,
        }
    }
}

/// Connects the backend named by `config.database_type` and returns its
/// driver.
///
/// Server-based backends fail with
/// [`AppError::InvalidBackendConfig`] when their endpoint is empty; the
/// embedded backend's default configuration is always valid. Adding a fourth
/// backend means one new enum variant and one new branch here - nothing else
/// changes.
pub async fn create_driver(config: &Config) -> Result<GraphDriver, AppError> {
    match config.database_type {
        DatabaseType::Neo4j => {
            require_endpoint(DatabaseType::Neo4j, &config.neo4j.uri)?;
            Ok(GraphDriver::Neo4j(Neo4jDriver::connect(&config.neo4j).await?))
        }
        DatabaseType::Falkordb => {
            require_endpoint(DatabaseType::Falkordb, &config.falkordb.uri)?;
            Ok(GraphDriver::Falkordb(
                FalkorDriver::connect(&config.falkordb).await?,
            ))
        }
        DatabaseType::Surreal => Ok(GraphDriver::Surreal(
            SurrealDriver::connect(&config.surreal).await?,
        )),
    }
}

/// Server-based backends need at least a reachable endpoint.
fn require_endpoint(backend: DatabaseType, uri: &str) -> Result<(), AppError> {
    if uri.trim().is_empty() {
        return Err(AppError::InvalidBackendConfig {
            backend,
            reason: "connection URI is empty".to_string(),
        });
    }
    Ok(())
}
