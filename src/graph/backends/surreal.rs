//! Embedded SurrealDB backend.
//!
//! Runs in-process: either a transient in-memory store (the `:memory:`
//! sentinel) or a file-backed surrealkv store. No external server, no
//! required configuration.

use async_trait::async_trait;
use surrealdb::engine::any::{self, Any};
use surrealdb::Surreal;

use crate::config::{DatabaseType, SurrealConfig};
use crate::error::AppError;
use crate::graph::traits::GraphBackend;

/// Connected embedded SurrealDB driver.
#[derive(Clone)]
pub struct SurrealDriver {
    db: Surreal<Any>,
    database: String,
}

impl SurrealDriver {
    /// Opens (or creates) the embedded store described by the configuration.
    ///
    /// `:memory:` maps to the `mem://` engine; any other value is treated as
    /// a surrealkv directory path and created on first use.
    pub async fn connect(config: &SurrealConfig) -> Result<Self, AppError> {
        let endpoint = if config.is_in_memory() {
            "mem://".to_string()
        } else {
            format!("surrealkv://{}", config.db)
        };

        tracing::info!(
            endpoint = %endpoint,
            namespace = %config.namespace,
            database = %config.database,
            "Opening embedded SurrealDB store"
        );

        let db = any::connect(endpoint).await?;
        db.use_ns(config.namespace.as_str())
            .use_db(config.database.as_str())
            .await?;

        Ok(Self {
            db,
            database: config.database.clone(),
        })
    }

    /// The SurrealDB database name this driver targets.
    pub fn database(&self) -> &str {
        &self.database
    }
}

#[async_trait]
impl GraphBackend for SurrealDriver {
    fn provider(&self) -> DatabaseType {
        DatabaseType::Surreal
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.db.health().await?;
        self.db.query("RETURN 1").await?.check()?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        tracing::warn!(database = %self.database, "Clearing all embedded graph data");
        self.db
            .query(format!("REMOVE DATABASE IF EXISTS `{}`", self.database))
            .await?
            .check()?;
        // The database is recreated lazily on next use.
        self.db.use_db(self.database.as_str()).await?;
        Ok(())
    }
}
