//! Application context: configuration, connected driver, and status surface.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;

use crate::config::{Config, DatabaseType};
use crate::error::AppError;
use crate::graph::{self, GraphDriver};

/// Snapshot of the running server reported by the status surface.
#[derive(Debug, Clone, Serialize)]
pub struct DriverStatus {
    /// Active backend variant.
    pub database_type: DatabaseType,
    /// Result of a fresh liveness round-trip.
    pub healthy: bool,
    pub group_id: String,
    pub model_name: String,
    pub telemetry_enabled: bool,
}

/// Root application context shared by all tool handlers.
///
/// Built once by [`Context::initialize`] strictly before any request handling
/// begins; read-shared afterwards.
#[derive(Clone, Debug)]
pub struct Context {
    pub driver: Arc<GraphDriver>,
    pub config: Arc<Config>,
    /// Bounds concurrent tool executions to `config.semaphore_limit`.
    pub semaphore: Arc<Semaphore>,
}

impl Context {
    /// Initialization routine: connect the selected backend, verify liveness,
    /// and expose the handle.
    ///
    /// Any failure here is fatal - the process must not start accepting
    /// requests against a dead or misconfigured backend.
    pub async fn initialize(config: Config) -> Result<Self, AppError> {
        let driver = graph::create_driver(&config).await?;

        driver
            .health_check()
            .await
            .map_err(|e| AppError::Liveness {
                backend: driver.provider(),
                message: e.to_string(),
            })?;

        tracing::info!(
            backend = %driver.provider(),
            group_id = %config.group_id,
            "Graph driver connected and live"
        );

        let semaphore = Arc::new(Semaphore::new(config.semaphore_limit));

        Ok(Self {
            driver: Arc::new(driver),
            config: Arc::new(config),
            semaphore,
        })
    }

    /// Current status, including a fresh liveness probe.
    pub async fn status(&self) -> DriverStatus {
        let healthy = match self.driver.health_check().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(backend = %self.driver.provider(), error = %e, "Liveness probe failed");
                false
            }
        };

        DriverStatus {
            database_type: self.driver.provider(),
            healthy,
            group_id: self.config.group_id.clone(),
            model_name: self.config.model_name.clone(),
            telemetry_enabled: self.config.telemetry_enabled,
        }
    }
}
