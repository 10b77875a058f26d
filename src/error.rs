//! Application error types with MCP protocol conversion.

use rmcp::model::ErrorCode;
use thiserror::Error;

use crate::config::DatabaseType;

/// Application-level errors for mnemograph.
#[derive(Error, Debug)]
pub enum AppError {
    // Configuration errors - fatal at startup
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Invalid {backend} configuration: {reason}")]
    InvalidBackendConfig {
        backend: DatabaseType,
        reason: String,
    },

    // Backend driver errors
    #[error("Neo4j error: {0}")]
    Neo4j(#[from] neo4rs::Error),

    #[error("FalkorDB error: {0}")]
    Falkordb(#[from] redis::RedisError),

    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    // Connectivity errors - the one-shot liveness probe at startup
    #[error("Liveness check failed for {backend}: {message}")]
    Liveness {
        backend: DatabaseType,
        message: String,
    },

    // Healthcheck artifact I/O
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<AppError> for rmcp::model::ErrorData {
    fn from(err: AppError) -> Self {
        let (code, app_code) = match &err {
            AppError::Config(_) => (ErrorCode::INTERNAL_ERROR, "CONFIG_ERROR"),
            AppError::InvalidBackendConfig { .. } => (ErrorCode::INTERNAL_ERROR, "CONFIG_ERROR"),
            AppError::Neo4j(_) => (ErrorCode::INTERNAL_ERROR, "BACKEND_ERROR"),
            AppError::Falkordb(_) => (ErrorCode::INTERNAL_ERROR, "BACKEND_ERROR"),
            AppError::Surreal(_) => (ErrorCode::INTERNAL_ERROR, "BACKEND_ERROR"),
            AppError::Liveness { .. } => (ErrorCode::INTERNAL_ERROR, "CONNECTION_ERROR"),
            AppError::Io(_) => (ErrorCode::INTERNAL_ERROR, "IO_ERROR"),
        };

        rmcp::model::ErrorData::new(code, format!("[{}] {}", app_code, err), None)
    }
}
