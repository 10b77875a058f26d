//! Configuration resolved from the environment with optional CLI overlay.
//!
//! All environment reads happen behind the `from_env()` boundary so the rest
//! of the system takes an explicit [`Config`] value instead of touching
//! process-wide state. Resolution order (highest priority last):
//!
//! 1. Built-in defaults (every field has one)
//! 2. Environment variables (`DATABASE_TYPE`, `NEO4J_*`, `FALKORDB_*`,
//!    `SURREAL_*`, `MODEL_NAME`, `SEMAPHORE_LIMIT`, `TELEMETRY_ENABLED`,
//!    `TRANSPORT`)
//! 3. CLI arguments, overlaid field-by-field via [`Config::from_cli_and_env`]
//!
//! The backend selector defaults to Neo4j. The embedded backend requires no
//! environment at all: `SURREAL_DB` defaults to the `:memory:` sentinel.

use std::fmt;
use std::ops::Deref;

use clap::ValueEnum;
use figment::{providers::Env, Figment};
use serde::{Deserialize, Serialize};

/// In-memory sentinel for the embedded backend's database path.
pub const MEMORY_SENTINEL: &str = ":memory:";

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Graph database backend selector.
///
/// Unrecognized values fail during configuration parsing, never later in the
/// driver factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    /// Neo4j over bolt (server-based, the default).
    #[default]
    Neo4j,
    /// FalkorDB over the Redis protocol (server-based).
    Falkordb,
    /// SurrealDB embedded in-process (file-backed or in-memory).
    Surreal,
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Neo4j => "neo4j",
            Self::Falkordb => "falkordb",
            Self::Surreal => "surreal",
        };
        f.write_str(name)
    }
}

/// MCP transport selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// JSON-RPC over stdin/stdout (local clients).
    #[default]
    Stdio,
    /// Streamable HTTP (remote clients).
    Http,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stdio => "stdio",
            Self::Http => "http",
        };
        f.write_str(name)
    }
}

/// Neo4j connection settings.
///
/// Read from `NEO4J_URI`, `NEO4J_USER`, `NEO4J_PASSWORD`, `NEO4J_DATABASE`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Neo4jConfig {
    /// Bolt endpoint, e.g. `bolt://localhost:7687`.
    pub uri: String,
    pub user: String,
    pub password: Option<String>,
    pub database: String,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: None,
            database: "neo4j".to_string(),
        }
    }
}

impl Neo4jConfig {
    /// Reads `NEO4J_*` variables, falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Figment::new()
            .merge(Env::prefixed("NEO4J_"))
            .extract()
            .map_err(ConfigError::from)
    }
}

/// FalkorDB connection settings.
///
/// Read from `FALKORDB_URI`, `FALKORDB_PASSWORD`, `FALKORDB_DATABASE`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FalkorConfig {
    /// Redis endpoint, e.g. `redis://localhost:6379`.
    pub uri: String,
    pub password: Option<String>,
    /// Graph key name within the FalkorDB instance.
    pub database: String,
}

impl Default for FalkorConfig {
    fn default() -> Self {
        Self {
            uri: "redis://localhost:6379".to_string(),
            password: None,
            database: "default_db".to_string(),
        }
    }
}

impl FalkorConfig {
    /// Reads `FALKORDB_*` variables, falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Figment::new()
            .merge(Env::prefixed("FALKORDB_"))
            .extract()
            .map_err(ConfigError::from)
    }
}

/// Embedded SurrealDB settings.
///
/// Read from `SURREAL_DB`, `SURREAL_NAMESPACE`, `SURREAL_DATABASE`. The
/// default `db` value is the [`MEMORY_SENTINEL`], so this backend is fully
/// usable with zero environment variables set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SurrealConfig {
    /// Database path, or `:memory:` for a transient in-memory store.
    pub db: String,
    pub namespace: String,
    pub database: String,
}

impl Default for SurrealConfig {
    fn default() -> Self {
        Self {
            db: MEMORY_SENTINEL.to_string(),
            namespace: "mnemograph".to_string(),
            database: "memory".to_string(),
        }
    }
}

impl SurrealConfig {
    /// Reads `SURREAL_*` variables, falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Figment::new()
            .merge(Env::prefixed("SURREAL_"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// True when the store lives in memory rather than on disk.
    pub fn is_in_memory(&self) -> bool {
        self.db == MEMORY_SENTINEL
    }
}

/// Global scalar settings shared by all backends.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct Globals {
    database_type: DatabaseType,
    transport: Transport,
    model_name: String,
    semaphore_limit: usize,
    telemetry_enabled: bool,
}

impl Default for Globals {
    fn default() -> Self {
        Self {
            database_type: DatabaseType::default(),
            transport: Transport::default(),
            model_name: "gpt-4o-mini".to_string(),
            semaphore_limit: 10,
            telemetry_enabled: true,
        }
    }
}

/// CLI values that overlay environment-derived configuration.
///
/// Every field is optional; `None` means "not supplied on the command line"
/// and leaves the environment-derived value untouched.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub database_type: Option<DatabaseType>,
    pub transport: Option<Transport>,
    pub group_id: Option<String>,
    pub model_name: Option<String>,
    pub neo4j_uri: Option<String>,
    pub falkordb_uri: Option<String>,
    pub surreal_db: Option<String>,
}

/// Aggregate configuration: one config per known backend plus the selector
/// and global scalars.
///
/// Constructed once at process start; immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Which backend the driver factory will connect.
    pub database_type: DatabaseType,
    pub transport: Transport,
    pub neo4j: Neo4jConfig,
    pub falkordb: FalkorConfig,
    pub surreal: SurrealConfig,
    /// LLM model name handed to the (external) knowledge-graph engine.
    pub model_name: String,
    /// Upper bound on concurrent tool executions.
    pub semaphore_limit: usize,
    pub telemetry_enabled: bool,
    /// Namespace identifier partitioning graph data between deployments.
    pub group_id: String,
}

impl Config {
    /// Build the configuration from the environment alone.
    ///
    /// Constructs all three backend configs regardless of the selector; the
    /// factory later connects only the selected one. Fails only when the
    /// selector (or a scalar) holds an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let globals: Globals = Figment::new()
            .merge(
                Env::raw()
                    .only(&[
                        "DATABASE_TYPE",
                        "TRANSPORT",
                        "MODEL_NAME",
                        "SEMAPHORE_LIMIT",
                        "TELEMETRY_ENABLED",
                    ])
                    .map(|key| key.as_str().to_ascii_lowercase().into()),
            )
            .extract()
            .map_err(ConfigError::from)?;

        Ok(Self {
            database_type: globals.database_type,
            transport: globals.transport,
            neo4j: Neo4jConfig::from_env()?,
            falkordb: FalkorConfig::from_env()?,
            surreal: SurrealConfig::from_env()?,
            model_name: globals.model_name,
            semaphore_limit: globals.semaphore_limit,
            telemetry_enabled: globals.telemetry_enabled,
            group_id: "default".to_string(),
        })
    }

    /// Build from the environment, then overlay explicitly-supplied CLI
    /// values field-by-field.
    ///
    /// CLI wins on conflict; fields absent from the CLI keep their
    /// environment-derived values. An empty overlay is equivalent to
    /// [`Config::from_env`].
    pub fn from_cli_and_env(cli: &CliOverrides) -> Result<Self, ConfigError> {
        let mut config = Self::from_env()?;

        if let Some(database_type) = cli.database_type {
            config.database_type = database_type;
        }
        if let Some(transport) = cli.transport {
            config.transport = transport;
        }
        if let Some(ref group_id) = cli.group_id {
            config.group_id = group_id.clone();
        }
        if let Some(ref model_name) = cli.model_name {
            config.model_name = model_name.clone();
        }
        if let Some(ref uri) = cli.neo4j_uri {
            config.neo4j.uri = uri.clone();
        }
        if let Some(ref uri) = cli.falkordb_uri {
            config.falkordb.uri = uri.clone();
        }
        if let Some(ref db) = cli.surreal_db {
            config.surreal.db = db.clone();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_type_default_is_neo4j() {
        assert_eq!(DatabaseType::default(), DatabaseType::Neo4j);
    }

    #[test]
    fn database_type_display_roundtrip() {
        for (variant, name) in [
            (DatabaseType::Neo4j, "neo4j"),
            (DatabaseType::Falkordb, "falkordb"),
            (DatabaseType::Surreal, "surreal"),
        ] {
            assert_eq!(variant.to_string(), name);
            let parsed: DatabaseType =
                serde_json::from_value(serde_json::Value::String(name.to_string())).unwrap();
            assert_eq!(parsed, variant);
        }
    }

    #[test]
    fn database_type_rejects_unknown_value() {
        let result: Result<DatabaseType, _> =
            serde_json::from_value(serde_json::Value::String("dgraph".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn surreal_default_is_in_memory() {
        let config = SurrealConfig::default();
        assert_eq!(config.db, MEMORY_SENTINEL);
        assert!(config.is_in_memory());
    }

    #[test]
    fn neo4j_defaults() {
        let config = Neo4jConfig::default();
        assert_eq!(config.uri, "bolt://localhost:7687");
        assert_eq!(config.user, "neo4j");
        assert!(config.password.is_none());
        assert_eq!(config.database, "neo4j");
    }

    #[test]
    fn falkordb_defaults() {
        let config = FalkorConfig::default();
        assert_eq!(config.uri, "redis://localhost:6379");
        assert_eq!(config.database, "default_db");
    }
}
