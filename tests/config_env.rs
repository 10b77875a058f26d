//! Environment and CLI-overlay tests for configuration construction.
//!
//! These tests mutate process environment variables, so they run serially.

use mnemograph::config::{CliOverrides, Config, DatabaseType, Transport, MEMORY_SENTINEL};
use serial_test::serial;

/// Every variable the configuration reads, cleared before each test.
const ALL_VARS: &[&str] = &[
    "DATABASE_TYPE",
    "TRANSPORT",
    "MODEL_NAME",
    "SEMAPHORE_LIMIT",
    "TELEMETRY_ENABLED",
    "NEO4J_URI",
    "NEO4J_USER",
    "NEO4J_PASSWORD",
    "NEO4J_DATABASE",
    "FALKORDB_URI",
    "FALKORDB_PASSWORD",
    "FALKORDB_DATABASE",
    "SURREAL_DB",
    "SURREAL_NAMESPACE",
    "SURREAL_DATABASE",
];

fn clear_env() {
    for var in ALL_VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn from_env_defaults_need_no_environment() {
    clear_env();

    let config = Config::from_env().expect("defaults should always parse");

    assert_eq!(config.database_type, DatabaseType::Neo4j);
    assert_eq!(config.transport, Transport::Stdio);
    assert_eq!(config.neo4j.uri, "bolt://localhost:7687");
    assert_eq!(config.neo4j.user, "neo4j");
    assert_eq!(config.falkordb.uri, "redis://localhost:6379");
    assert_eq!(config.surreal.db, MEMORY_SENTINEL);
    assert_eq!(config.model_name, "gpt-4o-mini");
    assert_eq!(config.semaphore_limit, 10);
    assert!(config.telemetry_enabled);
    assert_eq!(config.group_id, "default");
}

#[test]
#[serial]
fn from_env_honors_backend_variables() {
    clear_env();
    std::env::set_var("DATABASE_TYPE", "surreal");
    std::env::set_var("SURREAL_DB", "./data/memory.db");
    std::env::set_var("NEO4J_URI", "bolt://graph.internal:7687");
    std::env::set_var("NEO4J_PASSWORD", "hunter2");

    let config = Config::from_env().unwrap();

    assert_eq!(config.database_type, DatabaseType::Surreal);
    assert_eq!(config.surreal.db, "./data/memory.db");
    assert!(!config.surreal.is_in_memory());
    // Unselected backends are still fully constructed.
    assert_eq!(config.neo4j.uri, "bolt://graph.internal:7687");
    assert_eq!(config.neo4j.password.as_deref(), Some("hunter2"));
}

#[test]
#[serial]
fn from_env_honors_global_scalars() {
    clear_env();
    std::env::set_var("MODEL_NAME", "llama3.1");
    std::env::set_var("SEMAPHORE_LIMIT", "25");
    std::env::set_var("TELEMETRY_ENABLED", "false");
    std::env::set_var("TRANSPORT", "http");

    let config = Config::from_env().unwrap();

    assert_eq!(config.model_name, "llama3.1");
    assert_eq!(config.semaphore_limit, 25);
    assert!(!config.telemetry_enabled);
    assert_eq!(config.transport, Transport::Http);
}

#[test]
#[serial]
fn unrecognized_selector_fails_at_parse_time() {
    clear_env();
    std::env::set_var("DATABASE_TYPE", "dgraph");

    let result = Config::from_env();
    assert!(result.is_err(), "unknown selector must fail construction");
}

#[test]
#[serial]
fn empty_overlay_is_equivalent_to_from_env() {
    clear_env();
    std::env::set_var("DATABASE_TYPE", "falkordb");
    std::env::set_var("FALKORDB_URI", "redis://cache.internal:6379");
    std::env::set_var("MODEL_NAME", "gpt-4o");

    let from_env = Config::from_env().unwrap();
    let overlaid = Config::from_cli_and_env(&CliOverrides::default()).unwrap();

    assert_eq!(overlaid.database_type, from_env.database_type);
    assert_eq!(overlaid.transport, from_env.transport);
    assert_eq!(overlaid.neo4j.uri, from_env.neo4j.uri);
    assert_eq!(overlaid.falkordb.uri, from_env.falkordb.uri);
    assert_eq!(overlaid.surreal.db, from_env.surreal.db);
    assert_eq!(overlaid.model_name, from_env.model_name);
    assert_eq!(overlaid.group_id, from_env.group_id);
}

#[test]
#[serial]
fn cli_selector_wins_over_environment() {
    clear_env();
    std::env::set_var("DATABASE_TYPE", "neo4j");
    std::env::set_var("NEO4J_URI", "bolt://localhost:7687");
    std::env::set_var("SURREAL_DB", "./cli.db");

    let cli = CliOverrides {
        database_type: Some(DatabaseType::Surreal),
        group_id: Some("test-group".to_string()),
        ..CliOverrides::default()
    };
    let config = Config::from_cli_and_env(&cli).unwrap();

    assert_eq!(config.database_type, DatabaseType::Surreal);
    assert_eq!(config.surreal.db, "./cli.db");
    assert_eq!(config.group_id, "test-group");
}

#[test]
#[serial]
fn overlay_is_non_destructive_to_unrelated_fields() {
    clear_env();
    std::env::set_var("FALKORDB_URI", "redis://cache.internal:6379");
    std::env::set_var("MODEL_NAME", "gpt-4o");

    let cli = CliOverrides {
        neo4j_uri: Some("bolt://override:7687".to_string()),
        transport: Some(Transport::Http),
        ..CliOverrides::default()
    };
    let config = Config::from_cli_and_env(&cli).unwrap();

    assert_eq!(config.neo4j.uri, "bolt://override:7687");
    assert_eq!(config.transport, Transport::Http);
    // Environment-derived values elsewhere survive the overlay.
    assert_eq!(config.falkordb.uri, "redis://cache.internal:6379");
    assert_eq!(config.model_name, "gpt-4o");
    assert_eq!(config.database_type, DatabaseType::Neo4j);
}

#[test]
#[serial]
fn cli_without_selector_uses_environment_selector() {
    clear_env();
    std::env::set_var("DATABASE_TYPE", "surreal");

    let cli = CliOverrides {
        model_name: Some("gpt-4o-mini".to_string()),
        ..CliOverrides::default()
    };
    let config = Config::from_cli_and_env(&cli).unwrap();

    assert_eq!(config.database_type, DatabaseType::Surreal);
    assert_eq!(config.group_id, "default");
}
