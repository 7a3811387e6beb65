//! Integration tests for registry persistence.

mod common;

use common::{open_registry, sample_environment};
use tempfile::tempdir;
use yard::registry::{migrations, Registry, RegistryConfig};
use yard::Platform;

#[test]
fn test_environments_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("yard.db");

    {
        let mut registry = Registry::open(RegistryConfig::new(&path)).unwrap();
        registry
            .upsert_environment(&sample_environment("atlas", "1.2.0", Platform::Compose))
            .unwrap();
        registry
            .upsert_environment(&sample_environment("borealis", "2.0", Platform::Cluster))
            .unwrap();
    }

    let registry = Registry::open(RegistryConfig::new(&path)).unwrap();
    let all = Registry::list_environments(registry.connection()).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id.name, "atlas");
    assert_eq!(all[1].id.name, "borealis");
    assert_eq!(all[1].context.as_deref(), Some("staging"));
}

#[test]
fn test_schema_version_recorded_on_create() {
    let dir = tempdir().unwrap();
    let registry = open_registry(&dir);

    let version = migrations::get_schema_version(registry.connection()).unwrap();
    assert_eq!(version, yard::registry::schema::CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_newer_schema_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("yard.db");

    {
        let registry = Registry::open(RegistryConfig::new(&path)).unwrap();
        registry
            .connection()
            .execute(
                "UPDATE metadata SET value = '999' WHERE key = 'schema_version'",
                [],
            )
            .unwrap();
    }

    let err = Registry::open(RegistryConfig::new(&path)).unwrap_err();
    assert!(err.to_string().contains("newer than client"));
}

#[test]
fn test_two_handles_share_one_database() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("yard.db");

    let mut writer = Registry::open(RegistryConfig::new(&path)).unwrap();
    let reader = Registry::open(RegistryConfig::new(&path)).unwrap();

    writer
        .upsert_environment(&sample_environment("atlas", "1.2.0", Platform::Compose))
        .unwrap();

    let seen =
        Registry::get_environment(reader.connection(), "atlas", "1.2.0", Platform::Compose)
            .unwrap();
    assert!(seen.is_some());
}

#[test]
fn test_stored_variables_round_trip_exactly() {
    let dir = tempdir().unwrap();
    let mut registry = open_registry(&dir);

    let mut env = sample_environment("atlas", "1.2.0", Platform::Compose);
    env.sections[0]
        .variables
        .insert("EMPTY_VALUE".into(), String::new());
    registry.upsert_environment(&env).unwrap();

    let fetched =
        Registry::get_environment(registry.connection(), "atlas", "1.2.0", Platform::Compose)
            .unwrap()
            .unwrap();
    assert_eq!(fetched.sections, env.sections);
}
