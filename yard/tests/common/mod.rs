//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use yard::registry::{Registry, RegistryConfig};
use yard::{AccessPoints, Environment, EnvironmentId, Platform, Section};

/// Opens a fresh registry inside the given temp directory.
pub fn open_registry(dir: &TempDir) -> Registry {
    Registry::open(RegistryConfig::new(dir.path().join("yard.db"))).unwrap()
}

/// Builds a realistic environment with one configuration section.
///
/// Cluster environments are given the context `staging`.
pub fn sample_environment(name: &str, version: &str, platform: Platform) -> Environment {
    let mut section = Section::new("GATEWAY");
    section.variables.insert("API_HOST".into(), "localhost".into());
    section.variables.insert("API_PORT".into(), "8080".into());

    let context = platform.requires_context().then(|| "staging".to_string());

    Environment::new(
        EnvironmentId::new(name, version, platform).unwrap(),
        context,
        vec![section],
        AccessPoints {
            api_gateway: "http://localhost:8080/gateway/ui/".into(),
            data_portal: "http://localhost:8000".into(),
        },
    )
    .unwrap()
}

/// Writes an executable shell script standing in for a backend program.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
