//! Utility functions for CLI operations.
//!
//! This module provides common utilities used across CLI commands:
//! configuration loading, registry access, the async runtime for
//! provisioning commands, and the stdout progress sink.

use crate::error::CliError;
use std::path::{Path, PathBuf};
use yard::registry::{Registry, RegistryConfig};
use yard::{Config, Platform, ProgressSink, Section};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default registry busy timeout (in seconds).
    pub busy_timeout: Option<u32>,
}

/// Load configuration, applying global overrides.
///
/// Configuration comes from `$YARD_CONFIG` or `<data_dir>/config.yaml`
/// when present, otherwise built-in defaults.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut config = Config::load_default().map_err(|e| CliError::Config(e.to_string()))?;
    if let Some(ref data_dir) = global.data_dir {
        config = config.with_data_dir(data_dir);
    }
    Ok(config)
}

/// Resolve the registry database path from global options.
fn resolve_registry_path(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    // Priority: global option > YARD_DATA_DIR > ~/.yard
    if let Some(ref data_dir) = global.data_dir {
        return Ok(data_dir.join("yard.db"));
    }
    yard::config::resolve_registry_path().map_err(CliError::from)
}

/// Open the registry with configuration.
pub fn open_registry(global: &GlobalOptions, config: &Config) -> Result<Registry, CliError> {
    let path = resolve_registry_path(global)?;

    let mut registry_config = RegistryConfig::new(path);
    registry_config = if let Some(timeout_seconds) = global.busy_timeout {
        registry_config
            .with_busy_timeout(std::time::Duration::from_secs(timeout_seconds.into()))
    } else {
        registry_config.with_busy_timeout(config.busy_timeout())
    };

    Registry::open(registry_config).map_err(CliError::from)
}

/// Build the async runtime used for provisioning commands.
pub fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new().map_err(CliError::from)
}

/// A progress sink that prints backend output lines to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl ProgressSink for StdoutSink {
    fn emit(&self, _event: &str, line: &str) {
        println!("{line}");
    }
}

/// Read configuration sections from an explicit template file or the
/// platform's configured default template.
pub fn read_sections(
    template: Option<&Path>,
    config: &Config,
    platform: Platform,
) -> Result<Vec<Section>, CliError> {
    let path = match template {
        Some(path) => path.to_path_buf(),
        None => config
            .template_path(platform)
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                CliError::InvalidArguments(format!(
                    "no template file given and no default template configured for {platform}"
                ))
            })?,
    };
    yard::read_template_file(&path).map_err(CliError::from)
}
