//! Library configuration.
//!
//! Configuration is loaded from an optional YAML file with every field
//! defaulted, so a missing file yields a fully usable configuration.
//! Program names and paths configured here are threaded explicitly into
//! backend invocations; nothing here mutates the process environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::environment::Platform;
use crate::error::{Error, Result};

/// Default provisioner program for compose environments.
pub const DEFAULT_COMPOSE_PROGRAM: &str = "compose-provisioner";

/// Default provisioner program for cluster environments.
pub const DEFAULT_CLUSTER_PROGRAM: &str = "cluster-provisioner";

/// Library configuration, deserialized from YAML.
///
/// # Examples
///
/// ```
/// use yard::Config;
///
/// let config = Config::default().with_port_attempts(20);
/// assert_eq!(config.port_attempts, 20);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data directory override. Defaults to `~/.yard`.
    pub data_dir: Option<PathBuf>,
    /// Registry busy timeout in milliseconds.
    pub busy_timeout_ms: u64,
    /// Maximum attempts when searching for a free port.
    pub port_attempts: usize,
    /// Provisioner program for compose environments.
    pub compose_program: String,
    /// Provisioner program for cluster environments.
    pub cluster_program: String,
    /// Container runtime program used for liveness probes.
    pub docker_program: String,
    /// Cluster client program used for liveness probes.
    pub kubectl_program: String,
    /// External IP handed to the compose provisioner, if any.
    pub external_ip: Option<String>,
    /// Default configuration template for compose environments.
    pub compose_template: Option<PathBuf>,
    /// Default configuration template for cluster environments.
    pub cluster_template: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            busy_timeout_ms: 5000,
            port_attempts: 10,
            compose_program: DEFAULT_COMPOSE_PROGRAM.to_string(),
            cluster_program: DEFAULT_CLUSTER_PROGRAM.to_string(),
            docker_program: "docker".to_string(),
            kubectl_program: "kubectl".to_string(),
            external_ip: None,
            compose_template: None,
            cluster_template: None,
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Loads the default configuration file if one exists.
    ///
    /// Resolution order: `$YARD_CONFIG`, then `<data_dir>/config.yaml`.
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed, or
    /// if the home directory cannot be determined.
    pub fn load_default() -> Result<Self> {
        let path = match std::env::var_os("YARD_CONFIG") {
            Some(path) => PathBuf::from(path),
            None => default_data_dir()?.join("config.yaml"),
        };
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the busy timeout as a [`Duration`].
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Returns the default template path for a platform, if configured.
    #[must_use]
    pub fn template_path(&self, platform: Platform) -> Option<&Path> {
        match platform {
            Platform::Compose => self.compose_template.as_deref(),
            Platform::Cluster => self.cluster_template.as_deref(),
        }
    }

    /// Returns the provisioner program name for a platform.
    #[must_use]
    pub fn provisioner_program(&self, platform: Platform) -> &str {
        match platform {
            Platform::Compose => &self.compose_program,
            Platform::Cluster => &self.cluster_program,
        }
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Sets the port attempt budget.
    #[must_use]
    pub const fn with_port_attempts(mut self, attempts: usize) -> Self {
        self.port_attempts = attempts;
        self
    }

    /// Sets the compose provisioner program.
    #[must_use]
    pub fn with_compose_program(mut self, program: impl Into<String>) -> Self {
        self.compose_program = program.into();
        self
    }

    /// Sets the cluster provisioner program.
    #[must_use]
    pub fn with_cluster_program(mut self, program: impl Into<String>) -> Self {
        self.cluster_program = program.into();
        self
    }

    /// Sets the external IP passed to the compose provisioner.
    #[must_use]
    pub fn with_external_ip(mut self, ip: impl Into<String>) -> Self {
        self.external_ip = Some(ip.into());
        self
    }
}

/// Returns the default data directory, `~/.yard`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    let home = home::home_dir().ok_or_else(|| Error::Validation {
        field: "home_directory".into(),
        message: "cannot determine home directory".into(),
    })?;
    Ok(home.join(".yard"))
}

/// Resolves the registry database path.
///
/// Resolution order: `$YARD_DATA_DIR/yard.db`, then `~/.yard/yard.db`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined and
/// `YARD_DATA_DIR` is not set.
pub fn resolve_registry_path() -> Result<PathBuf> {
    if let Some(data_dir) = std::env::var_os("YARD_DATA_DIR") {
        Ok(PathBuf::from(data_dir).join("yard.db"))
    } else {
        Ok(default_data_dir()?.join("yard.db"))
    }
}
