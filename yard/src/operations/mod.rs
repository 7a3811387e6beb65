//! Deployment orchestration.
//!
//! The orchestrator sequences every provisioning operation: materialize
//! the configuration as a private temp file, invoke the platform
//! backend, and commit the result to the registry only after the
//! backend has succeeded. Overlapping operations on the same
//! environment identity are rejected.

mod delete;
mod envfile;
mod install;
mod locks;
mod populate;

use std::path::PathBuf;

use crate::config::Config;

pub use envfile::TempEnvFile;
pub use locks::{IdentityGuard, IdentityLocks};

/// Drives install, update, delete, and populate operations.
///
/// # Examples
///
/// ```
/// use yard::{Config, Orchestrator};
///
/// let orchestrator = Orchestrator::new(Config::default());
/// ```
#[derive(Debug)]
pub struct Orchestrator {
    pub(crate) config: Config,
    pub(crate) temp_root: PathBuf,
    pub(crate) locks: IdentityLocks,
}

impl Orchestrator {
    /// Creates an orchestrator with the given configuration.
    ///
    /// Temporary configuration files are materialized under a
    /// yard-specific directory inside the system temp directory.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            temp_root: std::env::temp_dir().join("yard"),
            locks: IdentityLocks::new(),
        }
    }

    /// Overrides where temporary configuration files are written.
    #[must_use]
    pub fn with_temp_root(mut self, temp_root: impl Into<PathBuf>) -> Self {
        self.temp_root = temp_root.into();
        self
    }
}
