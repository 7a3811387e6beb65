//! Cluster backend command contract.

use std::env;
use std::path::{Path, PathBuf};

use crate::environment::AccessPoints;

use super::command::CommandSpec;
use super::ProvisionOptions;

/// Builder for cluster provisioner command lines.
///
/// Cluster deployments are addressed through a context; the environment
/// name doubles as the namespace.
#[derive(Debug, Clone)]
pub struct ClusterBackend {
    program: PathBuf,
}

impl ClusterBackend {
    /// Creates a backend for the given provisioner program.
    #[must_use]
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }

    /// Command that brings an environment up.
    #[must_use]
    pub fn create_command(
        &self,
        env_file: &Path,
        context: &str,
        name: &str,
        version: &str,
        options: &ProvisionOptions,
    ) -> CommandSpec {
        let mut spec = CommandSpec::new(&self.program)
            .arg("create")
            .flag("--env-file", env_file.to_string_lossy())
            .flag("--context", context)
            .flag("--namespace", name)
            .flag("--version", version);
        if options.is_edit {
            spec = spec.arg("--update");
        }
        if options.skip_autoupdate {
            spec = spec.arg("--skip-autoupdate");
        }
        spec
    }

    /// Command that tears an environment down.
    ///
    /// Teardown needs only the context and namespace; no configuration
    /// file is regenerated for it.
    #[must_use]
    pub fn teardown_command(&self, context: &str, name: &str) -> CommandSpec {
        CommandSpec::new(&self.program)
            .arg("delete")
            .flag("--context", context)
            .flag("--namespace", name)
    }

    /// Command that seeds an environment with data from a directory.
    #[must_use]
    pub fn populate_command(
        &self,
        env_file: &Path,
        context: &str,
        data_path: &Path,
        name: &str,
        version: &str,
    ) -> CommandSpec {
        CommandSpec::new(&self.program)
            .arg("populate")
            .flag("--context", context)
            .flag("--env-file", env_file.to_string_lossy())
            .flag("--path", data_path.to_string_lossy())
            .flag("--namespace", name)
            .flag("--version", version)
    }

    /// Entry point URLs published by a successful cluster provisioning
    /// run, read from the process environment per the backend contract.
    #[must_use]
    pub fn access_points(&self) -> AccessPoints {
        AccessPoints {
            data_portal: env::var("PORTAL_URL_READY").unwrap_or_default(),
            api_gateway: env::var("API_URL_READY").unwrap_or_default(),
        }
    }
}
