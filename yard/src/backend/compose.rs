//! Compose backend command contract.

use std::env;
use std::path::{Path, PathBuf};

use crate::environment::AccessPoints;

use super::command::CommandSpec;
use super::ProvisionOptions;

/// Builder for compose provisioner command lines.
#[derive(Debug, Clone)]
pub struct ComposeBackend {
    program: PathBuf,
    external_ip: Option<String>,
}

impl ComposeBackend {
    /// Creates a backend for the given provisioner program.
    #[must_use]
    pub fn new(program: PathBuf, external_ip: Option<String>) -> Self {
        Self {
            program,
            external_ip,
        }
    }

    /// Command that brings an environment up.
    #[must_use]
    pub fn create_command(
        &self,
        env_file: &Path,
        name: &str,
        version: &str,
        options: &ProvisionOptions,
    ) -> CommandSpec {
        let mut spec = CommandSpec::new(&self.program)
            .arg("create")
            .flag("--env-file", env_file.to_string_lossy())
            .flag("--name", name)
            .flag("--version", version);
        if let Some(ip) = &self.external_ip {
            spec = spec.flag("--external-ip", ip);
        }
        if options.is_edit {
            spec = spec.arg("--update");
        }
        if options.skip_autoupdate {
            spec = spec.arg("--skip-autoupdate");
        }
        spec
    }

    /// Command that tears an environment down.
    #[must_use]
    pub fn teardown_command(&self, env_file: &Path, name: &str, version: &str) -> CommandSpec {
        CommandSpec::new(&self.program)
            .arg("delete")
            .flag("--env-file", env_file.to_string_lossy())
            .flag("--name", name)
            .flag("--version", version)
    }

    /// Command that seeds an environment with data from a directory.
    #[must_use]
    pub fn populate_command(
        &self,
        env_file: &Path,
        data_path: &Path,
        name: &str,
        version: &str,
    ) -> CommandSpec {
        CommandSpec::new(&self.program)
            .arg("populate")
            .flag("--env-file", env_file.to_string_lossy())
            .flag("--path", data_path.to_string_lossy())
            .flag("--name", name)
            .flag("--version", version)
    }

    /// Entry point URLs published by a successful compose provisioning
    /// run, read from the process environment per the backend contract.
    #[must_use]
    pub fn access_points(&self) -> AccessPoints {
        let host = env::var("API_HOST_ENV").unwrap_or_default();
        AccessPoints {
            data_portal: format!(
                "http://{host}:{}",
                env::var("DATA_PORTAL_PORT").unwrap_or_default()
            ),
            api_gateway: format!(
                "http://{host}:{}{}{}/ui/",
                env::var("API_PORT").unwrap_or_default(),
                env::var("DEPLOY_PATH").unwrap_or_default(),
                env::var("API_PATH").unwrap_or_default()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> ComposeBackend {
        ComposeBackend::new(PathBuf::from("compose-provisioner"), None)
    }

    #[test]
    fn test_create_command_minimal() {
        let options = ProvisionOptions::default();
        let spec = backend().create_command(Path::new("/tmp/env.env"), "atlas", "1.2", &options);
        assert_eq!(
            spec.to_string(),
            "compose-provisioner create --env-file /tmp/env.env --name atlas --version 1.2"
        );
    }

    #[test]
    fn test_create_command_with_flags() {
        let backend =
            ComposeBackend::new(PathBuf::from("compose-provisioner"), Some("10.0.0.5".into()));
        let options = ProvisionOptions {
            is_edit: true,
            skip_autoupdate: true,
        };
        let spec = backend.create_command(Path::new("/tmp/env.env"), "atlas", "1.2", &options);
        assert!(spec.args.contains(&"--external-ip".to_string()));
        assert!(spec.args.contains(&"10.0.0.5".to_string()));
        assert!(spec.args.contains(&"--update".to_string()));
        assert!(spec.args.contains(&"--skip-autoupdate".to_string()));
    }

    #[test]
    fn test_teardown_command() {
        let spec = backend().teardown_command(Path::new("/tmp/env.env"), "atlas", "1.2");
        assert_eq!(spec.args[0], "delete");
        assert!(spec.args.contains(&"--env-file".to_string()));
    }

    #[test]
    fn test_populate_command() {
        let spec = backend().populate_command(
            Path::new("/tmp/env.env"),
            Path::new("/data/seed"),
            "atlas",
            "1.2",
        );
        assert_eq!(spec.args[0], "populate");
        assert!(spec.args.contains(&"/data/seed".to_string()));
    }
}
