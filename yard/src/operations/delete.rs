//! Environment teardown.

use crate::backend::{run_capture, Backend};
use crate::environment::Platform;
use crate::error::{Error, Result};
use crate::registry::Registry;

use super::envfile::TempEnvFile;
use super::Orchestrator;

impl Orchestrator {
    /// Tears an environment down and removes it from the registry.
    ///
    /// For compose the configuration file is regenerated from the
    /// stored sections so the teardown sees the same variables the
    /// deployment was created with. Cluster teardown is addressed by
    /// context and namespace alone. The registry row is deleted only
    /// after the backend reports success, so a failed teardown leaves
    /// the record in place for a retry.
    ///
    /// # Errors
    ///
    /// Returns `OperationInProgress` if another operation holds this
    /// identity, `NotFound` if the environment is not registered, or
    /// `BackendCommandFailed` if teardown fails.
    pub fn delete(
        &self,
        registry: &mut Registry,
        name: &str,
        version: &str,
        platform: Platform,
    ) -> Result<()> {
        let environment = Registry::get_environment(registry.connection(), name, version, platform)?
            .ok_or_else(|| Error::NotFound {
                resource: format!("{name}@{version} ({platform})"),
            })?;
        let _guard = self.locks.acquire(&environment.id)?;

        let program_dir = Registry::get_platform_path(registry.connection(), platform)?;
        let backend = Backend::for_platform(platform, &self.config, program_dir.as_deref());

        match &backend {
            Backend::Compose(compose) => {
                let env_file =
                    TempEnvFile::new(&self.temp_root, "configurations", &environment.sections)?;
                run_capture(&compose.teardown_command(env_file.path(), name, version))?;
            }
            Backend::Cluster(cluster) => {
                let context = environment.context.as_deref().ok_or_else(|| {
                    Error::Validation {
                        field: "context".into(),
                        message: format!("cluster environment {} has no context", environment.id),
                    }
                })?;
                run_capture(&cluster.teardown_command(context, name))?;
            }
        }

        registry.delete_environment(name, version, platform)?;
        log::debug!("deleted {}", environment.id);
        Ok(())
    }
}
