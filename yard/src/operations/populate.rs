//! Seeding a deployed environment with data.

use std::path::Path;

use crate::backend::{run_streamed, Backend};
use crate::environment::Platform;
use crate::error::{Error, Result};
use crate::progress::ProgressSink;
use crate::registry::Registry;

use super::envfile::TempEnvFile;
use super::Orchestrator;

impl Orchestrator {
    /// Loads data from a directory into a deployed environment.
    ///
    /// The configuration file is regenerated from the stored sections
    /// and the backend's populate command runs with its output streamed
    /// to the sink. The registry is not modified.
    ///
    /// # Errors
    ///
    /// Returns `OperationInProgress` if another operation holds this
    /// identity, `NotFound` if the environment is not registered, or
    /// `BackendCommandFailed` if the backend fails.
    pub async fn populate(
        &self,
        registry: &mut Registry,
        name: &str,
        version: &str,
        platform: Platform,
        data_path: &Path,
        sink: &dyn ProgressSink,
    ) -> Result<()> {
        let environment = Registry::get_environment(registry.connection(), name, version, platform)?
            .ok_or_else(|| Error::NotFound {
                resource: format!("{name}@{version} ({platform})"),
            })?;
        let _guard = self.locks.acquire(&environment.id)?;

        let program_dir = Registry::get_platform_path(registry.connection(), platform)?;
        let backend = Backend::for_platform(platform, &self.config, program_dir.as_deref());

        let env_file =
            TempEnvFile::new(&self.temp_root, "configurations", &environment.sections)?;

        let spec = match &backend {
            Backend::Compose(compose) => {
                compose.populate_command(env_file.path(), data_path, name, version)
            }
            Backend::Cluster(cluster) => {
                let context = environment.context.as_deref().ok_or_else(|| {
                    Error::Validation {
                        field: "context".into(),
                        message: format!("cluster environment {} has no context", environment.id),
                    }
                })?;
                cluster.populate_command(env_file.path(), context, data_path, name, version)
            }
        };

        run_streamed(&spec, sink).await?;
        log::debug!("populated {}", environment.id);
        Ok(())
    }
}
