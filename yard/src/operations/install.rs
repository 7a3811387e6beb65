//! Install and update operations.

use crate::backend::{run_streamed, Backend, ProvisionOptions};
use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::progress::ProgressSink;
use crate::registry::Registry;

use super::envfile::TempEnvFile;
use super::Orchestrator;

impl Orchestrator {
    /// Provisions an environment and records it in the registry.
    ///
    /// The configuration sections are written to a private temp file,
    /// the platform's create command runs with its output streamed to
    /// the sink, and only after it succeeds is the environment (with
    /// the access points the backend published) upserted. A backend
    /// failure leaves the registry untouched; the temp file is removed
    /// on every exit path.
    ///
    /// With `is_edit` set the identity must already be registered.
    ///
    /// # Errors
    ///
    /// Returns `OperationInProgress` if another operation holds this
    /// identity, `NotFound` for an edit of an unregistered identity,
    /// `BackendCommandFailed` if provisioning fails, or a registry
    /// error if the final write fails.
    pub async fn install(
        &self,
        registry: &mut Registry,
        environment: Environment,
        options: ProvisionOptions,
        sink: &dyn ProgressSink,
    ) -> Result<Environment> {
        let _guard = self.locks.acquire(&environment.id)?;

        if options.is_edit
            && !Registry::is_installed(
                registry.connection(),
                &environment.id,
                environment.context.as_deref(),
            )?
        {
            return Err(Error::NotFound {
                resource: environment.id.to_string(),
            });
        }

        let program_dir =
            Registry::get_platform_path(registry.connection(), environment.id.platform)?;
        let backend =
            Backend::for_platform(environment.id.platform, &self.config, program_dir.as_deref());

        let env_file = TempEnvFile::new(&self.temp_root, "configurations", &environment.sections)?;

        let spec = match &backend {
            Backend::Compose(compose) => compose.create_command(
                env_file.path(),
                &environment.id.name,
                &environment.id.version,
                &options,
            ),
            Backend::Cluster(cluster) => {
                let context = environment.context.as_deref().ok_or_else(|| {
                    Error::Validation {
                        field: "context".into(),
                        message: format!("cluster environment {} requires a context", environment.id),
                    }
                })?;
                cluster.create_command(
                    env_file.path(),
                    context,
                    &environment.id.name,
                    &environment.id.version,
                    &options,
                )
            }
        };

        run_streamed(&spec, sink).await?;

        let mut stored = environment;
        stored.access_points = backend.access_points();
        registry.upsert_environment(&stored)?;

        log::debug!("installed {}", stored.id);
        Ok(stored)
    }

    /// Updates an already registered environment in place.
    ///
    /// Equivalent to an install with `is_edit` set: the identity must
    /// exist, and its record is replaced wholesale on success.
    ///
    /// # Errors
    ///
    /// Same as [`Orchestrator::install`].
    pub async fn update(
        &self,
        registry: &mut Registry,
        environment: Environment,
        skip_autoupdate: bool,
        sink: &dyn ProgressSink,
    ) -> Result<Environment> {
        self.install(
            registry,
            environment,
            ProvisionOptions {
                is_edit: true,
                skip_autoupdate,
            },
            sink,
        )
        .await
    }
}
