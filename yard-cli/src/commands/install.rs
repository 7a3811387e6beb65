//! Install command implementation.
//!
//! This module implements the `install` command, which provisions a new
//! environment through its platform backend and records it in the
//! registry, streaming the backend's output to stdout. The shared
//! provisioning path is reused by the `update` command.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_registry, read_sections, runtime, GlobalOptions, StdoutSink,
};
use clap::Args;
use std::path::PathBuf;
use yard::{
    AccessPoints, Environment, EnvironmentId, Orchestrator, Platform, ProvisionOptions, Section,
};

/// Provision an environment and register it.
#[derive(Args)]
pub struct InstallCommand {
    /// Environment name
    pub name: String,

    /// Environment version
    pub version: String,

    /// Target platform
    pub platform: Platform,

    /// Cluster context (required for the cluster platform)
    #[arg(long, value_name = "CONTEXT")]
    pub context: Option<String>,

    /// Configuration template file (defaults to the platform template
    /// from the configuration)
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Override a template variable wherever its key appears
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Skip refreshing backend images before provisioning
    #[arg(long)]
    pub skip_autoupdate: bool,
}

impl InstallCommand {
    /// Execute the install command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        provision(self, global, false)
    }
}

/// Shared provisioning path for `install` and `update`.
pub fn provision(
    cmd: InstallCommand,
    global: &GlobalOptions,
    is_edit: bool,
) -> Result<(), CliError> {
    // 1. Load configuration and open the registry
    let config = load_configuration(global)?;
    let mut registry = open_registry(global, &config)?;

    // 2. Read the template and apply variable overrides
    let mut sections = read_sections(cmd.template.as_deref(), &config, cmd.platform)?;
    apply_overrides(&mut sections, &cmd.vars)?;

    // 3. Validate the environment record up front
    let id = EnvironmentId::new(cmd.name, cmd.version, cmd.platform)?;
    let environment = Environment::new(id, cmd.context, sections, AccessPoints::default())?;

    // 4. Run the backend with streamed output
    let orchestrator = Orchestrator::new(config);
    let options = ProvisionOptions {
        is_edit,
        skip_autoupdate: cmd.skip_autoupdate,
    };
    let installed = runtime()?.block_on(orchestrator.install(
        &mut registry,
        environment,
        options,
        &StdoutSink,
    ))?;

    // 5. Report the recorded access points
    if !global.quiet {
        println!("Installed {}", installed.id);
        if !installed.access_points.data_portal.is_empty() {
            println!("Data portal: {}", installed.access_points.data_portal);
        }
        if !installed.access_points.api_gateway.is_empty() {
            println!("API gateway: {}", installed.access_points.api_gateway);
        }
    }

    Ok(())
}

/// Apply `KEY=VALUE` overrides to every section carrying the key.
fn apply_overrides(sections: &mut [Section], vars: &[String]) -> Result<(), CliError> {
    for var in vars {
        let (key, value) = var.split_once('=').ok_or_else(|| {
            CliError::InvalidArguments(format!("expected KEY=VALUE, got '{var}'"))
        })?;

        let mut applied = false;
        for section in sections.iter_mut() {
            if let Some(existing) = section.variables.get_mut(key) {
                *existing = value.to_string();
                applied = true;
            }
        }
        if !applied {
            return Err(CliError::InvalidArguments(format!(
                "variable '{key}' does not appear in the template"
            )));
        }
    }
    Ok(())
}
