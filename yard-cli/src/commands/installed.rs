//! Installed command implementation.
//!
//! This module implements the `installed` command, a registry query
//! whose exit code communicates whether an environment is registered.

use crate::error::CliError;
use crate::utils::{load_configuration, open_registry, GlobalOptions};
use clap::Args;
use yard::registry::Registry;
use yard::{EnvironmentId, Platform};

/// Check whether an environment is registered.
#[derive(Args)]
pub struct InstalledCommand {
    /// Environment name
    pub name: String,

    /// Environment version
    pub version: String,

    /// Target platform
    pub platform: Platform,

    /// Cluster context that must match the registration
    #[arg(long, value_name = "CONTEXT")]
    pub context: Option<String>,
}

impl InstalledCommand {
    /// Execute the installed command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let registry = open_registry(global, &config)?;

        let id = EnvironmentId::new(self.name, self.version, self.platform)?;
        let installed =
            Registry::is_installed(registry.connection(), &id, self.context.as_deref())?;

        if installed {
            if !global.quiet {
                println!("{id} is installed");
            }
            Ok(())
        } else {
            Err(CliError::SemanticFailure(format!("{id} is not installed")))
        }
    }
}
