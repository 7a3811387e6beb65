//! Delete command implementation.
//!
//! This module implements the `delete` command, which tears an
//! environment down through its platform backend and removes it from
//! the registry.

use crate::error::CliError;
use crate::utils::{load_configuration, open_registry, GlobalOptions};
use clap::Args;
use yard::{Orchestrator, Platform};

/// Tear an environment down and unregister it.
#[derive(Args)]
pub struct DeleteCommand {
    /// Environment name
    pub name: String,

    /// Environment version
    pub version: String,

    /// Target platform
    pub platform: Platform,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut registry = open_registry(global, &config)?;

        let orchestrator = Orchestrator::new(config);
        orchestrator.delete(&mut registry, &self.name, &self.version, self.platform)?;

        if !global.quiet {
            println!("Deleted {}@{} ({})", self.name, self.version, self.platform);
        }
        Ok(())
    }
}
