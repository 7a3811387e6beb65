//! Contexts command implementation.
//!
//! This module implements the `contexts` command, which lists the
//! cluster contexts configured on this machine.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use yard::{cluster_contexts, SystemLiveness};

/// List available cluster contexts.
#[derive(Args)]
pub struct ContextsCommand {}

impl ContextsCommand {
    /// Execute the contexts command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let liveness = SystemLiveness::new(&config);

        let contexts = cluster_contexts(&liveness)?;
        if contexts.is_empty() && !global.quiet {
            eprintln!("No cluster contexts configured");
            return Ok(());
        }

        for context in contexts {
            println!("{context}");
        }
        Ok(())
    }
}
