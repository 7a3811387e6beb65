//! Populate command implementation.
//!
//! This module implements the `populate` command, which seeds a
//! deployed environment with data from a local directory, streaming the
//! backend's output to stdout.

use crate::error::CliError;
use crate::utils::{load_configuration, open_registry, runtime, GlobalOptions, StdoutSink};
use clap::Args;
use std::path::PathBuf;
use yard::{Orchestrator, Platform};

/// Seed a deployed environment with data from a directory.
#[derive(Args)]
pub struct PopulateCommand {
    /// Environment name
    pub name: String,

    /// Environment version
    pub version: String,

    /// Target platform
    pub platform: Platform,

    /// Directory holding the data to load
    #[arg(long, value_name = "DIR")]
    pub path: PathBuf,
}

impl PopulateCommand {
    /// Execute the populate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !self.path.is_dir() {
            return Err(CliError::InvalidArguments(format!(
                "data path '{}' is not a directory",
                self.path.display()
            )));
        }

        let config = load_configuration(global)?;
        let mut registry = open_registry(global, &config)?;

        let orchestrator = Orchestrator::new(config);
        runtime()?.block_on(orchestrator.populate(
            &mut registry,
            &self.name,
            &self.version,
            self.platform,
            &self.path,
            &StdoutSink,
        ))?;

        if !global.quiet {
            println!("Populated {}@{} ({})", self.name, self.version, self.platform);
        }
        Ok(())
    }
}
