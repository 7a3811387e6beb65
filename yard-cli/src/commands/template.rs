//! Template command implementation.
//!
//! This module implements the `template` command, which parses a
//! configuration template and prints the sections it defines.

use crate::error::CliError;
use crate::utils::{load_configuration, read_sections, GlobalOptions};
use clap::Args;
use std::path::PathBuf;
use yard::Platform;

/// Parse and print a configuration template.
#[derive(Args)]
pub struct TemplateCommand {
    /// Target platform whose default template to parse
    pub platform: Platform,

    /// Parse this file instead of the platform default
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Print as JSON instead of plain sections
    #[arg(long)]
    pub json: bool,
}

impl TemplateCommand {
    /// Execute the template command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let sections = read_sections(self.file.as_deref(), &config, self.platform)?;

        if self.json {
            let json = serde_json::to_string_pretty(&sections)
                .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
            println!("{json}");
            return Ok(());
        }

        for section in &sections {
            println!("[{}]", section.name);
            for (key, value) in &section.variables {
                println!("{key}={value}");
            }
            println!();
        }
        Ok(())
    }
}
