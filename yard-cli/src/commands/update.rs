//! Update command implementation.
//!
//! This module implements the `update` command, which re-provisions an
//! already registered environment in place.

use crate::commands::install::{provision, InstallCommand};
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use std::path::PathBuf;
use yard::Platform;

/// Re-provision a registered environment in place.
#[derive(Args)]
pub struct UpdateCommand {
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

impl UpdateCommand {
    /// Execute the update command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        provision(
            InstallCommand {
                name: self.name,
                version: self.version,
                platform: self.platform,
                context: self.context,
                template: self.template,
                vars: self.vars,
                skip_autoupdate: self.skip_autoupdate,
            },
            global,
            true,
        )
    }
}
