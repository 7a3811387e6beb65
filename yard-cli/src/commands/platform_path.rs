//! Platform path command implementations.
//!
//! This module implements the `platform-path get` and
//! `platform-path set` subcommands, a front-end for the registry's
//! per-platform executable directory table.

use crate::error::CliError;
use crate::utils::{load_configuration, open_registry, GlobalOptions};
use clap::Subcommand;
use std::path::PathBuf;
use yard::registry::Registry;
use yard::Platform;

/// Get or set the executable directory for a platform.
#[derive(Subcommand)]
pub enum PlatformPathCommand {
    /// Show the recorded executable directory for a platform
    Get {
        /// Target platform
        platform: Platform,
    },

    /// Record the executable directory for a platform
    Set {
        /// Target platform
        platform: Platform,

        /// Directory holding the platform's provisioner executable
        path: PathBuf,
    },
}

impl PlatformPathCommand {
    /// Execute the platform-path command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut registry = open_registry(global, &config)?;

        match self {
            PlatformPathCommand::Get { platform } => {
                match Registry::get_platform_path(registry.connection(), platform)? {
                    Some(path) => {
                        println!("{}", path.display());
                        Ok(())
                    }
                    None => Err(CliError::SemanticFailure(format!(
                        "no path recorded for platform {platform}"
                    ))),
                }
            }
            PlatformPathCommand::Set { platform, path } => {
                registry.set_platform_path(platform, &path)?;
                if !global.quiet {
                    println!("Recorded {} for platform {platform}", path.display());
                }
                Ok(())
            }
        }
    }
}
