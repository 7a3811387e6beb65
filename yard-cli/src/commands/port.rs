//! Port command implementations.
//!
//! This module implements the `port check` and `port find`
//! subcommands, front-ends for the library's port allocator.

use crate::error::CliError;
use crate::utils::{load_configuration, open_registry, GlobalOptions};
use clap::Subcommand;
use yard::port::{PortAllocator, SystemPortProbe};

/// Check or find free TCP ports.
#[derive(Subcommand)]
pub enum PortCommand {
    /// Check whether a specific port is free of conflicts
    Check {
        /// Port number to check
        port: u16,
    },

    /// Find a port that conflicts with neither the registry nor the
    /// live system
    Find,
}

impl PortCommand {
    /// Execute the port command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let registry = open_registry(global, &config)?;
        let allocator =
            PortAllocator::new(SystemPortProbe).with_attempts(config.port_attempts);

        match self {
            PortCommand::Check { port } => {
                if allocator.is_available(registry.connection(), port)? {
                    if !global.quiet {
                        println!("Port {port} is available");
                    }
                    Ok(())
                } else {
                    Err(CliError::SemanticFailure(format!(
                        "Port {port} is in use or already assigned"
                    )))
                }
            }
            PortCommand::Find => {
                let port = allocator.find_available(registry.connection())?;
                println!("{port}");
                Ok(())
            }
        }
    }
}
