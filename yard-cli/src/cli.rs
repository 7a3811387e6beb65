//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    ContextsCommand, DeleteCommand, InstallCommand, InstalledCommand, ListCommand,
    PlatformPathCommand, PopulateCommand, PortCommand, TemplateCommand, UpdateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for registering and orchestrating application
/// deployments.
#[derive(Parser)]
#[command(name = "yard")]
#[command(version, about = "Manage application deployment environments", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "YARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default registry busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "YARD_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// List environments that are registered and still live
    List(ListCommand),

    /// Check whether an environment is registered
    Installed(InstalledCommand),

    /// Provision an environment and register it
    Install(InstallCommand),

    /// Re-provision a registered environment in place
    Update(UpdateCommand),

    /// Tear an environment down and unregister it
    Delete(DeleteCommand),

    /// Seed a deployed environment with data from a directory
    Populate(PopulateCommand),

    /// Check or find free TCP ports
    #[command(subcommand)]
    Port(PortCommand),

    /// Get or set the executable directory for a platform
    #[command(subcommand)]
    PlatformPath(PlatformPathCommand),

    /// Parse and print a configuration template
    Template(TemplateCommand),

    /// List available cluster contexts
    Contexts(ContextsCommand),
}
