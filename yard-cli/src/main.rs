//! Main entry point for the yard CLI.
//!
//! This is the command-line interface for the yard deployment registry.
//! It provides commands for managing application environments:
//! - `list`: List environments that are registered and still live
//! - `install` / `update`: Provision an environment and register it
//! - `delete`: Tear an environment down and unregister it
//! - `populate`: Seed a deployed environment with data

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _logger = yard::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Installed(cmd) => cmd.execute(&global),
        cli::Command::Install(cmd) => cmd.execute(&global),
        cli::Command::Update(cmd) => cmd.execute(&global),
        cli::Command::Delete(cmd) => cmd.execute(&global),
        cli::Command::Populate(cmd) => cmd.execute(&global),
        cli::Command::Port(cmd) => cmd.execute(&global),
        cli::Command::PlatformPath(cmd) => cmd.execute(&global),
        cli::Command::Template(cmd) => cmd.execute(&global),
        cli::Command::Contexts(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
