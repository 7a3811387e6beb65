//! List command implementation.
//!
//! This module implements the `list` command, which reconciles the
//! registry against live platform state and displays the environments
//! that are still up, in table or JSON format.

use crate::error::CliError;
use crate::utils::{load_configuration, open_registry, GlobalOptions};
use clap::{Args, ValueEnum};
use std::io::Write;
use yard::{list_installed, Environment, SystemLiveness};

/// Column headers for table output.
const COLUMN_HEADERS: [&str; 6] = [
    "name",
    "version",
    "platform",
    "context",
    "data_portal",
    "api_gateway",
];

/// List environments that are registered and still live.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "YARD_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Filter by environment name
    #[arg(long, value_name = "NAME")]
    pub filter_name: Option<String>,
}

/// Output format for list command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration and open the registry
        let config = load_configuration(global)?;
        let mut registry = open_registry(global, &config)?;

        // 2. Reconcile against live platform state
        let liveness = SystemLiveness::new(&config);
        let mut environments = list_installed(&mut registry, &liveness)?;

        // 3. Apply filters
        if let Some(ref name) = self.filter_name {
            environments.retain(|e| e.id.name == *name);
        }

        // 4. Format and output to stdout
        match self.format {
            OutputFormat::Table => format_as_table(&environments)?,
            OutputFormat::Json => format_as_json(&environments)?,
        }

        Ok(())
    }
}

/// Format environments as a human-readable table.
fn format_as_table(environments: &[Environment]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    // Print header (uppercase for table display)
    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for env in environments {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}",
            env.id.name,
            env.id.version,
            env.id.platform,
            env.context.as_deref().unwrap_or("-"),
            env.access_points.data_portal,
            env.access_points.api_gateway,
        )?;
    }

    Ok(())
}

/// Format environments as JSON.
fn format_as_json(environments: &[Environment]) -> Result<(), CliError> {
    let values: Vec<serde_json::Value> = environments
        .iter()
        .map(|env| {
            serde_json::json!({
                "name": env.id.name,
                "version": env.id.version,
                "platform": env.id.platform.as_str(),
                "context": env.context,
                "data_portal": env.access_points.data_portal,
                "api_gateway": env.access_points.api_gateway,
            })
        })
        .collect();

    let json = serde_json::to_string_pretty(&values)
        .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
    println!("{json}");
    Ok(())
}
