//! Environment registry persistence.
//!
//! The registry is a single-file `SQLite` store recording installed
//! environments and per-platform executable path overrides. A row exists
//! only for deployments whose provisioning succeeded.

mod codec;
mod config;
mod connection;
pub mod migrations;
mod operations;
pub mod schema;

pub use config::RegistryConfig;
pub use connection::Registry;
