//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `list`: List environments that are registered and still live
//! - `installed`: Check whether an environment is registered
//! - `install` / `update`: Provision an environment and register it
//! - `delete`: Tear an environment down and unregister it
//! - `populate`: Seed a deployed environment with data
//! - `port`: Check or find free TCP ports
//! - `platform_path`: Manage per-platform executable directories
//! - `template`: Parse and print a configuration template
//! - `contexts`: List available cluster contexts

pub mod contexts;
pub mod delete;
pub mod install;
pub mod installed;
pub mod list;
pub mod platform_path;
pub mod populate;
pub mod port;
pub mod template;
pub mod update;

pub use contexts::ContextsCommand;
pub use delete::DeleteCommand;
pub use install::InstallCommand;
pub use installed::InstalledCommand;
pub use list::ListCommand;
pub use platform_path::PlatformPathCommand;
pub use populate::PopulateCommand;
pub use port::PortCommand;
pub use template::TemplateCommand;
pub use update::UpdateCommand;
