#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # yard
//!
//! A library for registering and orchestrating application deployments.
//!
//! An *environment* is a named, versioned deployment of the application
//! stack on one of two platforms: a local compose runtime or a remote
//! cluster. The library persists environments in an embedded registry,
//! reconciles the registry against live platform state, allocates
//! non-conflicting ports, and drives provisioning through external
//! backend programs with streamed progress.
//!
//! ## Core Types
//!
//! - [`Environment`], [`EnvironmentId`], [`Platform`]: the deployment model
//! - [`Registry`] and [`RegistryConfig`]: persistent environment storage
//! - [`Orchestrator`]: install, update, delete, and populate operations
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use yard::{EnvironmentId, Platform};
//!
//! let id = EnvironmentId::new("atlas", "1.2.0", Platform::Compose).unwrap();
//! assert_eq!(id.to_string(), "atlas@1.2.0 (compose)");
//! ```

pub mod backend;
pub mod config;
pub mod environment;
pub mod error;
pub mod logging;
pub mod operations;
pub mod port;
pub mod progress;
pub mod reconcile;
pub mod registry;
pub mod template;

// Re-export key types at crate root for convenience
pub use backend::{Backend, ClusterBackend, ComposeBackend, ProvisionOptions};
pub use config::{Config, DEFAULT_CLUSTER_PROGRAM, DEFAULT_COMPOSE_PROGRAM};
pub use environment::{AccessPoints, Environment, EnvironmentId, Platform, Section};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{IdentityLocks, Orchestrator, TempEnvFile};
pub use port::{MockPortProbe, PortAllocator, PortProbe, SystemPortProbe, DEFAULT_PORT_ATTEMPTS};
pub use progress::{MemorySink, NullSink, ProgressSink, TERMINAL_OUTPUT};
pub use reconcile::{
    cluster_contexts, deployment_tag, list_installed, Liveness, MockLiveness, SystemLiveness,
};
pub use registry::{Registry, RegistryConfig};
pub use template::{encode_env, parse_template, read_template_file, SECTION_DELIMITER};
