//! Backend provisioner invocation.
//!
//! Each platform is provisioned by an external executable with a fixed
//! command-line contract. The platform is resolved to a backend variant
//! once, at the API boundary; everything downstream dispatches on the
//! closed enum.

pub mod cluster;
pub mod command;
pub mod compose;

use std::path::Path;

use crate::config::Config;
use crate::environment::{AccessPoints, Platform};

pub use cluster::ClusterBackend;
pub use command::{resolve_program, run_capture, run_streamed, CommandSpec};
pub use compose::ComposeBackend;

/// Flags shared by provisioning commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProvisionOptions {
    /// Whether this run updates an existing deployment in place.
    pub is_edit: bool,
    /// Whether the backend should skip refreshing its images.
    pub skip_autoupdate: bool,
}

/// A platform's provisioner backend.
#[derive(Debug, Clone)]
pub enum Backend {
    /// Compose provisioner.
    Compose(ComposeBackend),
    /// Cluster provisioner.
    Cluster(ClusterBackend),
}

impl Backend {
    /// Selects the backend for a platform.
    ///
    /// The program name comes from the configuration; `program_dir` is
    /// the optional per-platform directory override recorded in the
    /// registry.
    #[must_use]
    pub fn for_platform(platform: Platform, config: &Config, program_dir: Option<&Path>) -> Self {
        let program = resolve_program(program_dir, config.provisioner_program(platform));
        match platform {
            Platform::Compose => {
                Self::Compose(ComposeBackend::new(program, config.external_ip.clone()))
            }
            Platform::Cluster => Self::Cluster(ClusterBackend::new(program)),
        }
    }

    /// Entry point URLs published by a successful provisioning run.
    #[must_use]
    pub fn access_points(&self) -> AccessPoints {
        match self {
            Self::Compose(backend) => backend.access_points(),
            Self::Cluster(backend) => backend.access_points(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_for_platform_uses_configured_program() {
        let config = Config::default().with_compose_program("my-provisioner");
        let backend = Backend::for_platform(Platform::Compose, &config, None);
        let Backend::Compose(compose) = backend else {
            panic!("expected compose backend");
        };
        let spec = compose.teardown_command(Path::new("/tmp/e"), "a", "1");
        assert_eq!(spec.program, PathBuf::from("my-provisioner"));
    }

    #[test]
    fn test_for_platform_applies_directory_override() {
        let config = Config::default();
        let backend =
            Backend::for_platform(Platform::Cluster, &config, Some(Path::new("/opt/bin")));
        let Backend::Cluster(cluster) = backend else {
            panic!("expected cluster backend");
        };
        let spec = cluster.teardown_command("staging", "atlas");
        assert_eq!(spec.program, PathBuf::from("/opt/bin/cluster-provisioner"));
    }
}
