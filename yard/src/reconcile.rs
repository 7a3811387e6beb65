//! Reconciliation of the registry against live platform state.
//!
//! Deployments can disappear behind the registry's back (removed by
//! hand with platform tooling). Reconciliation queries the live
//! platforms, drops registry rows whose deployment is gone, and returns
//! only environments that are still up. It is best-effort and runs on
//! demand; nothing watches the platforms continuously.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::backend::{run_capture, CommandSpec};
use crate::config::Config;
use crate::environment::{Environment, Platform};
use crate::error::{Error, Result};
use crate::registry::Registry;

/// Queries live platform state.
///
/// Implementations shell out in production and answer from fixtures in
/// tests.
pub trait Liveness {
    /// Names of all container units known to the compose runtime,
    /// running or not, newline-separated.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be queried.
    fn compose_unit_names(&self) -> Result<String>;

    /// Switches the active cluster context.
    ///
    /// # Errors
    ///
    /// Returns `ContextUnavailable` if the context cannot be reached.
    fn switch_context(&self, context: &str) -> Result<()>;

    /// Names of all namespaces in the active cluster context,
    /// newline-separated.
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster cannot be queried.
    fn namespace_names(&self) -> Result<String>;

    /// Names of all configured cluster contexts.
    ///
    /// # Errors
    ///
    /// Returns an error if the client configuration cannot be read.
    fn context_names(&self) -> Result<Vec<String>>;
}

/// Production liveness probes shelling out to the platform clients.
#[derive(Debug, Clone)]
pub struct SystemLiveness {
    docker: PathBuf,
    kubectl: PathBuf,
}

impl SystemLiveness {
    /// Creates probes using the client programs named in the
    /// configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            docker: PathBuf::from(&config.docker_program),
            kubectl: PathBuf::from(&config.kubectl_program),
        }
    }
}

impl Liveness for SystemLiveness {
    fn compose_unit_names(&self) -> Result<String> {
        run_capture(
            &CommandSpec::new(&self.docker)
                .arg("ps")
                .arg("-a")
                .flag("--format", "{{.Names}}"),
        )
    }

    fn switch_context(&self, context: &str) -> Result<()> {
        run_capture(
            &CommandSpec::new(&self.kubectl)
                .arg("config")
                .arg("use-context")
                .arg(context),
        )
        .map_err(|_| Error::ContextUnavailable {
            context: context.to_string(),
        })?;
        Ok(())
    }

    fn namespace_names(&self) -> Result<String> {
        run_capture(
            &CommandSpec::new(&self.kubectl)
                .arg("get")
                .arg("namespaces")
                .arg("--no-headers")
                .flag("-o", "custom-columns=NAME:.metadata.name"),
        )
    }

    fn context_names(&self) -> Result<Vec<String>> {
        let output = run_capture(
            &CommandSpec::new(&self.kubectl)
                .arg("config")
                .arg("get-contexts")
                .arg("-o=name"),
        )?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect())
    }
}

/// Fixture-backed liveness probes for tests.
#[derive(Debug, Default)]
pub struct MockLiveness {
    /// Newline-separated compose unit names.
    pub compose_units: String,
    /// Contexts that can be switched to.
    pub reachable_contexts: HashSet<String>,
    /// Newline-separated namespace names.
    pub namespaces: String,
}

impl Liveness for MockLiveness {
    fn compose_unit_names(&self) -> Result<String> {
        Ok(self.compose_units.clone())
    }

    fn switch_context(&self, context: &str) -> Result<()> {
        if self.reachable_contexts.contains(context) {
            Ok(())
        } else {
            Err(Error::ContextUnavailable {
                context: context.to_string(),
            })
        }
    }

    fn namespace_names(&self) -> Result<String> {
        Ok(self.namespaces.clone())
    }

    fn context_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.reachable_contexts.iter().cloned().collect();
        names.sort();
        Ok(names)
    }
}

/// Derives the tag identifying an environment's deployment on the
/// compose runtime.
///
/// The tag is the name and version concatenated, with every run of
/// characters outside `[A-Za-z0-9 ]` collapsed to a single `-`.
#[must_use]
pub fn deployment_tag(name: &str, version: &str) -> String {
    let mut tag = String::with_capacity(name.len() + version.len());
    let mut in_run = false;
    for ch in name.chars().chain(version.chars()) {
        if ch.is_ascii_alphanumeric() || ch == ' ' {
            tag.push(ch);
            in_run = false;
        } else if !in_run {
            tag.push('-');
            in_run = true;
        }
    }
    tag
}

/// Returns all environments that are still live, pruning the rest.
///
/// For each registered environment the matching platform is probed: a
/// compose environment is live when its deployment tag appears in the
/// unit names; a cluster environment is live when its context can be
/// switched to and its name appears among the namespaces. A context
/// that cannot be reached counts as gone, not as an error. Rows for
/// dead deployments are deleted from the registry.
///
/// The result is sorted by name ascending, then version descending
/// within a name. Running this twice in a row yields the same result.
///
/// # Errors
///
/// Returns an error if the registry or a required probe fails.
pub fn list_installed<L: Liveness>(
    registry: &mut Registry,
    liveness: &L,
) -> Result<Vec<Environment>> {
    let environments = Registry::list_environments(registry.connection())?;

    // Query the compose runtime once for all rows.
    let compose_units = if environments
        .iter()
        .any(|e| e.id.platform == Platform::Compose)
    {
        liveness.compose_unit_names()?
    } else {
        String::new()
    };

    let mut live = Vec::new();

    for environment in environments {
        let alive = match environment.id.platform {
            Platform::Compose => compose_units.contains(&deployment_tag(
                &environment.id.name,
                &environment.id.version,
            )),
            Platform::Cluster => match environment.context.as_deref() {
                Some(context) => {
                    if liveness.switch_context(context).is_ok() {
                        liveness.namespace_names()?.contains(&environment.id.name)
                    } else {
                        false
                    }
                }
                None => false,
            },
        };

        if alive {
            live.push(environment);
        } else {
            log::debug!("pruning stale environment {}", environment.id);
            registry.delete_environment(
                &environment.id.name,
                &environment.id.version,
                environment.id.platform,
            )?;
        }
    }

    live.sort_by(|a, b| {
        a.id.name
            .cmp(&b.id.name)
            .then_with(|| b.id.version.cmp(&a.id.version))
    });

    Ok(live)
}

/// Lists the cluster contexts available on this machine.
///
/// # Errors
///
/// Returns an error if the probe fails.
pub fn cluster_contexts<L: Liveness>(liveness: &L) -> Result<Vec<String>> {
    liveness.context_names()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployment_tag_passes_alphanumerics_and_spaces() {
        assert_eq!(deployment_tag("atlas", "120"), "atlas120");
        assert_eq!(deployment_tag("my env", "1"), "my env1");
    }

    #[test]
    fn test_deployment_tag_collapses_symbol_runs() {
        assert_eq!(deployment_tag("atlas", "1.2.0"), "atlas1-2-0");
        assert_eq!(deployment_tag("a+b", "1..2"), "a-b1-2");
    }

    #[test]
    fn test_mock_liveness_context_switching() {
        let mut liveness = MockLiveness::default();
        liveness.reachable_contexts.insert("staging".into());

        assert!(liveness.switch_context("staging").is_ok());
        let err = liveness.switch_context("gone").unwrap_err();
        assert!(matches!(err, Error::ContextUnavailable { .. }));
    }
}
