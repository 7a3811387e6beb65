//! Core environment types.
//!
//! This module defines the deployment target platforms, the environment
//! identity, and the environment record stored in the registry.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Deployment target platform for an environment.
///
/// The set of platforms is closed: every caller that dispatches on the
/// platform does so exhaustively, so adding a platform is a compile-time
/// event rather than a runtime string comparison.
///
/// # Examples
///
/// ```
/// use yard::Platform;
///
/// let platform: Platform = "compose".parse().unwrap();
/// assert_eq!(platform, Platform::Compose);
/// assert!("bare-metal".parse::<Platform>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Single-host container composition.
    Compose,
    /// Namespaced cluster deployment, addressed through a context.
    Cluster,
}

impl Platform {
    /// Returns the canonical string tag for this platform.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compose => "compose",
            Self::Cluster => "cluster",
        }
    }

    /// Whether deployments on this platform are addressed through a
    /// named cluster context.
    #[must_use]
    pub const fn requires_context(self) -> bool {
        matches!(self, Self::Cluster)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "compose" => Ok(Self::Compose),
            "cluster" => Ok(Self::Cluster),
            other => Err(Error::PlatformUnknown {
                value: other.to_string(),
            }),
        }
    }
}

/// The identity of an environment in the registry.
///
/// Environments are unique per `(name, version, platform)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnvironmentId {
    /// Environment name.
    pub name: String,
    /// Environment version.
    pub version: String,
    /// Target platform.
    pub platform: Platform,
}

impl EnvironmentId {
    /// Creates a validated environment identity.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name or version is empty.
    pub fn new(name: impl Into<String>, version: impl Into<String>, platform: Platform) -> Result<Self> {
        let name = name.into();
        let version = version.into();
        if name.trim().is_empty() {
            return Err(Error::Validation {
                field: "name".into(),
                message: "environment name must be non-empty".into(),
            });
        }
        if version.trim().is_empty() {
            return Err(Error::Validation {
                field: "version".into(),
                message: "environment version must be non-empty".into(),
            });
        }
        Ok(Self {
            name,
            version,
            platform,
        })
    }
}

impl fmt::Display for EnvironmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.name, self.version, self.platform)
    }
}

/// A named group of configuration variables.
///
/// Variable order within a section is irrelevant, so the variables are
/// held in a sorted map. The order of sections within an environment is
/// significant and preserved everywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section display name.
    pub name: String,
    /// Variable key to value mapping.
    pub variables: BTreeMap<String, String>,
}

impl Section {
    /// Creates an empty section with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: BTreeMap::new(),
        }
    }
}

/// Entry point URLs of a provisioned environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPoints {
    /// URL of the API gateway.
    pub api_gateway: String,
    /// URL of the data portal.
    pub data_portal: String,
}

/// A registered environment deployment.
///
/// An `Environment` is only persisted after its provisioning command has
/// succeeded; the registry never holds records for deployments that were
/// not brought up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Registry identity.
    pub id: EnvironmentId,
    /// Cluster context. `None` for compose environments.
    pub context: Option<String>,
    /// Ordered configuration sections.
    pub sections: Vec<Section>,
    /// Entry point URLs recorded after provisioning.
    pub access_points: AccessPoints,
}

impl Environment {
    /// Creates a validated environment record.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the identity is invalid, or if a
    /// cluster environment is missing its context.
    pub fn new(
        id: EnvironmentId,
        context: Option<String>,
        sections: Vec<Section>,
        access_points: AccessPoints,
    ) -> Result<Self> {
        if id.platform.requires_context() && context.as_deref().map_or(true, |c| c.trim().is_empty()) {
            return Err(Error::Validation {
                field: "context".into(),
                message: format!("cluster environment {id} requires a context"),
            });
        }
        Ok(Self {
            id,
            context,
            sections,
            access_points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(platform: Platform) -> EnvironmentId {
        EnvironmentId::new("atlas", "1.2.0", platform).unwrap()
    }

    #[test]
    fn test_platform_round_trip() {
        for platform in [Platform::Compose, Platform::Cluster] {
            let parsed: Platform = platform.as_str().parse().unwrap();
            assert_eq!(parsed, platform);
        }
    }

    #[test]
    fn test_platform_unknown_tag() {
        let err = "swarm".parse::<Platform>().unwrap_err();
        assert!(matches!(err, Error::PlatformUnknown { value } if value == "swarm"));
    }

    #[test]
    fn test_environment_id_display() {
        let id = id(Platform::Cluster);
        assert_eq!(id.to_string(), "atlas@1.2.0 (cluster)");
    }

    #[test]
    fn test_environment_id_rejects_empty_name() {
        assert!(EnvironmentId::new("", "1.0", Platform::Compose).is_err());
        assert!(EnvironmentId::new("  ", "1.0", Platform::Compose).is_err());
        assert!(EnvironmentId::new("atlas", "", Platform::Compose).is_err());
    }

    #[test]
    fn test_cluster_environment_requires_context() {
        let missing = Environment::new(id(Platform::Cluster), None, vec![], AccessPoints::default());
        assert!(missing.is_err());

        let blank = Environment::new(
            id(Platform::Cluster),
            Some("  ".into()),
            vec![],
            AccessPoints::default(),
        );
        assert!(blank.is_err());

        let ok = Environment::new(
            id(Platform::Cluster),
            Some("staging".into()),
            vec![],
            AccessPoints::default(),
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn test_compose_environment_needs_no_context() {
        let env =
            Environment::new(id(Platform::Compose), None, vec![], AccessPoints::default()).unwrap();
        assert!(env.context.is_none());
    }

    #[test]
    fn test_section_json_shape() {
        let mut section = Section::new("GATEWAY");
        section.variables.insert("API_PORT".into(), "8080".into());

        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["name"], "GATEWAY");
        assert_eq!(json["variables"]["API_PORT"], "8080");
    }
}
