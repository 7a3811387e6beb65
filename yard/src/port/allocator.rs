//! Port allocation.
//!
//! A port is usable only when it neither collides with a port-bearing
//! variable already registered for any environment nor has a live
//! listener on localhost.

use rusqlite::Connection;

use crate::error::{Error, Result};
use crate::registry::Registry;

use super::probe::PortProbe;

/// Default number of ephemeral allocation rounds before giving up.
pub const DEFAULT_PORT_ATTEMPTS: usize = 10;

/// Allocates ports that conflict with neither the registry nor the
/// live system.
///
/// # Examples
///
/// ```no_run
/// use yard::port::{PortAllocator, SystemPortProbe};
/// use yard::registry::{Registry, RegistryConfig};
///
/// let registry = Registry::open(RegistryConfig::new("/tmp/yard.db")).unwrap();
/// let allocator = PortAllocator::new(SystemPortProbe);
/// let port = allocator.find_available(registry.connection()).unwrap();
/// ```
#[derive(Debug)]
pub struct PortAllocator<P: PortProbe> {
    probe: P,
    attempts: usize,
}

impl<P: PortProbe> PortAllocator<P> {
    /// Creates an allocator with the default attempt budget.
    #[must_use]
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            attempts: DEFAULT_PORT_ATTEMPTS,
        }
    }

    /// Overrides the attempt budget for `find_available`.
    #[must_use]
    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    /// Checks whether a specific port is usable.
    ///
    /// A port is unavailable when it equals the value of any registered
    /// port-bearing variable, or when something is listening on it
    /// locally.
    ///
    /// # Errors
    ///
    /// Returns a validation error for port 0, or a registry error if the
    /// used-port query fails.
    pub fn is_available(&self, conn: &Connection, port: u16) -> Result<bool> {
        if port == 0 {
            return Err(Error::Validation {
                field: "port".into(),
                message: "port must be between 1 and 65535".into(),
            });
        }

        let wanted = port.to_string();
        if Registry::used_ports(conn)?.iter().any(|used| *used == wanted) {
            return Ok(false);
        }

        Ok(!self.probe.is_listening(port))
    }

    /// Finds a port with no conflicts.
    ///
    /// Each round takes an OS-assigned ephemeral port and rejects it if
    /// it collides with a registered port-bearing variable. Ephemeral
    /// ports are free by construction, so no listener check is needed.
    ///
    /// # Errors
    ///
    /// Returns `NoPortFound` when the attempt budget is exhausted, or an
    /// error if probing or the registry query fails.
    pub fn find_available(&self, conn: &Connection) -> Result<u16> {
        let used = Registry::used_ports(conn)?;

        for _ in 0..self.attempts {
            let port = self.probe.ephemeral_port()?;
            if !used.iter().any(|reserved| *reserved == port.to_string()) {
                log::debug!("allocated port {port}");
                return Ok(port);
            }
        }

        Err(Error::NoPortFound {
            attempts: self.attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{AccessPoints, Environment, EnvironmentId, Platform, Section};
    use crate::port::MockPortProbe;
    use crate::registry::RegistryConfig;
    use tempfile::tempdir;

    fn registry_with_port(port: &str) -> (tempfile::TempDir, Registry) {
        let dir = tempdir().unwrap();
        let mut registry =
            Registry::open(RegistryConfig::new(dir.path().join("test.db"))).unwrap();

        let mut section = Section::new("GATEWAY");
        section.variables.insert("API_PORT".into(), port.into());
        let env = Environment::new(
            EnvironmentId::new("atlas", "1.0", Platform::Compose).unwrap(),
            None,
            vec![section],
            AccessPoints::default(),
        )
        .unwrap();
        registry.upsert_environment(&env).unwrap();

        (dir, registry)
    }

    #[test]
    fn test_is_available_rejects_port_zero() {
        let (_dir, registry) = registry_with_port("8080");
        let allocator = PortAllocator::new(MockPortProbe::new());
        assert!(allocator.is_available(registry.connection(), 0).is_err());
    }

    #[test]
    fn test_is_available_rejects_registered_port() {
        let (_dir, registry) = registry_with_port("8080");
        let allocator = PortAllocator::new(MockPortProbe::new());
        assert!(!allocator.is_available(registry.connection(), 8080).unwrap());
    }

    #[test]
    fn test_is_available_rejects_listening_port() {
        let (_dir, registry) = registry_with_port("8080");
        let mut probe = MockPortProbe::new();
        probe.mark_listening(9000);
        let allocator = PortAllocator::new(probe);
        assert!(!allocator.is_available(registry.connection(), 9000).unwrap());
        assert!(allocator.is_available(registry.connection(), 9001).unwrap());
    }

    #[test]
    fn test_find_available_skips_registered_ports() {
        let (_dir, registry) = registry_with_port("5000");
        let mut probe = MockPortProbe::new();
        probe.queue_ephemeral([5000, 5001]);

        let allocator = PortAllocator::new(probe);
        assert_eq!(allocator.find_available(registry.connection()).unwrap(), 5001);
    }

    #[test]
    fn test_find_available_exhausts_attempts() {
        let (_dir, registry) = registry_with_port("5000");
        let mut probe = MockPortProbe::new();
        probe.queue_ephemeral([5000, 5000, 5000]);

        let allocator = PortAllocator::new(probe).with_attempts(3);
        let err = allocator.find_available(registry.connection()).unwrap_err();
        assert!(matches!(err, Error::NoPortFound { attempts: 3 }));
    }
}
