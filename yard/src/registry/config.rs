//! Registry connection configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for opening a registry store.
///
/// # Examples
///
/// ```
/// use yard::registry::RegistryConfig;
/// use std::time::Duration;
///
/// let config = RegistryConfig::new("/tmp/yard.db")
///     .with_busy_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// Busy timeout for lock contention.
    pub busy_timeout: Duration,
    /// Whether to create the database file and parent directory if absent.
    pub auto_create: bool,
    /// Whether to open the store read-only.
    pub read_only: bool,
}

impl RegistryConfig {
    /// Creates a configuration with default settings: a 5 second busy
    /// timeout, auto-create enabled, read-write access.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout duration.
    #[must_use]
    pub const fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Opens the store read-only. Disables auto-create.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = RegistryConfig::new("/tmp/test.db");
        assert_eq!(config.path, PathBuf::from("/tmp/test.db"));
        assert_eq!(config.busy_timeout, Duration::from_millis(5000));
        assert!(config.auto_create);
        assert!(!config.read_only);
    }

    #[test]
    fn test_config_read_only_disables_auto_create() {
        let config = RegistryConfig::new("/tmp/test.db").read_only();
        assert!(config.read_only);
        assert!(!config.auto_create);
    }
}
