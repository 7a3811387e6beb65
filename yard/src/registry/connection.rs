//! Registry connection management.

use rusqlite::{Connection, OpenFlags};

use crate::error::Result;

use super::config::RegistryConfig;

/// A registry store handle.
///
/// Wraps a `SQLite` connection configured for concurrent access: WAL
/// journal mode and a busy timeout. The schema is verified (and, for a
/// fresh file, initialized) on open.
///
/// # Examples
///
/// ```no_run
/// use yard::registry::{Registry, RegistryConfig};
///
/// let config = RegistryConfig::new("/tmp/yard.db");
/// let registry = Registry::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Registry {
    pub(super) conn: Connection,
    #[allow(dead_code)]
    config: RegistryConfig,
}

impl Registry {
    /// Opens a registry store with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, the parent
    /// directory cannot be created, PRAGMA settings cannot be applied,
    /// or schema verification fails.
    pub fn open(config: RegistryConfig) -> Result<Self> {
        if config.auto_create && !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;

        // PRAGMA journal_mode returns a row, so it needs query_row
        let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        conn.execute_batch(&format!(
            "PRAGMA busy_timeout = {}",
            config.busy_timeout.as_millis()
        ))?;

        super::migrations::check_schema_compatibility(&conn)?;

        Ok(Self { conn, config })
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns a mutable reference to the underlying connection, for
    /// operations that need transactions.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
