//! Registry CRUD operations for environments and platform paths.

use std::path::{Path, PathBuf};

use rusqlite::types::Type;
use rusqlite::{params, Connection, TransactionBehavior};

use crate::environment::{AccessPoints, Environment, EnvironmentId, Platform};
use crate::error::{Error, Result};

use super::codec::{decode_sections, encode_sections};
use super::connection::Registry;
use super::schema::{DELETE_ENVIRONMENT, INSERT_ENVIRONMENT};

const SELECT_ENVIRONMENT: &str = r"
    SELECT name, version, platform, context, data_portal, api_gateway, variables
    FROM environments
    WHERE name = ? AND version = ? AND platform = ?
";

const LIST_ENVIRONMENTS: &str = r"
    SELECT name, version, platform, context, data_portal, api_gateway, variables
    FROM environments
    ORDER BY name, version
";

const SELECT_VARIABLES: &str = "SELECT variables FROM environments";

const SELECT_CONTEXT: &str = r"
    SELECT context FROM environments
    WHERE name = ? AND version = ? AND platform = ?
";

const UPSERT_PLATFORM_PATH: &str =
    "INSERT OR REPLACE INTO platform_paths (platform, path) VALUES (?, ?)";

const SELECT_PLATFORM_PATH: &str = "SELECT path FROM platform_paths WHERE platform = ?";

/// Deserializes an environment from a registry row.
///
/// Expects row fields in this order: name, version, platform, context,
/// `data_portal`, `api_gateway`, variables.
fn row_to_environment(row: &rusqlite::Row<'_>) -> rusqlite::Result<Environment> {
    let name: String = row.get(0)?;
    let version: String = row.get(1)?;
    let platform_tag: String = row.get(2)?;
    let context: Option<String> = row.get(3)?;
    let data_portal: String = row.get(4)?;
    let api_gateway: String = row.get(5)?;
    let variables: String = row.get(6)?;

    let platform: Platform = platform_tag
        .parse()
        .map_err(|e: Error| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    let id = EnvironmentId::new(name, version, platform)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

    let sections = decode_sections(&variables)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;

    Environment::new(
        id,
        context.filter(|c| !c.is_empty()),
        sections,
        AccessPoints {
            api_gateway,
            data_portal,
        },
    )
    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

impl Registry {
    /// Creates or replaces an environment record.
    ///
    /// The write is transactional with IMMEDIATE mode; an existing row
    /// with the same identity is replaced wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error if the sections cannot be encoded or if the
    /// transaction fails.
    pub fn upsert_environment(&mut self, environment: &Environment) -> Result<()> {
        let variables = encode_sections(&environment.sections)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            INSERT_ENVIRONMENT,
            params![
                environment.id.name,
                environment.id.version,
                environment.id.platform.as_str(),
                environment.context,
                environment.access_points.data_portal,
                environment.access_points.api_gateway,
                variables,
            ],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Retrieves an environment by identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(environment))` if the record exists
    /// - `Ok(None)` if it does not
    pub fn get_environment(
        conn: &Connection,
        name: &str,
        version: &str,
        platform: Platform,
    ) -> Result<Option<Environment>> {
        match conn.query_row(
            SELECT_ENVIRONMENT,
            params![name, version, platform.as_str()],
            row_to_environment,
        ) {
            Ok(environment) => Ok(Some(environment)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all registered environments, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_environments(conn: &Connection) -> Result<Vec<Environment>> {
        let mut stmt = conn.prepare(LIST_ENVIRONMENTS)?;
        let rows = stmt.query_map([], row_to_environment)?;

        let mut environments = Vec::new();
        for row in rows {
            environments.push(row?);
        }
        Ok(environments)
    }

    /// Deletes an environment record by identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    ///
    /// # Returns
    ///
    /// The number of rows removed: 0 when no such record existed.
    pub fn delete_environment(
        &mut self,
        name: &str,
        version: &str,
        platform: Platform,
    ) -> Result<usize> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let removed = tx.execute(DELETE_ENVIRONMENT, params![name, version, platform.as_str()])?;

        tx.commit()?;
        Ok(removed)
    }

    /// Checks whether an environment identity is registered.
    ///
    /// For cluster environments the stored context must also match; for
    /// compose environments the context argument is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn is_installed(
        conn: &Connection,
        id: &EnvironmentId,
        context: Option<&str>,
    ) -> Result<bool> {
        let stored: Option<Option<String>> = match conn.query_row(
            SELECT_CONTEXT,
            params![id.name, id.version, id.platform.as_str()],
            |row| row.get(0),
        ) {
            Ok(ctx) => Some(ctx),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(e.into()),
        };

        match stored {
            None => Ok(false),
            Some(stored_context) => match id.platform {
                Platform::Compose => Ok(true),
                Platform::Cluster => Ok(stored_context.as_deref() == context),
            },
        }
    }

    /// Returns the stored cluster context for an environment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the environment is not registered or has no
    /// context recorded.
    pub fn cluster_context(conn: &Connection, name: &str, version: &str) -> Result<String> {
        let context: Option<String> = match conn.query_row(
            SELECT_CONTEXT,
            params![name, version, Platform::Cluster.as_str()],
            |row| row.get(0),
        ) {
            Ok(ctx) => ctx,
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(e.into()),
        };

        context.filter(|c| !c.is_empty()).ok_or_else(|| Error::NotFound {
            resource: format!("context for {name}@{version}"),
        })
    }

    /// Records the executable directory for a platform.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_platform_path(&mut self, platform: Platform, path: &Path) -> Result<()> {
        self.conn.execute(
            UPSERT_PLATFORM_PATH,
            params![platform.as_str(), path.to_string_lossy()],
        )?;
        Ok(())
    }

    /// Returns the recorded executable directory for a platform, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_platform_path(conn: &Connection, platform: Platform) -> Result<Option<PathBuf>> {
        match conn.query_row(SELECT_PLATFORM_PATH, params![platform.as_str()], |row| {
            row.get::<_, String>(0)
        }) {
            Ok(path) => Ok(Some(PathBuf::from(path))),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the values of all port-bearing variables across every
    /// registered environment.
    ///
    /// A variable is port-bearing when its key contains `_PORT`. Values
    /// are returned verbatim; the allocator compares them as strings.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a variables blob cannot be
    /// decoded.
    pub fn used_ports(conn: &Connection) -> Result<Vec<String>> {
        let mut stmt = conn.prepare(SELECT_VARIABLES)?;
        let blobs = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut ports = Vec::new();
        for blob in blobs {
            let sections = decode_sections(&blob?)?;
            for section in &sections {
                for (key, value) in &section.variables {
                    if key.contains("_PORT") {
                        ports.push(value.clone());
                    }
                }
            }
        }
        Ok(ports)
    }
}
