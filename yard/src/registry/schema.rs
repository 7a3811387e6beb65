//! Registry schema definitions and SQL constants.

/// Current schema version, stored in the metadata table and checked on
/// every open.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the environments table.
///
/// One row per installed deployment, keyed by (name, version, platform).
/// The variables column holds the ordered section list as a JSON blob;
/// it is only read and written through the registry codec.
pub const CREATE_ENVIRONMENTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS environments (
        name TEXT NOT NULL,
        version TEXT NOT NULL,
        platform TEXT NOT NULL,
        context TEXT,
        data_portal TEXT NOT NULL,
        api_gateway TEXT NOT NULL,
        variables TEXT NOT NULL,
        PRIMARY KEY (name, version, platform)
    )";

/// SQL statement to create the platform paths table.
///
/// Optional per-platform directory overrides for locating backend
/// executables.
pub const CREATE_PLATFORM_PATHS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS platform_paths (
        platform TEXT PRIMARY KEY NOT NULL,
        path TEXT NOT NULL
    )";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert or replace an environment row.
pub const INSERT_ENVIRONMENT: &str = r"
    INSERT OR REPLACE INTO environments
    (name, version, platform, context, data_portal, api_gateway, variables)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";

/// SQL statement to delete an environment row by identity.
pub const DELETE_ENVIRONMENT: &str = r"
    DELETE FROM environments
    WHERE name = ? AND version = ? AND platform = ?
";
