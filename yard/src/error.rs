//! Error types for the yard library.
//!
//! This module provides the error hierarchy for all operations in the
//! yard library, using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Result type alias for operations that may fail with a yard error.
///
/// # Examples
///
/// ```
/// use yard::{Error, Result};
///
/// fn example_operation() -> Result<u16> {
///     Ok(8080)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the yard library.
///
/// This enum encompasses all possible error conditions that can occur
/// while managing environment deployments.
#[derive(Debug, Error)]
pub enum Error {
    /// A registry storage error occurred.
    #[error("registry error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A stored variables blob could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A backend command exited with a failure status.
    #[error("backend command '{command}' failed: {message}")]
    BackendCommandFailed {
        /// The command that failed.
        command: String,
        /// The backend's own failure message, verbatim.
        message: String,
    },

    /// A cluster context could not be switched to.
    #[error("cluster context unavailable: {context}")]
    ContextUnavailable {
        /// The context that could not be reached.
        context: String,
    },

    /// No non-conflicting port could be found.
    #[error("no available port found after {attempts} attempt(s)")]
    NoPortFound {
        /// Number of allocation attempts made.
        attempts: usize,
    },

    /// An unrecognized platform tag was encountered.
    #[error("unknown platform: {value}")]
    PlatformUnknown {
        /// The unrecognized tag.
        value: String,
    },

    /// Another operation on the same environment identity is in flight.
    #[error("operation already in progress for {environment}")]
    OperationInProgress {
        /// The environment identity that is locked.
        environment: String,
    },
}

impl Error {
    /// Check if error indicates a missing environment or resource.
    ///
    /// # Examples
    ///
    /// ```
    /// use yard::Error;
    ///
    /// let err = Error::NotFound { resource: "atlas@1.2 (compose)".into() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error came from a failed backend command.
    #[must_use]
    pub fn is_backend_failure(&self) -> bool {
        matches!(self, Self::BackendCommandFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_command_failed_display() {
        let err = Error::BackendCommandFailed {
            command: "compose-provisioner create".to_string(),
            message: "network unreachable".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("compose-provisioner create"));
        assert!(display.contains("network unreachable"));
    }

    #[test]
    fn test_not_found_display() {
        let err = Error::NotFound {
            resource: "environment atlas@1.2".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("not found"));
        assert!(display.contains("atlas@1.2"));
    }

    #[test]
    fn test_no_port_found_display() {
        let err = Error::NoPortFound { attempts: 10 };
        let display = format!("{err}");
        assert!(display.contains("10 attempt"));
    }

    #[test]
    fn test_platform_unknown_display() {
        let err = Error::PlatformUnknown {
            value: "bare-metal".to_string(),
        };
        assert!(format!("{err}").contains("bare-metal"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
    }

    #[test]
    fn test_is_not_found() {
        let err = Error::NotFound {
            resource: "x".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_backend_failure());
    }

    #[test]
    fn test_operation_in_progress_display() {
        let err = Error::OperationInProgress {
            environment: "atlas@1.2 (cluster)".to_string(),
        };
        assert!(format!("{err}").contains("already in progress"));
    }
}
