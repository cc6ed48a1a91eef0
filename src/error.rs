//! Error types for the stretch conversion tool
//!
//! Provides structured error types for inventory resolution, topology
//! validation, and management-plane submission.

use crate::domain::ports::TypeTag;
use thiserror::Error;

/// Unified error type for the tool
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    // =========================================================================
    // Resolution Errors
    // =========================================================================
    #[error("No inventory object matches path: {path}")]
    NotFound { path: String },

    #[error("Inventory path is ambiguous: {path} ({matches} matches)")]
    AmbiguousPath { path: String, matches: usize },

    #[error("Inventory object has wrong type: {path} is a {actual}, expected {expected}")]
    WrongType {
        path: String,
        expected: TypeTag,
        actual: TypeTag,
    },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Topology validation failed: {0}")]
    ValidationFailed(String),

    // =========================================================================
    // Management Plane Errors
    // =========================================================================
    #[error("Request rejected by management plane: {code}: {message}")]
    RequestRejected { code: String, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    // =========================================================================
    // Cancellation
    // =========================================================================
    #[error("Operation cancelled")]
    Cancelled,
}

impl Error {
    /// Process exit code for this error, used only at the CLI boundary
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Configuration(_) => 2,

            Error::NotFound { .. }
            | Error::AmbiguousPath { .. }
            | Error::WrongType { .. } => 3,

            Error::ValidationFailed(_) => 4,

            Error::RequestRejected { .. } => 5,

            Error::Transport(_) | Error::Protocol(_) => 6,

            // 128 + SIGINT
            Error::Cancelled => 130,
        }
    }

    /// True when the error guarantees no conversion request reached the
    /// management plane
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::Configuration(_)
                | Error::NotFound { .. }
                | Error::AmbiguousPath { .. }
                | Error::WrongType { .. }
                | Error::ValidationFailed(_)
        )
    }
}

/// Result type alias for the tool
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = Error::NotFound {
            path: "/dc1/host/cluster1".into(),
        };
        assert_eq!(err.exit_code(), 3);

        let err = Error::ValidationFailed("witness overlaps fault domain".into());
        assert_eq!(err.exit_code(), 4);

        let err = Error::RequestRejected {
            code: "InvalidArgument".into(),
            message: "cluster already stretched".into(),
        };
        assert_eq!(err.exit_code(), 5);

        assert_eq!(Error::Cancelled.exit_code(), 130);
    }

    #[test]
    fn test_is_local() {
        let local = Error::AmbiguousPath {
            path: "/dc1/host/*".into(),
            matches: 2,
        };
        assert!(local.is_local());

        let local = Error::ValidationFailed("empty fault domain".into());
        assert!(local.is_local());

        let remote = Error::RequestRejected {
            code: "Fault".into(),
            message: "rejected".into(),
        };
        assert!(!remote.is_local());
        assert!(!Error::Cancelled.is_local());
    }
}
