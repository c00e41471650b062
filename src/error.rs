//! Error types for the logger

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`Logger`](crate::Logger) operations
#[derive(Debug, Error)]
pub enum LogError {
    /// An explicit destination passed at construction cannot be written
    #[error("invalid log destination {}: {reason}", path.display())]
    InvalidDestination { path: PathBuf, reason: String },

    /// `save_to` was called after the log had already been persisted
    #[error("log may only be saved once")]
    AlreadyPersisted,

    /// An option value was rejected
    #[error("invalid value {value:?} for option '{key}'")]
    InvalidOption { key: String, value: String },

    /// I/O failure while touching the backing file
    #[error("failed to {action} {}: {source}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LogError {
    pub(crate) fn filesystem(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        LogError::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filesystem_error_message() {
        let err = LogError::filesystem(
            "append to",
            "/tmp/LOGabc",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("append to"));
        assert!(msg.contains("/tmp/LOGabc"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_already_persisted_message() {
        assert_eq!(
            LogError::AlreadyPersisted.to_string(),
            "log may only be saved once"
        );
    }
}
