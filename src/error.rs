//! Error types for crosscut.

use std::path::PathBuf;

/// Result type alias for crosscut operations.
///
/// Defaults to [`ReloadError`], the error of the core reload subsystem; the
/// other modules name their error type explicitly.
pub type Result<T, E = ReloadError> = std::result::Result<T, E>;

/// Errors raised by the live properties-reload subsystem.
#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    /// The OS-level watch on a tracked file's directory could not be
    /// established. Fatal to that watcher's construction and never retried
    /// internally; the caller decides whether degraded (non-reloading)
    /// operation is acceptable.
    #[error("failed to set up file watch for {}: {reason}", path.display())]
    WatchSetup {
        /// The file that was to be watched.
        path: PathBuf,
        /// Description of the underlying watch failure.
        reason: String,
    },

    /// A tracked properties file could not be read at reload time.
    #[error("failed to read properties from {}", path.display())]
    Read {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An observable declared more than one on-update hook.
    #[error("observable '{name}' declares more than one on-update hook")]
    DuplicateUpdateHook {
        /// Name the observable was registered under.
        name: String,
    },
}

/// Errors raised by the audit trail.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// The backing store rejected the record.
    #[error("failed to persist audit record: {0}")]
    Save(String),
}

/// Errors raised by token management.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The issuer could not produce a token.
    #[error("failed to obtain access token: {0}")]
    TokenRequest(String),
}

/// Errors raised by tabular export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The sink rejected a sheet or row operation.
    #[error("tabular sink error: {0}")]
    Sink(String),
}
