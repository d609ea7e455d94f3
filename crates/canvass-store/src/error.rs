//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the persistence layer.
///
/// A failed operation affects only itself: in-memory state and other stored
/// files are left exactly as they were.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No stored entry with the given name.
    #[error("no stored entry named '{name}'")]
    NotFound { name: String },

    /// An underlying filesystem operation failed.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored file does not contain the expected entity.
    #[error("malformed store file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Returns `true` when the failure is a missing entry rather than a
    /// broken store.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
