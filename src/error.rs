//! Error types for parlor.

use std::io;
use thiserror::Error;

/// Result type alias for parlor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in parlor operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage I/O error.
    #[error("Storage error: {0}")]
    Storage(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A write would exceed the storage byte budget.
    #[error("Storage quota exceeded writing '{key}' ({attempted} bytes, {limit} byte limit)")]
    QuotaExceeded {
        /// Key whose write was rejected.
        key: String,

        /// Total bytes the store would have held after the write.
        attempted: u64,

        /// Configured byte limit.
        limit: u64,
    },

    /// Not a recognized user identity.
    #[error("Unknown user: {0} (expected R or B)")]
    UnknownUser(String),

    /// No viewer is logged in for an operation that needs one.
    #[error("No active viewer: run `parlor login <R|B>` first")]
    NoViewer,

    /// Malformed message id on the command line.
    #[error("Invalid message id: {0}")]
    InvalidMessageId(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
