//! Error types for survey runs.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for survey operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing or running a survey.
#[derive(Debug, Error)]
pub enum Error {
    /// The trace could not be read or parsed
    #[error("Trace error: {0}")]
    Trace(#[from] waymark_gpx::Error),

    /// An input file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema document is structurally wrong
    #[error("Invalid schema entry {entry:?}: {reason}")]
    Schema { entry: String, reason: String },

    /// The node snapshot is structurally wrong
    #[error("Invalid node snapshot: {0}")]
    Snapshot(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn schema(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Schema {
            entry: entry.into(),
            reason: reason.into(),
        }
    }
}
