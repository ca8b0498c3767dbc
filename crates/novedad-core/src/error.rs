//! Error types for novedad-core

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using novedad-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or persisting local files
#[derive(Error, Debug)]
pub enum Error {
    /// A local file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A local file does not hold the expected JSON
    #[error("Invalid JSON in {}: {source}", path.display())]
    ParseFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
