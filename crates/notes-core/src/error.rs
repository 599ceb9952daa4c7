//! Error types for notes-core

use thiserror::Error;

/// Result type alias using notes-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notes-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key-value store rejected the operation
    #[error("Storage error: {0}")]
    Storage(String),
}
