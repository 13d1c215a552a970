//! Error types for txforge

use thiserror::Error;

/// Result type alias for txforge operations
pub type Result<T> = std::result::Result<T, TxforgeError>;

/// Main error type for txforge
#[derive(Error, Debug)]
pub enum TxforgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid document format: {0}")]
    InvalidFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Archive not found: {0}")]
    ArchiveNotFound(String),
}

impl TxforgeError {
    /// Create an invalid-format error
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }
}
