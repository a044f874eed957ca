//! Storage error types.

/// Errors from preference store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The requested document was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// An I/O operation against the backing medium failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization of the document failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A backend-specific failure.
    #[error("storage error: {0}")]
    Internal(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
