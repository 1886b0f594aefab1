//! Error types for persistence operations.

use thiserror::Error;

/// Errors that can occur while saving or loading the artifact pair.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// I/O error (file operations, disk I/O)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Format error (invalid magic bytes, version mismatch, truncation)
    #[error("format error: {0}")]
    Format(String),

    /// Serialization error (metadata encoding)
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error (metadata decoding)
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Checksum mismatch (data corruption detected)
    #[error("checksum mismatch: expected {expected:08x}, got {actual:08x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    /// Index and metadata artifacts disagree on vector count
    #[error("artifact mismatch: index holds {index_count} vectors, metadata lists {metadata_count}")]
    CountMismatch {
        index_count: usize,
        metadata_count: usize,
    },
}

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;
