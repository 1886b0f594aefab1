//! Error types for ocular.

use std::fmt;

/// Errors that can occur during store/search operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Vector length does not match the store dimension.
    DimensionMismatch { expected: usize, actual: usize },
    /// Search against a store with no vectors. Callers must treat this as
    /// "no results", not a hard failure.
    EmptyStore,
    /// Text or image encoding collaborator failed.
    Encoding(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::DimensionMismatch { expected, actual } => write!(
                f,
                "Dimension mismatch: store expects {expected} dimensions, vector has {actual}",
            ),
            SearchError::EmptyStore => write!(f, "Store is empty"),
            SearchError::Encoding(msg) => write!(f, "Encoding failed: {msg}"),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<crate::embed::EmbedError> for SearchError {
    fn from(e: crate::embed::EmbedError) -> Self {
        SearchError::Encoding(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
