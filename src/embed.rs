//! Collaborator seams for the external model capabilities.
//!
//! The embedding model, text encoder, and OCR reader live outside this crate
//! (in the reference deployment: CLIP ViT-B/32 and an OCR engine). The store
//! only ever sees their outputs through these traits, which keeps the index
//! lifecycle testable with deterministic fakes.
//!
//! Contract expected of implementations: embeddings are `EMBEDDING_DIM`-long
//! and L2-normalized to unit length at creation. The store does not re-check
//! norms (see the crate-level nuance note).

use std::path::Path;

use thiserror::Error;

/// Failure from an embedding or encoding collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct EmbedError(pub String);

impl EmbedError {
    /// Build an error from any displayable cause.
    pub fn new(msg: impl std::fmt::Display) -> Self {
        Self(msg.to_string())
    }
}

/// Produces a unit embedding for an image file.
pub trait ImageEmbedder: Send + Sync {
    /// Embed the image at `path` into a unit vector.
    fn embed_image(&self, path: &Path) -> Result<Vec<f32>, EmbedError>;
}

/// Produces a unit embedding for a natural-language query.
pub trait TextEncoder: Send + Sync {
    /// Encode `text` into a unit vector in the same space as the images.
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbedError>;
}

/// Extracts visible text from an image file.
///
/// Infallible by contract: implementations swallow their own failures and
/// return an empty string for "no text" and "extraction failed" alike. The
/// reference OCR wrapper also drops detections below 0.5 confidence before
/// joining the rest with spaces; that filtering belongs to implementations,
/// not to this seam.
pub trait TextExtractor: Send + Sync {
    /// Extract text from the image at `path`, or `""`.
    fn extract_text(&self, path: &Path) -> String;
}
