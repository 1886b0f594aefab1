//! Ingest pipeline: one image in, one stored-and-persisted vector out.
//!
//! Failure handling is deliberately lopsided:
//!
//! - embedding failure aborts the ingest and leaves the store untouched;
//! - text-extraction failure is invisible (the extractor contract already
//!   maps it to an empty string);
//! - save failure after a successful add is a *warning*, not a failure — the
//!   vector is usable for the rest of the process even if durability was
//!   lost.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::embed::{ImageEmbedder, TextExtractor};
use crate::persistence::IndexCodec;
use crate::store::VectorStore;

/// Structured result of one ingest call. Never persisted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IngestOutcome {
    /// Identifier the vector was stored under (the input path).
    pub identifier: String,
    /// Whether the vector made it into the in-memory store.
    pub success: bool,
    /// Extracted text, absent when extraction found nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    /// Failure description when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Non-fatal degradation, currently only "saved to memory but not disk".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl IngestOutcome {
    fn failure(path: &Path, error: String) -> Self {
        Self {
            identifier: path.display().to_string(),
            success: false,
            extracted_text: None,
            error: Some(error),
            warning: None,
        }
    }
}

/// Orchestrates embed → extract → add → save for one input.
pub struct IngestPipeline<'a> {
    embedder: &'a dyn ImageEmbedder,
    extractor: &'a dyn TextExtractor,
    codec: &'a IndexCodec,
}

impl<'a> IngestPipeline<'a> {
    /// Build a pipeline over the given collaborators and codec.
    pub fn new(
        embedder: &'a dyn ImageEmbedder,
        extractor: &'a dyn TextExtractor,
        codec: &'a IndexCodec,
    ) -> Self {
        Self {
            embedder,
            extractor,
            codec,
        }
    }

    /// Ingest one image into `store`.
    ///
    /// No partial success: either the outcome reports `success: false` and
    /// the store is untouched, or the vector and its identifier are both in
    /// the store (and a persistence attempt has been made).
    pub fn ingest(&self, store: &mut VectorStore, path: &Path) -> IngestOutcome {
        let embedding = match self.embedder.embed_image(path) {
            Ok(v) => v,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "embedding failed");
                return IngestOutcome::failure(path, e.to_string());
            }
        };

        // Extraction never aborts an ingest; "no text" and "extractor broke"
        // are the same empty string.
        let text = self.extractor.extract_text(path);

        let identifier = path.display().to_string();
        if let Err(e) = store.add(&embedding, identifier.clone()) {
            // Wrong-size embedding: a collaborator contract violation, fatal
            // to this ingest but captured like any other failure.
            return IngestOutcome::failure(path, e.to_string());
        }

        let warning = match self.codec.save(store) {
            Ok(()) => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "index saved to memory but not to disk");
                Some(format!("persistence failed: {e}"))
            }
        };

        debug!(path = %path.display(), count = store.count(), "ingested image");
        IngestOutcome {
            identifier,
            success: true,
            extracted_text: (!text.is_empty()).then_some(text),
            error: None,
            warning,
        }
    }
}
