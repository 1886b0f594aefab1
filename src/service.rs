//! Process-lifetime service facade.
//!
//! One `ImageSearchService` instance owns the store, the collaborator
//! handles, and the codec for its artifact pair — constructed explicitly and
//! passed around, never an ambient singleton. The store loads once at
//! construction and lives until the process exits.
//!
//! # Locking
//!
//! A single `RwLock` guards all store mutation. `ingest` holds the write
//! lock across the whole pipeline, so the add-then-persist sequence can
//! never interleave with another append; `query` takes the read lock and
//! sees only fully-appended snapshots. Cancelling an ingest before its
//! `add` runs leaves the store untouched — the pipeline performs no store
//! mutation before that point.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::ServiceConfig;
use crate::embed::{ImageEmbedder, TextEncoder, TextExtractor};
use crate::error::Result;
use crate::ingest::{IngestOutcome, IngestPipeline};
use crate::persistence::{IndexCodec, LoadOutcome};
use crate::query::{QueryEngine, SearchResult};
use crate::store::{VectorStore, EMBEDDING_DIM};

/// Owns the vector store and the external model collaborators.
pub struct ImageSearchService {
    store: RwLock<VectorStore>,
    codec: IndexCodec,
    embedder: Arc<dyn ImageEmbedder>,
    encoder: Arc<dyn TextEncoder>,
    extractor: Arc<dyn TextExtractor>,
}

impl ImageSearchService {
    /// Open the service, loading any persisted index.
    ///
    /// Returns the service together with the load outcome so callers can
    /// observe (and tests can assert) a degrade-to-empty start.
    pub fn open(
        config: &ServiceConfig,
        embedder: Arc<dyn ImageEmbedder>,
        encoder: Arc<dyn TextEncoder>,
        extractor: Arc<dyn TextExtractor>,
    ) -> (Self, LoadOutcome) {
        let codec = IndexCodec::new(&config.index_path, &config.metadata_path, EMBEDDING_DIM);
        let (store, outcome) = codec.load();
        (
            Self {
                store: RwLock::new(store),
                codec,
                embedder,
                encoder,
                extractor,
            },
            outcome,
        )
    }

    /// Ingest one image: embed, extract text, append, persist.
    ///
    /// The write lock spans the pipeline, so no other append and no reader
    /// can interleave with the add-then-persist sequence.
    pub fn ingest(&self, path: impl AsRef<Path>) -> IngestOutcome {
        let path = path.as_ref();
        let pipeline = IngestPipeline::new(&*self.embedder, &*self.extractor, &self.codec);
        let mut store = self.store.write();
        pipeline.ingest(&mut store, path)
    }

    /// Answer a natural-language query with ranked, floored results.
    ///
    /// Callers without a preference for `top_k` should pass
    /// [`crate::query::DEFAULT_TOP_K`].
    pub fn query(&self, text: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        let store = self.store.read();
        QueryEngine::new(&store, &*self.encoder).search(text, top_k)
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.store.read().count()
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }
}
