//! Query engine: natural-language text → ranked, thresholded identifiers.
//!
//! Ranks are assigned *before* the similarity floor is applied, and are not
//! renumbered afterwards. A filtered-out hit therefore leaves a gap in the
//! rank sequence; callers that want dense ranks must renumber themselves.

use serde::Serialize;
use tracing::debug;

use crate::embed::TextEncoder;
use crate::error::{Result, SearchError};
use crate::store::VectorStore;

/// Similarity floor below which (inclusive) results are discarded.
///
/// Policy constant, not a caller-tunable default: there is deliberately no
/// configuration knob for it.
pub const SIMILARITY_FLOOR: f32 = 0.1;

/// Default number of results requested per query. Same policy status as
/// [`SIMILARITY_FLOOR`].
pub const DEFAULT_TOP_K: usize = 50;

/// One ranked hit. Produced fresh per query, never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchResult {
    /// Identifier of the stored vector (the ingested image's path).
    pub identifier: String,
    /// Inner product with the query; cosine similarity in `[-1, 1]` since
    /// both sides are unit vectors.
    pub similarity: f32,
    /// 1-based rank assigned before floor filtering.
    pub rank: usize,
}

/// Resolves text queries against a store snapshot.
pub struct QueryEngine<'a> {
    store: &'a VectorStore,
    encoder: &'a dyn TextEncoder,
}

impl<'a> QueryEngine<'a> {
    /// Build an engine over the given store snapshot and encoder.
    pub fn new(store: &'a VectorStore, encoder: &'a dyn TextEncoder) -> Self {
        Self { store, encoder }
    }

    /// Ranked, floored search.
    ///
    /// An empty store yields an empty vec, not an error; an encoder failure
    /// is a hard error because no result can be meaningful without the
    /// query vector.
    pub fn search(&self, query_text: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        if self.store.is_empty() {
            debug!("query against empty store");
            return Ok(Vec::new());
        }

        let query_vector = self
            .encoder
            .encode(query_text)
            .map_err(SearchError::from)?;

        let hits = self.store.search(&query_vector, top_k)?;

        let results: Vec<SearchResult> = hits
            .into_iter()
            .enumerate()
            .map(|(i, (slot, score))| SearchResult {
                identifier: self
                    .store
                    .identifier(slot)
                    .expect("search returns only valid slots")
                    .to_string(),
                similarity: score,
                rank: i + 1,
            })
            .filter(|r| r.similarity > SIMILARITY_FLOOR)
            .collect();

        debug!(query = query_text, results = results.len(), "query done");
        Ok(results)
    }
}
