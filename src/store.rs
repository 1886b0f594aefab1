//! Flat exact-search vector store with an aligned identifier list.
//!
//! The store is the one structure in this crate with a real invariant: after
//! any completed operation, `count() == identifiers().len()` and slot `i` of
//! the identifier list names the `i`-th vector ever added. There is no
//! delete and no compaction, so slots are stable for the life of the index.
//!
//! Search is brute-force inner product over every stored vector — exact top-k
//! by construction, O(count × dimension) per query. At the target scale (up
//! to low-millions of 512-dim vectors) that is the intended trade; anything
//! approximate is a different index.

use crate::error::{Result, SearchError};
use crate::simd;

/// Dimension of the embeddings this crate is built around (CLIP ViT-B/32).
pub const EMBEDDING_DIM: usize = 512;

/// Flat inner-product index plus the identifier for each slot.
///
/// Vectors are stored contiguously (slot-major) in a single `Vec<f32>`.
#[derive(Debug, Clone)]
pub struct VectorStore {
    vectors: Vec<f32>,
    identifiers: Vec<String>,
    dimension: usize,
}

impl VectorStore {
    /// Create an empty store for vectors of the given dimension.
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            vectors: Vec::new(),
            identifiers: Vec::new(),
            dimension,
        }
    }

    /// Reconstruct a store from already-validated parts.
    ///
    /// Used by the persistence codec after it has checked that
    /// `vectors.len() == identifiers.len() * dimension`.
    pub(crate) fn from_parts(
        dimension: usize,
        vectors: Vec<f32>,
        identifiers: Vec<String>,
    ) -> Self {
        debug_assert_eq!(vectors.len(), identifiers.len() * dimension);
        Self {
            vectors,
            identifiers,
            dimension,
        }
    }

    /// Vector dimension this store accepts.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored vectors.
    #[must_use]
    pub fn count(&self) -> usize {
        self.identifiers.len()
    }

    /// Whether the store holds no vectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Identifier for a slot, if the slot exists.
    #[must_use]
    pub fn identifier(&self, slot: usize) -> Option<&str> {
        self.identifiers.get(slot).map(String::as_str)
    }

    /// All identifiers in slot order.
    #[must_use]
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Vector stored at a slot, if the slot exists.
    #[must_use]
    pub fn vector(&self, slot: usize) -> Option<&[f32]> {
        if slot >= self.count() {
            return None;
        }
        Some(&self.vectors[slot * self.dimension..(slot + 1) * self.dimension])
    }

    /// Raw vector data in slot order.
    pub(crate) fn vector_data(&self) -> &[f32] {
        &self.vectors
    }

    /// Append a vector and its identifier as the next slot.
    ///
    /// The two appends are atomic with respect to any observer: dimension is
    /// validated before either mutation, and `&mut self` rules out a reader
    /// seeing one list longer than the other.
    pub fn add(&mut self, vector: &[f32], identifier: impl Into<String>) -> Result<()> {
        if vector.len() != self.dimension {
            return Err(SearchError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        self.vectors.extend_from_slice(vector);
        self.identifiers.push(identifier.into());
        debug_assert_eq!(self.vectors.len(), self.identifiers.len() * self.dimension);
        Ok(())
    }

    /// Exact top-k search by inner product.
    ///
    /// Returns up to `min(k, count)` pairs of `(slot, score)` ordered by
    /// descending score; ties break toward the lower slot (first inserted
    /// wins) so repeated searches are deterministic.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(usize, f32)>> {
        if self.is_empty() {
            return Err(SearchError::EmptyStore);
        }
        if query.len() != self.dimension {
            return Err(SearchError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .chunks_exact(self.dimension)
            .map(|v| simd::dot(query, v))
            .enumerate()
            .collect();

        // Descending score, ascending slot on ties. Scores come from finite
        // inputs, so the partial compare only falls through on NaN.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(k.min(self.count()));
        Ok(scored)
    }
}
