//! ocular: exact-search semantic image index.
//!
//! Images go in as fixed-length unit embeddings (plus optional extracted
//! text), accumulate in a flat inner-product index that is persisted after
//! every append, and come back out as ranked answers to natural-language
//! queries.
//!
//! The embedding model, the text encoder, and the OCR step are external
//! collaborators behind the traits in [`embed`]; everything in this crate is
//! the index lifecycle around them:
//!
//! - [`store`]: the flat index and its identifier-alignment invariant
//! - [`persistence`]: durable round-trip of the index/metadata artifact pair
//! - [`ingest`]: one image → stored vector + optional text, durably
//! - [`query`]: text → ranked, similarity-floored identifiers
//! - [`service`]: a process-lifetime facade owning the store and collaborators
//!
//! # Critical nuance
//!
//! All scoring is plain inner product. That equals cosine similarity only
//! because the embedding producers guarantee unit-normalized vectors; the
//! store itself never re-checks norms. Feed it unnormalized vectors and the
//! ranking is garbage with no error to tell you so.

pub mod config;
pub mod embed;
pub mod error;
pub mod ingest;
pub mod persistence;
pub mod query;
pub mod service;
pub mod simd;
pub mod store;

pub use config::ServiceConfig;
pub use embed::{EmbedError, ImageEmbedder, TextEncoder, TextExtractor};
pub use error::{Result, SearchError};
pub use ingest::IngestOutcome;
pub use persistence::{IndexCodec, LoadOutcome, PersistenceError};
pub use query::{SearchResult, DEFAULT_TOP_K, SIMILARITY_FLOOR};
pub use service::ImageSearchService;
pub use store::{VectorStore, EMBEDDING_DIM};
