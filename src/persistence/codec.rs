//! Serialization of the store into the coupled artifact pair.
//!
//! # Index artifact layout
//!
//! All multi-byte integers are little-endian.
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │ magic: b"OCIX"                (4 bytes)   │
//! │ version: u32                  (4 bytes)   │
//! │ dimension: u32                (4 bytes)   │
//! │ count: u64                    (8 bytes)   │
//! ├───────────────────────────────────────────┤
//! │ vector data                               │
//! │   count × dimension × f32, insertion order│
//! ├───────────────────────────────────────────┤
//! │ crc32 of all preceding bytes  (4 bytes)   │
//! └───────────────────────────────────────────┘
//! ```
//!
//! # Metadata artifact
//!
//! A JSON array of identifier strings, same order and count as the vector
//! data. JSON rather than binary so the list stays inspectable with any
//! text tool.
//!
//! # Coupling
//!
//! `save` writes the index artifact first, then the metadata artifact, each
//! through a temp-file-then-rename so a crash never leaves a torn file. A
//! crash *between* the two renames still leaves the pair inconsistent; that
//! degraded state is detected on the next `load` by comparing the recovered
//! counts, and the whole pair is discarded.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crc32fast::Hasher as Crc32;
use tracing::{info, warn};

use crate::persistence::error::{PersistenceError, PersistenceResult};
use crate::store::VectorStore;

/// Magic bytes for the index artifact.
pub const INDEX_MAGIC: [u8; 4] = *b"OCIX";

/// Current index artifact format version.
pub const FORMAT_VERSION: u32 = 1;

/// What `load` actually did.
///
/// Load is never fatal: corruption or absence of either artifact degrades to
/// a fresh empty store. This outcome is the side channel that makes the
/// degrade observable to callers and tests instead of silently swallowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Both artifacts parsed and agreed; store reconstructed.
    Loaded { count: usize },
    /// Started over with an empty store.
    Fresh { reason: String },
}

/// Codec for one store's artifact pair.
#[derive(Debug, Clone)]
pub struct IndexCodec {
    index_path: PathBuf,
    metadata_path: PathBuf,
    dimension: usize,
}

impl IndexCodec {
    /// Create a codec for the given artifact paths and vector dimension.
    pub fn new(
        index_path: impl Into<PathBuf>,
        metadata_path: impl Into<PathBuf>,
        dimension: usize,
    ) -> Self {
        Self {
            index_path: index_path.into(),
            metadata_path: metadata_path.into(),
            dimension,
        }
    }

    /// Path of the index artifact.
    #[must_use]
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Path of the metadata artifact.
    #[must_use]
    pub fn metadata_path(&self) -> &Path {
        &self.metadata_path
    }

    /// Write both artifacts.
    ///
    /// Index first, then metadata. Each write is atomic on its own; the pair
    /// is reconciled at load time.
    pub fn save(&self, store: &VectorStore) -> PersistenceResult<()> {
        let mut buf = Vec::with_capacity(20 + store.vector_data().len() * 4 + 4);
        buf.extend_from_slice(&INDEX_MAGIC);
        buf.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        buf.extend_from_slice(&(store.dimension() as u32).to_le_bytes());
        buf.extend_from_slice(&(store.count() as u64).to_le_bytes());
        for value in store.vector_data() {
            buf.extend_from_slice(&value.to_le_bytes());
        }
        let mut hasher = Crc32::new();
        hasher.update(&buf);
        let checksum = hasher.finalize();
        buf.extend_from_slice(&checksum.to_le_bytes());

        atomic_write(&self.index_path, &buf)?;

        let metadata = serde_json::to_vec(store.identifiers())
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;
        atomic_write(&self.metadata_path, &metadata)?;

        Ok(())
    }

    /// Load the store from the artifact pair, degrading to empty on any
    /// failure.
    ///
    /// The `LoadOutcome` reports whether the store was reconstructed or
    /// started fresh; a fresh start is also logged at warn level (or info
    /// when the artifacts simply don't exist yet).
    #[must_use]
    pub fn load(&self) -> (VectorStore, LoadOutcome) {
        if !self.index_path.exists() || !self.metadata_path.exists() {
            info!(
                index = %self.index_path.display(),
                metadata = %self.metadata_path.display(),
                "no persisted index, starting empty"
            );
            return (
                VectorStore::new(self.dimension),
                LoadOutcome::Fresh {
                    reason: "artifacts missing".to_string(),
                },
            );
        }

        match self.try_load() {
            Ok(store) => {
                let count = store.count();
                info!(count, "loaded persisted index");
                (store, LoadOutcome::Loaded { count })
            }
            Err(e) => {
                warn!(error = %e, "failed to load persisted index, starting empty");
                (
                    VectorStore::new(self.dimension),
                    LoadOutcome::Fresh {
                        reason: e.to_string(),
                    },
                )
            }
        }
    }

    fn try_load(&self) -> PersistenceResult<VectorStore> {
        let identifiers = self.read_metadata()?;
        let vectors = self.read_index(identifiers.len())?;
        Ok(VectorStore::from_parts(self.dimension, vectors, identifiers))
    }

    fn read_metadata(&self) -> PersistenceResult<Vec<String>> {
        let raw = fs::read(&self.metadata_path)?;
        serde_json::from_slice(&raw)
            .map_err(|e| PersistenceError::Deserialization(e.to_string()))
    }

    /// Read and validate the index artifact, checking its vector count
    /// against the metadata's identifier count.
    fn read_index(&self, metadata_count: usize) -> PersistenceResult<Vec<f32>> {
        let raw = fs::read(&self.index_path)?;
        let mut cursor = std::io::Cursor::new(&raw);

        let mut magic = [0u8; 4];
        cursor.read_exact(&mut magic)?;
        if magic != INDEX_MAGIC {
            return Err(PersistenceError::Format(format!(
                "bad magic bytes {magic:02x?}"
            )));
        }

        let mut u32_buf = [0u8; 4];
        cursor.read_exact(&mut u32_buf)?;
        let version = u32::from_le_bytes(u32_buf);
        if version != FORMAT_VERSION {
            return Err(PersistenceError::Format(format!(
                "unsupported format version {version}"
            )));
        }

        cursor.read_exact(&mut u32_buf)?;
        let dimension = u32::from_le_bytes(u32_buf) as usize;
        if dimension != self.dimension {
            return Err(PersistenceError::Format(format!(
                "dimension {dimension} does not match expected {}",
                self.dimension
            )));
        }

        let mut u64_buf = [0u8; 8];
        cursor.read_exact(&mut u64_buf)?;
        let count = u64::from_le_bytes(u64_buf) as usize;

        if count != metadata_count {
            return Err(PersistenceError::CountMismatch {
                index_count: count,
                metadata_count,
            });
        }

        let data_len = count
            .checked_mul(dimension)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| PersistenceError::Format("vector data length overflow".into()))?;
        let expected_len = 20 + data_len + 4;
        if raw.len() != expected_len {
            return Err(PersistenceError::Format(format!(
                "file is {} bytes, expected {expected_len}",
                raw.len()
            )));
        }

        let mut hasher = Crc32::new();
        hasher.update(&raw[..20 + data_len]);
        let actual = hasher.finalize();
        let expected = u32::from_le_bytes(
            raw[20 + data_len..]
                .try_into()
                .expect("checksum slice is 4 bytes"),
        );
        if actual != expected {
            return Err(PersistenceError::ChecksumMismatch { expected, actual });
        }

        let mut vectors = Vec::with_capacity(count * dimension);
        for chunk in raw[20..20 + data_len].chunks_exact(4) {
            vectors.push(f32::from_le_bytes(
                chunk.try_into().expect("chunk is 4 bytes"),
            ));
        }
        Ok(vectors)
    }
}

/// Write `data` to `path` via a temp file and rename, so a crash mid-write
/// never leaves a torn artifact behind.
fn atomic_write(path: &Path, data: &[u8]) -> PersistenceResult<()> {
    let tmp = path.with_extension("tmp");
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(data)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}
