//! Service configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Where the artifact pair lives.
///
/// Defaults match the reference deployment's working-directory files.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Path of the binary index artifact.
    pub index_path: PathBuf,
    /// Path of the JSON identifier-list artifact.
    pub metadata_path: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from("image_index.bin"),
            metadata_path: PathBuf::from("image_metadata.json"),
        }
    }
}

impl ServiceConfig {
    /// Place both artifacts under `dir` with the default file names.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            index_path: dir.join("image_index.bin"),
            metadata_path: dir.join("image_metadata.json"),
        }
    }
}
