//! Persists [`PeriodSummary`] values as pretty-printed JSON documents, one file per key.

use crate::storage::error::StorageError;
use crate::types::summary::PeriodSummary;
use log::{debug, info};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::{fs, task};

/// Folder used by [`SummaryStore::new`], relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "json";

/// A folder of JSON summaries keyed by a caller-chosen identifier, typically
/// [`crate::LocationQuery::storage_key`].
///
/// Files are written to a temporary file in the same folder first and then moved into place,
/// so a reader never sees a half-written summary.
#[derive(Debug, Clone)]
pub struct SummaryStore {
    folder: PathBuf,
}

impl Default for SummaryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryStore {
    pub fn new() -> Self {
        Self::with_folder(DEFAULT_OUTPUT_DIR)
    }

    pub fn with_folder(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// The file a summary stored under `key` lives in: `<folder>/<key>.json`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for empty keys, `.`/`..`, and keys containing path
    /// separators or NUL bytes.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let invalid = key.is_empty()
            || key == "."
            || key == ".."
            || key.contains(['/', '\\', '\0']);
        if invalid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.folder.join(format!("{key}.json")))
    }

    /// Writes `summary` under `key`, replacing any previous summary with that key.
    ///
    /// Returns the path of the written file.
    ///
    /// # Errors
    ///
    /// * [`StorageError::InvalidKey`] if `key` can't be used as a file name.
    /// * [`StorageError::DirCreation`] if the folder can't be created.
    /// * [`StorageError::Write`] if the file can't be written.
    pub async fn save(&self, key: &str, summary: &PeriodSummary) -> Result<PathBuf, StorageError> {
        let path = self.path_for(key)?;
        let bytes = serde_json::to_vec_pretty(summary).map_err(StorageError::Encode)?;

        fs::create_dir_all(&self.folder)
            .await
            .map_err(|e| StorageError::DirCreation(self.folder.clone(), e))?;

        let folder = self.folder.clone();
        let target = path.clone();
        task::spawn_blocking(move || {
            let mut file =
                NamedTempFile::new_in(&folder).map_err(|e| StorageError::Write(target.clone(), e))?;
            file.write_all(&bytes)
                .and_then(|_| file.flush())
                .map_err(|e| StorageError::Write(target.clone(), e))?;
            file.persist(&target)
                .map_err(|e| StorageError::Write(target.clone(), e.error))?;
            Ok::<(), StorageError>(())
        })
        .await??;

        info!("Saved forecast summary to {}", path.display());
        Ok(path)
    }

    /// Reads the summary stored under `key`.
    ///
    /// # Errors
    ///
    /// * [`StorageError::InvalidKey`] if `key` can't be used as a file name.
    /// * [`StorageError::Read`] if the file doesn't exist or can't be read.
    /// * [`StorageError::Decode`] if the file isn't a summary document.
    pub async fn load(&self, key: &str) -> Result<PeriodSummary, StorageError> {
        let path = self.path_for(key)?;
        let bytes = fs::read(&path)
            .await
            .map_err(|e| StorageError::Read(path.clone(), e))?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        serde_json::from_slice(&bytes).map_err(|e| StorageError::Decode(path, e))
    }
}
