use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Failed to create output directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to write summary file '{0}'")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Failed to read summary file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to encode summary")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode summary file '{0}'")]
    Decode(PathBuf, #[source] serde_json::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
