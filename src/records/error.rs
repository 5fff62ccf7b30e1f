use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the Record Store backing source.
#[derive(Debug, Error)]
pub enum RecordStoreError {
    /// The backing source does not exist. [`RecordStore::fetch`](super::RecordStore::fetch)
    /// absorbs this into an empty result.
    #[error("review source unavailable: {path}")]
    SourceUnavailable { path: PathBuf },

    /// The backing source exists but cannot be read as line-oriented text.
    #[error("review source {path} is malformed: {reason}")]
    Malformed { path: PathBuf, reason: String },

    /// Any other I/O failure while reading a present source.
    #[error("I/O error reading review source: {0}")]
    Io(#[from] std::io::Error),
}

impl RecordStoreError {
    /// Returns `true` for the degrade-to-empty case.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, RecordStoreError::SourceUnavailable { .. })
    }
}

/// Result alias for Record Store operations.
pub type RecordStoreResult<T> = Result<T, RecordStoreError>;
