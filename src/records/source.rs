//! Backing sources for the Record Store.
//!
//! A source yields the whole line-oriented text on each read. Sources are read-only,
//! so one store can serve any number of concurrent runs without locking.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::{RecordStoreError, RecordStoreResult};

/// Provides the raw text the Record Store matches against.
pub trait ReviewSource: Send + Sync {
    /// Reads the full source text.
    ///
    /// Returns [`RecordStoreError::SourceUnavailable`] when the source is absent and
    /// [`RecordStoreError::Malformed`] when it is present but not usable as text.
    fn read_source(&self) -> RecordStoreResult<String>;

    /// Short label for logs.
    fn describe(&self) -> String;
}

/// Reads reviews from a flat text file, one review per line.
#[derive(Debug, Clone)]
pub struct FileReviewSource {
    path: PathBuf,
}

impl FileReviewSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReviewSource for FileReviewSource {
    fn read_source(&self) -> RecordStoreResult<String> {
        if self.path.is_dir() {
            return Err(RecordStoreError::Malformed {
                path: self.path.clone(),
                reason: "path is a directory".to_string(),
            });
        }

        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RecordStoreError::SourceUnavailable {
                    path: self.path.clone(),
                });
            }
            Err(e) => return Err(RecordStoreError::Io(e)),
        };

        String::from_utf8(bytes).map_err(|e| RecordStoreError::Malformed {
            path: self.path.clone(),
            reason: format!("not valid UTF-8 (at byte {})", e.utf8_error().valid_up_to()),
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves reviews from text held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryReviewSource {
    text: Arc<str>,
}

impl InMemoryReviewSource {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self { text: text.into() }
    }

    /// Joins `lines` with newlines.
    pub fn from_lines<I, T>(lines: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let text = lines
            .into_iter()
            .map(|l| l.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Self::new(text)
    }
}

impl ReviewSource for InMemoryReviewSource {
    fn read_source(&self) -> RecordStoreResult<String> {
        Ok(self.text.to_string())
    }

    fn describe(&self) -> String {
        format!("<memory: {} bytes>", self.text.len())
    }
}
