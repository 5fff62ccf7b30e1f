use tracing::{debug, warn};

use crate::constants::ENTITY_SEPARATORS;

use super::error::RecordStoreResult;
use super::source::{FileReviewSource, ReviewSource};
use super::types::ReviewSet;

/// Resolves entity names to their reviews.
///
/// Matching is a case-insensitive prefix test on each trimmed line. The matched
/// prefix and one following separator are removed and the remainder is trimmed.
#[derive(Debug, Clone)]
pub struct RecordStore<S = FileReviewSource> {
    source: S,
}

impl RecordStore<FileReviewSource> {
    /// Creates a store backed by the file at `path`.
    pub fn from_path(path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(FileReviewSource::new(path))
    }
}

impl<S: ReviewSource> RecordStore<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the reviews for `entity_name`, degrading to an empty set when the
    /// source is missing.
    ///
    /// The missing-source case is reported only through a `warn!` event; the return
    /// shape matches an entity with no reviews. A present but malformed source is
    /// still an error.
    pub fn fetch(&self, entity_name: &str) -> RecordStoreResult<ReviewSet> {
        match self.load(entity_name) {
            Ok(set) => Ok(set),
            Err(e) if e.is_source_unavailable() => {
                warn!(
                    entity = %entity_name,
                    source = %self.source.describe(),
                    "Review source unavailable, returning no reviews"
                );
                Ok(ReviewSet::empty(entity_name))
            }
            Err(e) => Err(e),
        }
    }

    /// Strict variant of [`fetch`](Self::fetch): a missing source is an error.
    pub fn load(&self, entity_name: &str) -> RecordStoreResult<ReviewSet> {
        let text = self.source.read_source()?;

        if entity_name.trim().is_empty() {
            debug!("Blank entity name matches no reviews");
            return Ok(ReviewSet::empty(entity_name));
        }

        let texts: Vec<&str> = text
            .lines()
            .filter_map(|line| match_review_line(line, entity_name))
            .collect();

        debug!(
            entity = %entity_name,
            reviews = texts.len(),
            "Matched reviews"
        );

        Ok(ReviewSet::from_texts(entity_name, texts))
    }
}

/// Returns the review text of `line` if it belongs to `entity_name`.
///
/// Lines whose remainder is empty after stripping carry no review and are skipped.
pub fn match_review_line<'a>(line: &'a str, entity_name: &str) -> Option<&'a str> {
    let rest = strip_prefix_ignore_case(line.trim(), entity_name)?;
    let rest = rest.trim_start();
    let rest = rest.strip_prefix(ENTITY_SEPARATORS).unwrap_or(rest).trim();

    if rest.is_empty() { None } else { Some(rest) }
}

fn strip_prefix_ignore_case<'a>(haystack: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = haystack;
    for pc in prefix.chars() {
        let mut chars = rest.chars();
        let hc = chars.next()?;
        if !hc.to_lowercase().eq(pc.to_lowercase()) {
            return None;
        }
        rest = chars.as_str();
    }
    Some(rest)
}
