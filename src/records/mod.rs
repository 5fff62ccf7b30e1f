//! Record Store: entity name → ordered review texts from a flat line-oriented source.
//!
//! Each non-empty source line is `<EntityName><separator><review text>`. A missing
//! source degrades to an empty result (see [`RecordStore::fetch`]); a present but
//! unreadable source is reported as [`RecordStoreError::Malformed`].

pub mod error;
pub mod source;
pub mod store;
pub mod types;


pub use error::{RecordStoreError, RecordStoreResult};
pub use source::{FileReviewSource, InMemoryReviewSource, ReviewSource};
pub use store::{RecordStore, match_review_line};
pub use types::{ReviewRecord, ReviewSet};
