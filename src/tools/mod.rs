//! Capability registration: typed, named operations handed to a stage's worker.
//!
//! Each stage is constructed with a [`ToolRegistry`] listing exactly the operations
//! its worker may call. Workers see the [`ToolSpec`]s; the orchestrator executes
//! the calls and feeds results back.

pub mod builtin;
pub mod error;
pub mod registry;


pub use builtin::{ExtractRatingsTool, FetchReviewsTool, OverallScoreTool};
pub use error::ToolError;
pub use registry::{Tool, ToolRegistry, ToolSpec};
