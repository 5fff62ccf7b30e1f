//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reply ceiling is zero (a stage must be allowed at least one turn).
    #[error("invalid reply ceiling '{value}' for {name}: must be at least 1")]
    InvalidReplyCeiling { name: &'static str, value: String },

    /// Reply ceiling string could not be parsed as a number.
    #[error("failed to parse reply ceiling '{value}' for {name}: {source}")]
    ReplyCeilingParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Agent backend name is not recognized.
    #[error("unknown agent backend '{value}': expected 'genai' or 'offline'")]
    UnknownAgentBackend { value: String },

    /// Endpoint does not look like an HTTP(S) URL.
    #[error("invalid endpoint '{value}': must start with http:// or https://")]
    InvalidEndpoint { value: String },

    /// The LLM-backed agents were selected but no credential is configured.
    #[error("missing required environment variable: {name}")]
    MissingEnvVar { name: &'static str },

    /// Model identifier is empty.
    #[error("model identifier must not be empty")]
    EmptyModel,

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },
}
