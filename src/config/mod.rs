//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `SAVOR_*` environment variables.
//! Credentials and model selection are read once here and injected into the
//! workers; nothing below this layer looks at the environment.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::{DEFAULT_DATA_PATH, DEFAULT_MODEL, DEFAULT_REPLY_CEILING};
use crate::pipeline::StageKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which worker implementation drives the stages.
pub enum AgentBackend {
    /// LLM-backed workers through the `genai` client.
    Genai,
    /// Deterministic workers that need no backend.
    Offline,
}

impl std::str::FromStr for AgentBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "genai" | "llm" => Ok(Self::Genai),
            "offline" | "local" => Ok(Self::Offline),
            _ => Err(ConfigError::UnknownAgentBackend {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for AgentBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentBackend::Genai => write!(f, "genai"),
            AgentBackend::Offline => write!(f, "offline"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Maximum worker turns per stage.
pub struct ReplyCeilings {
    pub fetch: u32,
    pub analyze: u32,
    pub score: u32,
}

impl ReplyCeilings {
    /// Uses the same ceiling for every stage.
    pub fn uniform(ceiling: u32) -> Self {
        Self {
            fetch: ceiling,
            analyze: ceiling,
            score: ceiling,
        }
    }

    /// Returns the ceiling for `stage`.
    pub fn for_stage(&self, stage: StageKind) -> u32 {
        match stage {
            StageKind::Fetch => self.fetch,
            StageKind::Analyze => self.analyze,
            StageKind::Score => self.score,
        }
    }
}

impl Default for ReplyCeilings {
    fn default() -> Self {
        Self::uniform(DEFAULT_REPLY_CEILING)
    }
}

/// Process configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SAVOR_*` overrides on top of defaults.
#[derive(Clone)]
pub struct Config {
    /// Record Store backing file. Default: `restaurant-data.txt`.
    pub data_path: PathBuf,

    /// Model identifier for LLM-backed workers. Default: `gpt-4o-mini`.
    pub model: String,

    /// Credential token for the LLM backend.
    pub api_key: Option<String>,

    /// Optional backend endpoint override (OpenAI-compatible base URL).
    pub endpoint: Option<String>,

    /// Per-stage reply ceilings. Default: `3` for every stage.
    pub reply_ceilings: ReplyCeilings,

    /// Worker implementation. Default: `Genai` if a credential is set, else `Offline`.
    pub agent_backend: AgentBackend,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("data_path", &self.data_path)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("reply_ceilings", &self.reply_ceilings)
            .field("agent_backend", &self.agent_backend)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            endpoint: None,
            reply_ceilings: ReplyCeilings::default(),
            agent_backend: AgentBackend::Offline,
        }
    }
}

impl Config {
    const ENV_DATA_PATH: &'static str = "SAVOR_DATA_PATH";
    const ENV_MODEL: &'static str = "SAVOR_MODEL";
    const ENV_API_KEY: &'static str = "SAVOR_API_KEY";
    const ENV_FALLBACK_API_KEY: &'static str = "OPENAI_API_KEY";
    const ENV_ENDPOINT: &'static str = "SAVOR_ENDPOINT";
    const ENV_REPLY_CEILING: &'static str = "SAVOR_REPLY_CEILING";
    const ENV_FETCH_REPLY_CEILING: &'static str = "SAVOR_FETCH_REPLY_CEILING";
    const ENV_ANALYZE_REPLY_CEILING: &'static str = "SAVOR_ANALYZE_REPLY_CEILING";
    const ENV_SCORE_REPLY_CEILING: &'static str = "SAVOR_SCORE_REPLY_CEILING";
    const ENV_AGENT_BACKEND: &'static str = "SAVOR_AGENT_BACKEND";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_path = Self::parse_path_from_env(Self::ENV_DATA_PATH, defaults.data_path);
        let model = Self::parse_string_from_env(Self::ENV_MODEL, defaults.model);
        let api_key = Self::parse_optional_string_from_env(Self::ENV_API_KEY)
            .or_else(|| Self::parse_optional_string_from_env(Self::ENV_FALLBACK_API_KEY));
        let endpoint = Self::parse_optional_string_from_env(Self::ENV_ENDPOINT);

        let base = Self::parse_ceiling_from_env(
            Self::ENV_REPLY_CEILING,
            defaults.reply_ceilings.fetch,
        )?;
        let reply_ceilings = ReplyCeilings {
            fetch: Self::parse_ceiling_from_env(Self::ENV_FETCH_REPLY_CEILING, base)?,
            analyze: Self::parse_ceiling_from_env(Self::ENV_ANALYZE_REPLY_CEILING, base)?,
            score: Self::parse_ceiling_from_env(Self::ENV_SCORE_REPLY_CEILING, base)?,
        };

        let agent_backend = match Self::parse_optional_string_from_env(Self::ENV_AGENT_BACKEND) {
            Some(value) => value.parse()?,
            None if api_key.is_some() => AgentBackend::Genai,
            None => AgentBackend::Offline,
        };

        Ok(Self {
            data_path,
            model,
            api_key,
            endpoint,
            reply_ceilings,
            agent_backend,
        })
    }

    /// Validates basic invariants (does not touch the backing file's contents).
    ///
    /// A missing data file is allowed: the Record Store degrades to empty results.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_path.exists() && !self.data_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.data_path.clone(),
            });
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        if let Some(ref endpoint) = self.endpoint
            && !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ConfigError::InvalidEndpoint {
                value: endpoint.clone(),
            });
        }

        if self.agent_backend == AgentBackend::Genai && self.api_key.is_none() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_API_KEY,
            });
        }

        for (name, value) in [
            (Self::ENV_FETCH_REPLY_CEILING, self.reply_ceilings.fetch),
            (Self::ENV_ANALYZE_REPLY_CEILING, self.reply_ceilings.analyze),
            (Self::ENV_SCORE_REPLY_CEILING, self.reply_ceilings.score),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidReplyCeiling {
                    name,
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Builds a config for tests: offline workers over `data_path`.
    pub fn offline(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            ..Default::default()
        }
    }

    fn parse_ceiling_from_env(name: &'static str, default: u32) -> Result<u32, ConfigError> {
        match env::var(name) {
            Ok(value) => {
                let ceiling: u32 =
                    value
                        .trim()
                        .parse()
                        .map_err(|e| ConfigError::ReplyCeilingParseError {
                            name,
                            value: value.clone(),
                            source: e,
                        })?;

                if ceiling == 0 {
                    return Err(ConfigError::InvalidReplyCeiling { name, value });
                }

                Ok(ceiling)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }
}
