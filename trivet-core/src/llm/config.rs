//! Model provider configuration from environment variables.

use std::env;
use thiserror::Error;

/// Default Anthropic API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Model provider configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl LlmConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `ANTHROPIC_API_KEY`: API key for the model provider
    ///
    /// Optional:
    /// - `TRIVET_AI_MODEL`: Model name (default: "claude-sonnet-4-20250514")
    /// - `TRIVET_AI_BASE_URL`: API base URL (default: "https://api.anthropic.com")
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("ANTHROPIC_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("ANTHROPIC_API_KEY".to_string()))?;

        let model = env::var("TRIVET_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url =
            env::var("TRIVET_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }
}
