//! Client configuration.
//!
//! The credential and endpoint settings are plain values handed to the
//! provider builder. Only [`ClientConfig::from_env`] reads the process
//! environment.

use crate::error::AiError;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";
/// Optional override for the API base URL.
pub const API_BASE_ENV: &str = "ITINERA_API_BASE";
/// Optional override for the model name.
pub const MODEL_ENV: &str = "ITINERA_MODEL";

/// Groq's OpenAI-compatible endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Settings for the completion client.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl ClientConfig {
    /// Create a config with the default endpoint and model
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Load config from environment variables.
    ///
    /// Required: `GROQ_API_KEY` (non-empty)
    /// Optional: `ITINERA_API_BASE`, `ITINERA_MODEL`
    pub fn from_env() -> Result<Self, AiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load config through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AiError::missing_credential(API_KEY_ENV))?;

        let mut config = Self::new(api_key);

        if let Some(api_base) = lookup(API_BASE_ENV) {
            if api_base.trim().is_empty() {
                return Err(AiError::configuration(format!("{API_BASE_ENV} is empty")));
            }
            config.api_base = api_base;
        }

        if let Some(model) = lookup(MODEL_ENV) {
            if model.trim().is_empty() {
                return Err(AiError::configuration(format!("{MODEL_ENV} is empty")));
            }
            config.model = model;
        }

        Ok(config)
    }

    /// Set API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}
