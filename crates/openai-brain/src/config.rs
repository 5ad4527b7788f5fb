//! Connection settings for the completions endpoint.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use brain_core::BrainError;

pub const DEFAULT_API_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o";

const DEFAULT_MAX_TOKENS: u32 = 1024;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct OpenAiBrainConfig {
    /// Base URL; `/v1/chat/completions` is appended.
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: Option<u32>,
    /// Sampling temperature, 0.0 to 2.0.
    pub temperature: Option<f32>,
    /// Transport-level timeout for one HTTP request. The extractor applies
    /// its own, usually shorter, deadline on top.
    pub request_timeout: Duration,
}

impl Default for OpenAiBrainConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            temperature: Some(DEFAULT_TEMPERATURE),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Parse an optional variable, ignoring values that don't parse.
fn parsed_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl OpenAiBrainConfig {
    /// Read settings from the environment.
    ///
    /// `OPENAI_API_KEY` is required; a missing or blank key is a
    /// [`BrainError::Configuration`], which callers treat as "run without a
    /// model". Optional: `OPENAI_API_URL`, `OPENAI_MODEL`,
    /// `OPENAI_MAX_TOKENS`, `OPENAI_TEMPERATURE`, `OPENAI_REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, BrainError> {
        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| BrainError::Configuration("OPENAI_API_KEY not set".to_string()))?;

        let defaults = Self::default();
        Ok(Self {
            api_url: env::var("OPENAI_API_URL").unwrap_or(defaults.api_url),
            api_key,
            model: env::var("OPENAI_MODEL").unwrap_or(defaults.model),
            max_tokens: parsed_var("OPENAI_MAX_TOKENS").or(defaults.max_tokens),
            temperature: parsed_var("OPENAI_TEMPERATURE").or(defaults.temperature),
            request_timeout: parsed_var("OPENAI_REQUEST_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        })
    }

    pub fn builder() -> OpenAiBrainConfigBuilder {
        OpenAiBrainConfigBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct OpenAiBrainConfigBuilder {
    config: OpenAiBrainConfig,
}

impl OpenAiBrainConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn build(self) -> OpenAiBrainConfig {
        self.config
    }
}
