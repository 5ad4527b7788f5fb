//! Extractor configuration.

use std::env;
use std::time::Duration;

use brain_core::load_prompt_file;
use tracing::info;

/// Default file for the extractor system prompt.
pub const DEFAULT_EXTRACTOR_PROMPT_FILE: &str = "EXTRACTOR_PROMPT.md";

/// Default time allowed for one model call.
pub const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(20);

/// Embedded system prompt for the model-backed extractor.
pub const DEFAULT_EXTRACTOR_PROMPT: &str = r#"You are Aura, an AI assistant for a task and alarm management app.
Analyze the user message and identify if they want to create a task or set an alarm.
If so, extract the relevant details (title, date/time, description if any).

Format your response as natural language, but also include structured data in JSON format at the end if a task or alarm should be created. Include at most one JSON object.

Task:
{"type": "task", "title": "<short title>", "date": "<YYYY-MM-DDTHH:MM>", "description": "<optional notes>"}

Alarm:
{"type": "alarm", "title": "<label>", "time": "<YYYY-MM-DDTHH:MM>", "days": "<Once | Daily | Mon-Fri | mon,wed,fri>"}

Use local time. If the user wants neither, reply conversationally and include no JSON."#;

/// Configuration for the intent extractor.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// System prompt sent with every utterance.
    pub prompt: String,
    /// Deadline for one model call; expiry triggers the lexical fallback.
    pub model_timeout: Duration,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_EXTRACTOR_PROMPT.to_string(),
            model_timeout: DEFAULT_MODEL_TIMEOUT,
        }
    }
}

impl ExtractorConfig {
    /// Create configuration from environment variables.
    ///
    /// - `AURA_MODEL_TIMEOUT_SECS` - model call deadline (default: 20)
    /// - `AURA_EXTRACTOR_PROMPT` / `AURA_EXTRACTOR_PROMPT_FILE` - see [`load_extractor_prompt`]
    pub fn from_env() -> Self {
        let model_timeout = env::var("AURA_MODEL_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_MODEL_TIMEOUT);

        Self {
            prompt: load_extractor_prompt(),
            model_timeout,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_model_timeout(mut self, timeout: Duration) -> Self {
        self.model_timeout = timeout;
        self
    }
}

/// Load the extractor system prompt.
///
/// Priority:
/// 1. `AURA_EXTRACTOR_PROMPT` env var (if set)
/// 2. Contents of prompt file (`AURA_EXTRACTOR_PROMPT_FILE` or default `EXTRACTOR_PROMPT.md`)
/// 3. Embedded default prompt
pub fn load_extractor_prompt() -> String {
    if let Ok(prompt) = env::var("AURA_EXTRACTOR_PROMPT") {
        info!("Using extractor prompt from AURA_EXTRACTOR_PROMPT env var");
        return prompt;
    }

    let prompt_file = env::var("AURA_EXTRACTOR_PROMPT_FILE")
        .unwrap_or_else(|_| DEFAULT_EXTRACTOR_PROMPT_FILE.to_string());

    if let Some(prompt) = load_prompt_file(&prompt_file) {
        info!("Loaded extractor prompt from {}", prompt_file);
        return prompt;
    }

    info!("Using embedded default extractor prompt");
    DEFAULT_EXTRACTOR_PROMPT.to_string()
}
