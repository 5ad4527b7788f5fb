//! OpenAiBrain implementation using the chat-completions API.

use async_trait::async_trait;
use brain_core::{Brain, BrainError};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::OpenAiBrainConfig;

/// A brain implementation backed by an OpenAI-compatible API.
///
/// Stateless: every call sends exactly one system message and one user
/// message.
pub struct OpenAiBrain {
    client: Client,
    config: OpenAiBrainConfig,
}

impl OpenAiBrain {
    /// Create a new OpenAiBrain with the given configuration.
    pub fn new(config: OpenAiBrainConfig) -> Result<Self, BrainError> {
        if config.api_key.trim().is_empty() {
            return Err(BrainError::Configuration("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BrainError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "OpenAiBrain initialized with model: {}, url: {}",
            config.model, config.api_url
        );

        Ok(Self { client, config })
    }

    /// Create an OpenAiBrain from environment variables.
    ///
    /// See [`OpenAiBrainConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, BrainError> {
        let config = OpenAiBrainConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &OpenAiBrainConfig {
        &self.config
    }

    fn build_request(&self, system_prompt: &str, utterance: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(utterance)],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }

    /// Make a chat completion request.
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, BrainError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.api_url.trim_end_matches('/')
        );

        debug!("Sending request to {}: {:?}", url, request);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BrainError::Timeout
                } else {
                    BrainError::Network(format!("Failed to send request: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as API error
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(BrainError::ProcessingFailed(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                )));
            }

            return Err(BrainError::ProcessingFailed(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| BrainError::ProcessingFailed(format!("Failed to parse response: {}", e)))?;

        debug!("Received completion {} from model {}", completion.id, completion.model);

        Ok(completion)
    }
}

#[async_trait]
impl Brain for OpenAiBrain {
    async fn complete(&self, system_prompt: &str, utterance: &str) -> Result<String, BrainError> {
        let request = self.build_request(system_prompt, utterance);
        let completion = self.chat_completion(request).await?;

        if let Some(ref usage) = completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        match completion.first_content() {
            Some(text) => Ok(text.to_string()),
            None => {
                warn!("No content in completion, returning empty reply");
                Ok(String::new())
            }
        }
    }

    fn name(&self) -> &str {
        "OpenAiBrain"
    }
}
