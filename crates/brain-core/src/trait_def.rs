//! The Brain trait definition.

use async_trait::async_trait;

use crate::error::BrainError;

/// A text-completion collaborator.
///
/// Implementations can range from canned test doubles to hosted language
/// models. This trait is object-safe and can be used with `Arc<dyn Brain>`.
#[async_trait]
pub trait Brain: Send + Sync {
    /// Complete one utterance under the given system instruction.
    ///
    /// # Arguments
    ///
    /// * `system_prompt` - Fixed instruction describing the assistant's job.
    /// * `utterance` - The user's raw text.
    ///
    /// # Returns
    ///
    /// The model's free-form reply, or an error if the service failed.
    async fn complete(&self, system_prompt: &str, utterance: &str) -> Result<String, BrainError>;

    /// Get a human-readable name for this brain implementation.
    fn name(&self) -> &str;

    /// Check if the brain is ready to process requests.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}
