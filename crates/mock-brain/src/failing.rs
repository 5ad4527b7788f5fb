//! Failing brain implementation - simulates an unreachable service.

use async_trait::async_trait;
use brain_core::{Brain, BrainError};

/// A brain whose every request fails with [`BrainError::Unavailable`].
#[derive(Debug, Clone, Default)]
pub struct FailingBrain;

impl FailingBrain {
    /// Create a new FailingBrain.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Brain for FailingBrain {
    async fn complete(&self, _system_prompt: &str, _utterance: &str) -> Result<String, BrainError> {
        Err(BrainError::Unavailable("service unreachable".to_string()))
    }

    fn name(&self) -> &str {
        "FailingBrain"
    }

    async fn is_ready(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_fails() {
        let brain = FailingBrain::new();

        let result = brain.complete("system", "hello").await;
        assert!(matches!(result, Err(BrainError::Unavailable(_))));
        assert!(!brain.is_ready().await);
    }
}
