//! Canned brain implementation - always returns the same reply.

use async_trait::async_trait;
use brain_core::{Brain, BrainError};
use tokio::sync::Mutex;

/// A brain that answers every request with a fixed reply.
///
/// Every utterance it receives is recorded so tests can assert on what the
/// pipeline sent.
#[derive(Debug, Default)]
pub struct CannedBrain {
    reply: String,
    received: Mutex<Vec<String>>,
}

impl CannedBrain {
    /// Create a brain that always replies with `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Utterances received so far, oldest first.
    pub async fn received(&self) -> Vec<String> {
        self.received.lock().await.clone()
    }
}

#[async_trait]
impl Brain for CannedBrain {
    async fn complete(&self, _system_prompt: &str, utterance: &str) -> Result<String, BrainError> {
        self.received.lock().await.push(utterance.to_string());
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "CannedBrain"
    }
}
