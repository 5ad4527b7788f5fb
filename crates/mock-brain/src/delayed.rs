//! Slow brain for exercising model-call deadlines.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use brain_core::{async_trait, Brain, BrainError};
use tokio::time::sleep;

/// Waits before forwarding each completion to an inner brain.
///
/// Counts completions that actually reached the inner brain, so a test can
/// tell an abandoned call from one that finished late.
pub struct DelayedBrain<B: Brain> {
    inner: B,
    delay: Duration,
    forwarded: AtomicUsize,
}

impl<B: Brain> DelayedBrain<B> {
    pub fn new(inner: B, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            forwarded: AtomicUsize::new(0),
        }
    }

    /// Shorthand for a delay in milliseconds.
    pub fn with_millis(inner: B, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// Number of completions that outlived the delay.
    pub fn forwarded(&self) -> usize {
        self.forwarded.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }
}

#[async_trait]
impl<B: Brain> Brain for DelayedBrain<B> {
    async fn complete(&self, system_prompt: &str, utterance: &str) -> Result<String, BrainError> {
        sleep(self.delay).await;
        self.forwarded.fetch_add(1, Ordering::SeqCst);
        self.inner.complete(system_prompt, utterance).await
    }

    fn name(&self) -> &str {
        "DelayedBrain"
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}
