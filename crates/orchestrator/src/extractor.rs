//! Intent extraction strategies.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use brain_core::{hash_prompt, Brain};
use chrono::{DateTime, Local};
use tracing::{debug, info, trace, warn};

use crate::config::ExtractorConfig;
use crate::error::OrchestratorError;
use crate::intent::{Extraction, Intent};
use crate::lexical;
use crate::payload::{parse_reply, ParsedReply};

/// Classifies one utterance and extracts a creation payload.
#[async_trait]
pub trait IntentExtractor: Send + Sync {
    async fn extract(&self, utterance: &str, now: DateTime<Local>) -> Result<Extraction, OrchestratorError>;

    /// Name used in logs.
    fn name(&self) -> &str;
}

/// Keyword and regex extraction. Deterministic for a fixed `now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalExtractor;

#[async_trait]
impl IntentExtractor for LexicalExtractor {
    async fn extract(&self, utterance: &str, now: DateTime<Local>) -> Result<Extraction, OrchestratorError> {
        Ok(Extraction::lexical(lexical::extract(utterance, now)))
    }

    fn name(&self) -> &str {
        "lexical"
    }
}

/// Extraction through a language model, falling back to the lexical
/// strategy when the model errors or misses its deadline.
pub struct ModelExtractor {
    brain: Arc<dyn Brain>,
    prompt: String,
    timeout: Duration,
    fallback: LexicalExtractor,
}

impl ModelExtractor {
    pub fn new(brain: Arc<dyn Brain>, config: ExtractorConfig) -> Self {
        Self {
            brain,
            prompt: config.prompt,
            timeout: config.model_timeout,
            fallback: LexicalExtractor,
        }
    }

    async fn ask(&self, utterance: &str) -> Result<String, OrchestratorError> {
        match tokio::time::timeout(self.timeout, self.brain.complete(&self.prompt, utterance)).await {
            Ok(reply) => Ok(reply?),
            Err(_) => Err(OrchestratorError::Timeout(self.timeout)),
        }
    }

    /// Decode a reply into an intent plus display text.
    ///
    /// `InvalidPayload` carries the raw text as the reply; `Validation` means
    /// the object parsed but describes no usable entity.
    fn decode(raw: &str, now: DateTime<Local>) -> Result<(Intent, String), (OrchestratorError, String)> {
        match parse_reply(raw) {
            ParsedReply::Plain(text) => Ok((Intent::None, text)),
            ParsedReply::Payload { text, payload } => {
                debug!("Model payload: {:?}", payload);
                match payload.into_intent(now) {
                    Ok(intent) => Ok((intent, text)),
                    Err(e) => Err((e.into(), text)),
                }
            }
            ParsedReply::Malformed { text, error } => Err((OrchestratorError::InvalidPayload(error), text)),
        }
    }

    fn interpret(raw: &str, now: DateTime<Local>) -> Extraction {
        match Self::decode(raw, now) {
            Ok((intent, text)) => Extraction::model(intent, text),
            Err((e @ OrchestratorError::Validation(_), text)) => {
                warn!("Model payload rejected: {}", e);
                Extraction::model(Intent::None, text).without_intent()
            }
            Err((e, text)) => {
                warn!("Model reply not understood: {}", e);
                Extraction::model(Intent::None, text)
            }
        }
    }
}

#[async_trait]
impl IntentExtractor for ModelExtractor {
    async fn extract(&self, utterance: &str, now: DateTime<Local>) -> Result<Extraction, OrchestratorError> {
        if utterance.trim().is_empty() {
            return Ok(Extraction::lexical(Intent::None));
        }

        match self.ask(utterance).await {
            Ok(raw) => {
                trace!("Raw model reply: {}", raw);
                Ok(Self::interpret(&raw, now))
            }
            Err(e) => {
                warn!("{} unavailable, using lexical extraction: {}", self.brain.name(), e);
                self.fallback.extract(utterance, now).await
            }
        }
    }

    fn name(&self) -> &str {
        "model"
    }
}

/// Pick the extraction strategy once, at construction.
///
/// With a brain, the model strategy is used; without one, the lexical.
pub fn select_extractor(brain: Option<Arc<dyn Brain>>, config: ExtractorConfig) -> Arc<dyn IntentExtractor> {
    match brain {
        Some(brain) => {
            info!(
                "Using model extraction via {} (prompt sha256 {}, timeout {:?})",
                brain.name(),
                hash_prompt(&config.prompt),
                config.model_timeout
            );
            Arc::new(ModelExtractor::new(brain, config))
        }
        None => {
            info!("No language model configured, using lexical extraction");
            Arc::new(LexicalExtractor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::Strategy;
    use chrono::{TimeZone, Timelike};
    use mock_brain::{CannedBrain, DelayedBrain, FailingBrain};

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
    }

    fn model(brain: impl Brain + 'static) -> ModelExtractor {
        ModelExtractor::new(Arc::new(brain), ExtractorConfig::default())
    }

    #[tokio::test]
    async fn test_model_payload_becomes_intent() {
        let extractor = model(CannedBrain::new(
            "Alarm set for 6:45.\n{\"type\": \"alarm\", \"title\": \"Run\", \"time\": \"06:45\", \"days\": \"Mon-Fri\"}",
        ));

        let extraction = extractor.extract("wake me at 6:45 on weekdays", now()).await.unwrap();
        assert_eq!(extraction.strategy, Strategy::Model);
        assert_eq!(extraction.model_reply.as_deref(), Some("Alarm set for 6:45."));

        let Intent::CreateAlarm(alarm) = extraction.intent else {
            panic!("expected alarm");
        };
        assert_eq!(alarm.title, "Run");
        assert_eq!(alarm.days.as_deref(), Some("Mon-Fri"));
        assert_eq!(alarm.time.with_timezone(&Local).hour(), 6);
    }

    #[tokio::test]
    async fn test_model_receives_utterance() {
        let brain = Arc::new(CannedBrain::new("Hello!"));
        let extractor = ModelExtractor::new(
            brain.clone(),
            ExtractorConfig::default().with_prompt("be brief"),
        );

        extractor.extract("hi there", now()).await.unwrap();
        assert_eq!(brain.received().await, vec!["hi there".to_string()]);
    }

    #[tokio::test]
    async fn test_malformed_json_is_no_intent() {
        let extractor = model(CannedBrain::new("Done! {type: task"));
        let extraction = extractor.extract("schedule it", now()).await.unwrap();

        // No closing brace: treated as plain text
        assert!(extraction.intent.is_none());
        assert_eq!(extraction.model_reply.as_deref(), Some("Done! {type: task"));

        let extractor = model(CannedBrain::new("Done! {type: task}"));
        let extraction = extractor.extract("schedule it", now()).await.unwrap();
        assert!(extraction.intent.is_none());
        assert_eq!(extraction.strategy, Strategy::Model);
        assert_eq!(extraction.model_reply.as_deref(), Some("Done! {type: task}"));
    }

    #[tokio::test]
    async fn test_invalid_payload_drops_model_text() {
        // The text would claim a task was added
        let extractor = model(CannedBrain::new("Added! {\"type\": \"task\", \"title\": \"\"}"));
        let extraction = extractor.extract("add a task", now()).await.unwrap();

        assert!(extraction.intent.is_none());
        assert_eq!(extraction.strategy, Strategy::Model);
        assert_eq!(extraction.model_reply, None);
    }

    #[test]
    fn test_decode_error_kinds() {
        let rejected = ModelExtractor::decode("Done {\"type\": \"alarm\", \"title\": \"Gym\"}", now());
        assert!(matches!(
            rejected,
            Err((OrchestratorError::Validation(_), ref text)) if text == "Done"
        ));

        let raw = "Done {\"type\": \"alarm\", oops}";
        let malformed = ModelExtractor::decode(raw, now());
        assert!(matches!(
            malformed,
            Err((OrchestratorError::InvalidPayload(_), ref text)) if text == raw
        ));

        let (intent, text) = ModelExtractor::decode("Just chatting", now()).unwrap();
        assert!(intent.is_none());
        assert_eq!(text, "Just chatting");
    }

    #[tokio::test]
    async fn test_failing_brain_falls_back() {
        let extractor = model(FailingBrain::new());
        let extraction = extractor.extract("wake me at 7am", now()).await.unwrap();

        assert_eq!(extraction.strategy, Strategy::Lexical);
        assert!(matches!(extraction.intent, Intent::CreateAlarm(_)));
    }

    #[tokio::test]
    async fn test_slow_brain_falls_back() {
        let brain = Arc::new(DelayedBrain::with_millis(CannedBrain::new("too late"), 500));
        let extractor = ModelExtractor::new(
            brain.clone(),
            ExtractorConfig::default().with_model_timeout(Duration::from_millis(20)),
        );

        let extraction = extractor.extract("schedule a meeting at 3pm", now()).await.unwrap();
        assert_eq!(extraction.strategy, Strategy::Lexical);
        assert!(matches!(extraction.intent, Intent::CreateTask(_)));
        assert_eq!(brain.forwarded(), 0);
    }

    #[tokio::test]
    async fn test_blank_utterance_skips_model() {
        let brain = Arc::new(CannedBrain::new("unused"));
        let extractor = ModelExtractor::new(brain.clone(), ExtractorConfig::default());

        let extraction = extractor.extract("   ", now()).await.unwrap();
        assert!(extraction.intent.is_none());
        assert!(brain.received().await.is_empty());
    }

    #[tokio::test]
    async fn test_select_extractor() {
        let lexical = select_extractor(None, ExtractorConfig::default());
        assert_eq!(lexical.name(), "lexical");

        let brain: Arc<dyn Brain> = Arc::new(CannedBrain::new("hi"));
        let model = select_extractor(Some(brain), ExtractorConfig::default());
        assert_eq!(model.name(), "model");
    }
}
