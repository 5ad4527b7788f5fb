//! Main orchestrator that runs one chat turn end-to-end.

use std::sync::Arc;

use brain_core::Brain;
use chrono::{DateTime, Local};
use database::{DatabaseError, NewMessage, NewTask};
use tracing::{debug, info, warn};

use crate::composer::compose_reply;
use crate::config::ExtractorConfig;
use crate::error::OrchestratorError;
use crate::extractor::{select_extractor, IntentExtractor};
use crate::intent::{CreatedEntity, Extraction, Intent, TurnOutcome};
use crate::store::EntityStore;

/// Source of the current wall-clock time.
pub type Clock = Arc<dyn Fn() -> DateTime<Local> + Send + Sync>;

/// Coordinates a chat turn: persist the utterance, extract an intent,
/// create the entity, compose and persist the reply.
///
/// Holds no lock across the extractor call, so turns for different owners
/// run concurrently.
pub struct Orchestrator<St: EntityStore> {
    store: St,
    extractor: Arc<dyn IntentExtractor>,
    clock: Clock,
}

impl<St: EntityStore> Orchestrator<St> {
    /// Create an orchestrator with an explicit extractor.
    pub fn new(store: St, extractor: Arc<dyn IntentExtractor>) -> Self {
        Self {
            store,
            extractor,
            clock: Arc::new(Local::now),
        }
    }

    /// Create an orchestrator that uses the model strategy when a brain is
    /// given and the lexical strategy otherwise.
    pub fn with_brain(store: St, brain: Option<Arc<dyn Brain>>, config: ExtractorConfig) -> Self {
        Self::new(store, select_extractor(brain, config))
    }

    /// Replace the clock. Used by tests to pin "now".
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Local> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    /// Name of the active extraction strategy.
    pub fn extractor_name(&self) -> &str {
        self.extractor.name()
    }

    /// Process one utterance for `owner_id`.
    ///
    /// Extraction problems never fail the turn; they degrade to a reply
    /// without an entity. Store failures do fail it. The user message is
    /// written first and stays written even if a later step fails.
    pub async fn handle_turn(&self, owner_id: i64, utterance: &str) -> Result<TurnOutcome, OrchestratorError> {
        info!(
            "Processing turn for owner {} ({} chars, extractor: {})",
            owner_id,
            utterance.len(),
            self.extractor.name()
        );

        // 1. Persist the utterance before anything can fail
        self.store
            .create_message(owner_id, &NewMessage::user(utterance))
            .await?;

        // 2. Extract
        let now = (self.clock)();
        let extraction = match self.extractor.extract(utterance, now).await {
            Ok(extraction) => extraction,
            Err(e) => {
                warn!("Extraction failed for owner {}: {}", owner_id, e);
                Extraction::degraded()
            }
        };
        debug!(
            "Extracted intent {} via {:?}",
            extraction.intent.kind(),
            extraction.strategy
        );

        // 3. Materialize
        let (extraction, created_entity) = self.materialize(owner_id, extraction).await?;

        // 4. Compose and persist the reply
        let reply = compose_reply(&extraction);
        let assistant_message = self
            .store
            .create_message(owner_id, &NewMessage::assistant(reply))
            .await?;

        info!(
            "Turn complete for owner {}: created {}",
            owner_id,
            match &created_entity {
                Some(CreatedEntity::Task(task)) => format!("task {}", task.id),
                Some(CreatedEntity::Alarm(alarm)) => format!("alarm {}", alarm.id),
                None => "nothing".to_string(),
            }
        );

        Ok(TurnOutcome {
            assistant_message,
            created_entity,
        })
    }

    async fn materialize(
        &self,
        owner_id: i64,
        extraction: Extraction,
    ) -> Result<(Extraction, Option<CreatedEntity>), OrchestratorError> {
        let created = match &extraction.intent {
            Intent::None => return Ok((extraction, None)),
            Intent::CreateTask(draft) => {
                let draft = NewTask {
                    category_id: self.resolve_category(owner_id, draft.category_id).await?,
                    ..draft.clone()
                };
                self.store
                    .create_task(owner_id, &draft)
                    .await
                    .map(CreatedEntity::Task)
            }
            Intent::CreateAlarm(draft) => self
                .store
                .create_alarm(owner_id, draft)
                .await
                .map(CreatedEntity::Alarm),
        };

        match created {
            Ok(entity) => Ok((extraction, Some(entity))),
            Err(DatabaseError::Validation(e)) => {
                warn!("Rejected {} draft for owner {}: {}", extraction.intent.kind(), owner_id, e);
                Ok((extraction.without_intent(), None))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Keep a requested category only if the owner has it; otherwise use the
    /// owner's first category, if any.
    async fn resolve_category(&self, owner_id: i64, requested: Option<i64>) -> Result<Option<i64>, DatabaseError> {
        let categories = self.store.list_categories(owner_id).await?;

        if let Some(id) = requested {
            if categories.iter().any(|c| c.id == id) {
                return Ok(Some(id));
            }
            debug!("Category {} not owned by {}, using default", id, owner_id);
        }

        Ok(categories.first().map(|c| c.id))
    }
}
