//! Intent types shared by the extractor, composer and orchestrator.

use database::{Alarm, Message, NewAlarm, NewTask, Task};
use serde::Serialize;

/// The classified purpose of one utterance, with its creation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Nothing to create.
    None,
    /// Create a task. A missing category is filled in by the orchestrator.
    CreateTask(NewTask),
    /// Create an alarm.
    CreateAlarm(NewAlarm),
}

impl Intent {
    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Intent::None => "none",
            Intent::CreateTask(_) => "task",
            Intent::CreateAlarm(_) => "alarm",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Intent::None)
    }
}

/// Which strategy produced an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The language model answered (with or without a usable payload).
    Model,
    /// Keyword and regex matching.
    Lexical,
    /// Extraction failed outright; the turn continues without intent.
    Degraded,
}

/// Result of running an extractor over one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub intent: Intent,
    pub strategy: Strategy,
    /// Model text with the embedded JSON removed, if the model answered.
    pub model_reply: Option<String>,
}

impl Extraction {
    pub fn lexical(intent: Intent) -> Self {
        Self {
            intent,
            strategy: Strategy::Lexical,
            model_reply: None,
        }
    }

    pub fn model(intent: Intent, reply: impl Into<String>) -> Self {
        Self {
            intent,
            strategy: Strategy::Model,
            model_reply: Some(reply.into()),
        }
    }

    pub fn degraded() -> Self {
        Self {
            intent: Intent::None,
            strategy: Strategy::Degraded,
            model_reply: None,
        }
    }

    /// Same strategy, but nothing to create. Model text is dropped too, since
    /// it describes the entity that was rejected.
    pub fn without_intent(self) -> Self {
        Self {
            intent: Intent::None,
            strategy: self.strategy,
            model_reply: None,
        }
    }
}

/// An entity created during a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum CreatedEntity {
    Task(Task),
    Alarm(Alarm),
}

/// What a turn hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    pub assistant_message: Message,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_entity: Option<CreatedEntity>,
}
