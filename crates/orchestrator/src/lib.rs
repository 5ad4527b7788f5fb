//! Chat turn orchestration for Aura.
//!
//! This crate provides the [`Orchestrator`] type, which turns one chat
//! utterance into an assistant reply and, when the utterance asks for it, a
//! new task or alarm.
//!
//! # Architecture
//!
//! ```text
//! Utterance (from the HTTP layer)
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ORCHESTRATOR                           │
//! │                                                             │
//! │  1. Persist user message                                    │
//! │         ↓                                                   │
//! │  2. Extract intent                                          │
//! │     • model: brain reply + embedded JSON payload            │
//! │     • lexical: keywords + time regex (no brain, or it fails)│
//! │         ↓                                                   │
//! │  3. Create task / alarm in the store                        │
//! │         ↓                                                   │
//! │  4. Compose reply                                           │
//! │         ↓                                                   │
//! │  5. Persist assistant message                               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use orchestrator::{ExtractorConfig, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = database::Database::connect("sqlite:aura.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // No brain: lexical extraction
//!     let orchestrator = Orchestrator::with_brain(db, None, ExtractorConfig::from_env());
//!
//!     let outcome = orchestrator.handle_turn(1, "wake me at 7am").await?;
//!     println!("{}", outcome.assistant_message.content);
//!     Ok(())
//! }
//! ```

pub mod composer;
pub mod config;
mod error;
pub mod extractor;
mod intent;
pub mod lexical;
mod orchestrator;
pub mod payload;
mod store;

pub use composer::{compose_reply, CLARIFICATION_PROMPT, FAILSAFE_REPLY};
pub use config::ExtractorConfig;
pub use error::OrchestratorError;
pub use extractor::{select_extractor, IntentExtractor, LexicalExtractor, ModelExtractor};
pub use intent::{CreatedEntity, Extraction, Intent, Strategy, TurnOutcome};
pub use orchestrator::{Clock, Orchestrator};
pub use store::EntityStore;

// Re-export brain-core for convenience
pub use brain_core::{async_trait, Brain, BrainError};
