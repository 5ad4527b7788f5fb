//! Error types for orchestrator operations.

use std::time::Duration;

use brain_core::BrainError;
use database::{DatabaseError, ValidationError};
use thiserror::Error;

/// Errors that can occur during a chat turn.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Persistence failed. Surfaces to the caller as a turn failure.
    #[error("store error: {0}")]
    Store(#[from] DatabaseError),

    /// The language model failed or was unreachable.
    #[error("brain error: {0}")]
    Brain(#[from] BrainError),

    /// The language model did not answer in time.
    #[error("model call timed out after {0:?}")]
    Timeout(Duration),

    /// An extracted payload could not become an entity.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Embedded JSON in the model reply could not be parsed.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}
