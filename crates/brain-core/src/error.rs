//! Error types for brain operations.

use thiserror::Error;

/// Errors that can occur while talking to a brain.
#[derive(Debug, Error)]
pub enum BrainError {
    /// The brain is missing required configuration (e.g. an API key).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The service could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The brain is temporarily unavailable.
    #[error("brain unavailable: {0}")]
    Unavailable(String),

    /// The request was sent but the service failed to produce a completion.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    /// A timeout occurred during processing.
    #[error("processing timed out")]
    Timeout,
}
