//! OpenAI-based brain implementation.
//!
//! This crate provides a brain implementation that sends one system
//! instruction plus one user utterance to an OpenAI-compatible
//! `/v1/chat/completions` endpoint and returns the reply text.
//!
//! # Usage
//!
//! ```rust,no_run
//! use openai_brain::{Brain, OpenAiBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let brain = OpenAiBrain::from_env()?;
//!     let reply = brain.complete("You are Aura.", "remind me to stretch at 3pm").await?;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::OpenAiBrain;
pub use config::{OpenAiBrainConfig, OpenAiBrainConfigBuilder};

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError};
