//! Core trait and types for brain implementations.
//!
//! A "brain" is an external text-completion service: it receives a system
//! instruction plus one user utterance and returns free-form text. This
//! crate defines:
//!
//! - [`Brain`] - The trait that all brain implementations must implement
//! - [`BrainError`] - Error types for brain operations
//! - [`hash_prompt`] / [`load_prompt_file`] - Prompt helpers
//!
//! # Example
//!
//! ```rust
//! use brain_core::{Brain, BrainError};
//! use async_trait::async_trait;
//!
//! struct MyBrain;
//!
//! #[async_trait]
//! impl Brain for MyBrain {
//!     async fn complete(&self, _system_prompt: &str, utterance: &str) -> Result<String, BrainError> {
//!         Ok(format!("You said: {}", utterance))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "MyBrain"
//!     }
//! }
//! ```

mod error;
mod prompt;
mod trait_def;

pub use error::BrainError;
pub use prompt::{hash_prompt, load_prompt_file};
pub use trait_def::Brain;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
