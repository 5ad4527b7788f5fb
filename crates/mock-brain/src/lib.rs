//! Mock brain implementations for exercising the chat pipeline.
//!
//! This crate provides test doubles for the `Brain` trait:
//! - `CannedBrain` - Returns a fixed reply and records what it was asked
//! - `FailingBrain` - Always fails, like an unreachable service
//! - `DelayedBrain` - Wraps another brain with artificial delay
//!
//! For real completions, use the `openai-brain` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{Brain, CannedBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_brain::BrainError> {
//!     let brain = CannedBrain::new("Sure! {\"type\": \"task\"}");
//!
//!     let reply = brain.complete("system", "schedule a call").await?;
//!     println!("Reply: {}", reply);
//!     Ok(())
//! }
//! ```

mod canned;
mod delayed;
mod failing;

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError};

pub use canned::CannedBrain;
pub use delayed::DelayedBrain;
pub use failing::FailingBrain;
