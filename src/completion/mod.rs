//! Completion API boundary.

mod openai;

pub use openai::OpenAICompletion;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for completion backends.
///
/// The model identifier and sampling parameters are fixed at construction;
/// `complete` takes the fully rendered prompt and returns the generated
/// text or a typed error.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Generate a completion for a prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
