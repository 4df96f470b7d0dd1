//! Retrieval-augmented question answering over a built index.
//!
//! One question/answer cycle embeds the question, retrieves top-K chunks,
//! assembles a bounded context, and makes exactly one completion call.
//! Nothing is cached or retried; a new question starts a fresh cycle.

mod context;
mod engine;

pub use context::assemble_context;
pub use engine::{QaEngine, DEFAULT_TOP_K};

use crate::index::ScoredChunk;

/// Result of one question/answer cycle. Transient, not persisted.
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// The question as asked.
    pub question: String,
    /// Retrieved chunks that made it into the context, highest similarity
    /// first.
    pub chunks: Vec<ScoredChunk>,
    /// The assembled context passed to the completion model.
    pub context: String,
    /// Raw completion text.
    pub answer: String,
}
