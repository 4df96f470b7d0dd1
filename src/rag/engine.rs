//! The question/answer engine.

use super::{assemble_context, QueryResult};
use crate::completion::CompletionBackend;
use crate::config::PromptTemplate;
use crate::embedding::Embedder;
use crate::error::Result;
use crate::index::VectorIndex;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Default number of retrieved chunks per question.
pub const DEFAULT_TOP_K: usize = 4;

/// Default character budget for the assembled context.
const DEFAULT_MAX_CONTEXT_CHARS: usize = 12_000;

/// Answers questions against a built [`VectorIndex`].
///
/// The embedder must be the same one used to build the index, or the
/// query vector and the stored vectors live in different spaces.
pub struct QaEngine {
    embedder: Arc<dyn Embedder>,
    completion: Arc<dyn CompletionBackend>,
    prompt: PromptTemplate,
    top_k: usize,
    max_context_chars: usize,
}

impl QaEngine {
    /// Create an engine with default retrieval parameters.
    pub fn new(
        embedder: Arc<dyn Embedder>,
        completion: Arc<dyn CompletionBackend>,
        prompt: PromptTemplate,
    ) -> Self {
        Self {
            embedder,
            completion,
            prompt,
            top_k: DEFAULT_TOP_K,
            max_context_chars: DEFAULT_MAX_CONTEXT_CHARS,
        }
    }

    /// Set the number of retrieved chunks per question.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the context character budget.
    pub fn with_max_context_chars(mut self, max_context_chars: usize) -> Self {
        self.max_context_chars = max_context_chars;
        self
    }

    /// Answer a question against a built index.
    ///
    /// Embeds the question, retrieves top-K chunks, assembles a context
    /// bounded by `max_context_chars`, renders the prompt template, and
    /// makes one completion call. Every failure surfaces to the caller;
    /// nothing is cached or retried.
    #[instrument(skip(self, index), fields(question = %question))]
    pub async fn answer(&self, index: &VectorIndex, question: &str) -> Result<QueryResult> {
        info!("Answering against {} indexed chunks", index.len());

        let query_vector = self.embedder.embed(question).await?;
        let hits = index.query(&query_vector, self.top_k);

        let (context, retained) = assemble_context(&hits, self.max_context_chars);
        debug!(
            "Assembled {} context chars from {} of {} hits",
            context.chars().count(),
            retained.len(),
            hits.len()
        );

        let prompt = self.prompt.render(&context, question);
        let answer = self.completion.complete(&prompt).await?;

        Ok(QueryResult {
            question: question.to_string(),
            chunks: retained,
            context,
            answer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking;
    use crate::error::TubeqaError;
    use async_trait::async_trait;

    /// Embedder that ranks chunk 1 highest, chunk 0 second, chunk 2 last
    /// for any question.
    struct RankingEmbedder;

    #[async_trait]
    impl Embedder for RankingEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![0.0, 1.0, 0.0])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let vectors = [
                vec![0.5, 0.85, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![1.0, 0.0, 0.0],
            ];
            Ok(texts
                .iter()
                .enumerate()
                .map(|(i, _)| vectors[i % vectors.len()].clone())
                .collect())
        }

        fn dimensions(&self) -> usize {
            3
        }
    }

    /// Completion backend that echoes the prompt or fails like the real
    /// API does on an oversized request.
    struct StubCompletion {
        fail_with_context_error: bool,
    }

    #[async_trait]
    impl CompletionBackend for StubCompletion {
        async fn complete(&self, prompt: &str) -> Result<String> {
            if self.fail_with_context_error {
                return Err(TubeqaError::ContextTooLarge(
                    "maximum context length exceeded".to_string(),
                ));
            }
            Ok(format!("answer from {} prompt chars", prompt.chars().count()))
        }
    }

    fn engine(fail: bool) -> QaEngine {
        QaEngine::new(
            Arc::new(RankingEmbedder),
            Arc::new(StubCompletion {
                fail_with_context_error: fail,
            }),
            PromptTemplate::default(),
        )
    }

    async fn ten_k_index() -> VectorIndex {
        let transcript = "t".repeat(10_000);
        let chunks = chunking::split(&transcript, 4000, 400).unwrap();
        assert_eq!(chunks.len(), 3);
        VectorIndex::build(chunks, &RankingEmbedder).await.unwrap()
    }

    #[tokio::test]
    async fn test_end_to_end_ranked_retrieval() {
        let index = ten_k_index().await;
        let engine = engine(false).with_top_k(2);

        let result = engine.answer(&index, "what happened?").await.unwrap();

        let order: Vec<usize> = result.chunks.iter().map(|h| h.chunk.index).collect();
        assert_eq!(order, vec![1, 0]);
        assert!(result.chunks[0].score > result.chunks[1].score);
        assert_eq!(result.question, "what happened?");
        assert!(result.answer.starts_with("answer from"));
        assert!(!result.context.is_empty());
    }

    #[tokio::test]
    async fn test_context_budget_enforced_through_engine() {
        let index = ten_k_index().await;
        let engine = engine(false).with_top_k(3).with_max_context_chars(5000);

        let result = engine.answer(&index, "q").await.unwrap();

        assert!(result.context.chars().count() <= 5000);
        // Only the top chunk (4000 chars) fits in 5000.
        assert_eq!(result.chunks.len(), 1);
        assert_eq!(result.chunks[0].chunk.index, 1);
    }

    #[tokio::test]
    async fn test_context_length_error_surfaces_without_result() {
        let index = ten_k_index().await;
        let engine = engine(true);

        let err = engine.answer(&index, "q").await.unwrap_err();
        assert!(matches!(err, TubeqaError::ContextTooLarge(_)));
    }
}
