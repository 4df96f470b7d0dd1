//! In-memory vector index over transcript chunks.
//!
//! An index maps chunk index to (chunk, embedding vector). It is built once
//! per (video, chunk_size, overlap) configuration, then queried read-only;
//! cosine similarity is the ranking metric.

use crate::chunking::Chunk;
use crate::embedding::Embedder;
use crate::error::{Result, TubeqaError};
use tracing::{debug, instrument};

/// A chunk paired with its embedding vector.
#[derive(Debug, Clone)]
struct IndexEntry {
    chunk: Chunk,
    embedding: Vec<f32>,
}

/// A query hit: the matched chunk and its similarity score.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The matched chunk.
    pub chunk: Chunk,
    /// Cosine similarity to the query vector (higher is better).
    pub score: f32,
}

/// Read-only vector index.
#[derive(Debug)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dimensions: usize,
}

impl VectorIndex {
    /// Build an index by embedding every chunk in one batched call.
    ///
    /// Every chunk receives exactly one vector; any embedding failure
    /// aborts the whole build with no partial index. Building twice from
    /// the same chunks and embedder yields the same index.
    #[instrument(skip(chunks, embedder), fields(chunks = chunks.len()))]
    pub async fn build(chunks: Vec<Chunk>, embedder: &dyn Embedder) -> Result<Self> {
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;

        if embeddings.len() != chunks.len() {
            return Err(TubeqaError::Embedding(format!(
                "embedder returned {} vectors for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        let entries: Vec<IndexEntry> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexEntry { chunk, embedding })
            .collect();

        debug!("Built index with {} entries", entries.len());

        Ok(Self {
            entries,
            dimensions: embedder.dimensions(),
        })
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Embedding dimensions of the stored vectors.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Return the top `k` chunks by descending cosine similarity.
    ///
    /// Exactly equal scores are broken by ascending chunk index, so the
    /// result order is fully deterministic. A `k` larger than the index
    /// returns every chunk, ordered the same way.
    pub fn query(&self, query_vector: &[f32], k: usize) -> Vec<ScoredChunk> {
        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(query_vector, &entry.embedding),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.chunk.index.cmp(&b.chunk.index))
        });
        scored.truncate(k);

        scored
    }
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Embedder that hands out a fixed vector per batch position.
    pub(crate) struct StubEmbedder {
        pub chunk_vectors: Vec<Vec<f32>>,
        pub query_vector: Vec<f32>,
    }

    #[async_trait]
    impl Embedder for StubEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(self.query_vector.clone())
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .enumerate()
                .map(|(i, _)| self.chunk_vectors[i % self.chunk_vectors.len()].clone())
                .collect())
        }

        fn dimensions(&self) -> usize {
            self.query_vector.len()
        }
    }

    fn chunk(index: usize, text: &str) -> Chunk {
        Chunk {
            index,
            start: index * 10,
            end: index * 10 + text.chars().count(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);

        let c = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &c).abs() < 0.001);

        let d = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 0.001);

        // Mismatched or empty vectors score zero instead of panicking.
        assert_eq!(cosine_similarity(&a, &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[tokio::test]
    async fn test_build_and_query_ranking() {
        let embedder = StubEmbedder {
            chunk_vectors: vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.7, 0.7, 0.0],
            ],
            query_vector: vec![0.0, 1.0, 0.0],
        };

        let chunks = vec![chunk(0, "first"), chunk(1, "second"), chunk(2, "third")];
        let index = VectorIndex::build(chunks, &embedder).await.unwrap();
        assert_eq!(index.len(), 3);

        let hits = index.query(&[0.0, 1.0, 0.0], 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].chunk.index, 1);
        assert_eq!(hits[1].chunk.index, 2);
        assert!(hits[0].score > hits[1].score);
    }

    #[tokio::test]
    async fn test_query_k_larger_than_index_returns_all() {
        let embedder = StubEmbedder {
            chunk_vectors: vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            query_vector: vec![1.0, 0.0],
        };

        let index = VectorIndex::build(vec![chunk(0, "a"), chunk(1, "b")], &embedder)
            .await
            .unwrap();

        let hits = index.query(&[1.0, 0.0], 100);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].chunk.index, 0);
    }

    #[tokio::test]
    async fn test_equal_scores_tie_break_by_chunk_index() {
        // All chunks share one vector, so every score is identical.
        let embedder = StubEmbedder {
            chunk_vectors: vec![vec![1.0, 0.0]],
            query_vector: vec![1.0, 0.0],
        };

        let chunks = vec![chunk(0, "a"), chunk(1, "b"), chunk(2, "c"), chunk(3, "d")];
        let index = VectorIndex::build(chunks, &embedder).await.unwrap();

        let first = index.query(&[1.0, 0.0], 3);
        let second = index.query(&[1.0, 0.0], 3);

        let order: Vec<usize> = first.iter().map(|h| h.chunk.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert_eq!(
            order,
            second.iter().map(|h| h.chunk.index).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_build_aborts_on_vector_count_mismatch() {
        /// Embedder that silently drops an input.
        struct ShortEmbedder;

        #[async_trait]
        impl Embedder for ShortEmbedder {
            async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
                Ok(vec![1.0])
            }

            async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
                Ok(vec![vec![1.0]; texts.len().saturating_sub(1)])
            }

            fn dimensions(&self) -> usize {
                1
            }
        }

        let err = VectorIndex::build(vec![chunk(0, "a"), chunk(1, "b")], &ShortEmbedder)
            .await
            .unwrap_err();
        assert!(matches!(err, TubeqaError::Embedding(_)));
    }
}
