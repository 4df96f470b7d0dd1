//! End-to-end pipeline wiring.
//!
//! Builds the fetch → chunk → embed → index path and the QA engine from
//! settings. One index serves one (video, chunk_size, overlap)
//! configuration; rebuilding with different parameters produces an
//! independent index.

use crate::chunking::{self, Chunk};
use crate::completion::OpenAICompletion;
use crate::config::{PromptTemplate, Settings};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::Result;
use crate::index::VectorIndex;
use crate::openai;
use crate::rag::{QaEngine, QueryResult};
use crate::transcript::{Transcript, TranscriptFetcher, YoutubeTranscriptSource};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// The main pipeline for tubeqa.
pub struct Pipeline {
    settings: Settings,
    fetcher: TranscriptFetcher,
    embedder: Arc<dyn Embedder>,
    engine: QaEngine,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Wire up a pipeline from settings.
    pub fn new(settings: Settings) -> Result<Self> {
        let source = Arc::new(YoutubeTranscriptSource::new(
            Duration::from_secs(settings.fetch.timeout_seconds),
            settings.fetch.language.clone(),
        ));
        let fetcher = TranscriptFetcher::new(source);

        let client = openai::create_client(settings.openai.api_key.as_deref());

        let embedder: Arc<dyn Embedder> = Arc::new(OpenAIEmbedder::new(
            client.clone(),
            &settings.embedding.model,
            settings.embedding.dimensions as usize,
        ));

        let completion = Arc::new(OpenAICompletion::new(
            client,
            &settings.rag.model,
            settings.rag.temperature,
        ));

        let prompt = match &settings.rag.prompt_template {
            Some(template) => PromptTemplate::new(template)?,
            None => PromptTemplate::default(),
        };

        let engine = QaEngine::new(embedder.clone(), completion, prompt)
            .with_top_k(settings.rag.top_k)
            .with_max_context_chars(settings.rag.max_context_chars);

        Ok(Self {
            settings,
            fetcher,
            embedder,
            engine,
        })
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fetch the transcript for a URL, reusing the process-lifetime cache.
    pub async fn fetch_transcript(&self, url: &str) -> Result<Arc<Transcript>> {
        self.fetcher.fetch(url).await
    }

    /// Split a transcript with the configured chunk size and overlap.
    pub fn chunk_transcript(&self, transcript: &Transcript) -> Result<Vec<Chunk>> {
        chunking::split(
            &transcript.text,
            self.settings.chunking.chunk_size.chars(),
            self.settings.chunking.overlap_chars(),
        )
    }

    /// Fetch, chunk and embed a video into a fresh index.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn build_index(&self, url: &str) -> Result<VectorIndex> {
        let transcript = self.fetch_transcript(url).await?;
        info!(
            "Fetched transcript for {} ({} chars)",
            transcript.video_id,
            transcript.char_count()
        );

        let chunks = self.chunk_transcript(&transcript)?;
        info!("Split into {} chunks", chunks.len());

        let index = VectorIndex::build(chunks, self.embedder.as_ref()).await?;
        info!("Indexed {} chunks", index.len());

        Ok(index)
    }

    /// Answer a question against a built index.
    pub async fn answer(&self, index: &VectorIndex, question: &str) -> Result<QueryResult> {
        self.engine.answer(index, question).await
    }
}
