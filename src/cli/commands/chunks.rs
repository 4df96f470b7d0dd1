//! Chunks command implementation.

use super::apply_chunk_size;
use crate::cli::{content_preview, Output};
use crate::config::Settings;
use crate::pipeline::Pipeline;
use anyhow::Result;

/// Run the chunks command: show how the transcript would be split.
pub async fn run_chunks(url: &str, chunk_size: Option<usize>, mut settings: Settings) -> Result<()> {
    apply_chunk_size(&mut settings, chunk_size)?;

    let pipeline = Pipeline::new(settings)?;

    let spinner = Output::spinner("Fetching transcript...");
    let transcript = match pipeline.fetch_transcript(url).await {
        Ok(t) => {
            spinner.finish_and_clear();
            t
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    let chunks = pipeline.chunk_transcript(&transcript)?;

    Output::info(&format!(
        "{} chars split into {} chunks (chunk_size {}, overlap {})",
        transcript.char_count(),
        chunks.len(),
        pipeline.settings().chunking.chunk_size.chars(),
        pipeline.settings().chunking.overlap_chars(),
    ));

    for chunk in &chunks {
        Output::header(&format!("Chunk {} [{}..{}]", chunk.index, chunk.start, chunk.end));
        println!("{}", content_preview(&chunk.text, 160));
    }

    Ok(())
}
