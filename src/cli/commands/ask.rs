//! Ask command implementation.

use super::apply_chunk_size;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::Pipeline;
use anyhow::Result;

/// Command-line overrides for a single ask invocation.
#[derive(Debug, Default)]
pub struct AskOptions {
    pub chunk_size: Option<usize>,
    pub top_k: Option<usize>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_context_chars: Option<usize>,
}

/// Run the ask command.
pub async fn run_ask(
    url: &str,
    question: &str,
    options: AskOptions,
    mut settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Ask, settings.openai.api_key.as_deref()) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    apply_chunk_size(&mut settings, options.chunk_size)?;
    if let Some(top_k) = options.top_k {
        settings.rag.top_k = top_k;
    }
    if let Some(model) = options.model {
        settings.rag.model = model;
    }
    if let Some(temperature) = options.temperature {
        settings.rag.temperature = temperature;
    }
    if let Some(max_context_chars) = options.max_context_chars {
        settings.rag.max_context_chars = max_context_chars;
    }

    let pipeline = Pipeline::new(settings)?;

    let spinner = Output::spinner("Fetching transcript and building index...");
    let index = match pipeline.build_index(url).await {
        Ok(index) => {
            spinner.finish_and_clear();
            Output::info(&format!("Indexed {} chunks", index.len()));
            index
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to build index: {}", e));
            return Err(e.into());
        }
    };

    let spinner = Output::spinner("Generating answer...");
    match pipeline.answer(&index, question).await {
        Ok(result) => {
            spinner.finish_and_clear();

            println!("\n{}\n", result.answer);

            if !result.chunks.is_empty() {
                Output::header("Sources");
                for hit in &result.chunks {
                    Output::source_chunk(
                        hit.chunk.index,
                        hit.chunk.start,
                        hit.chunk.end,
                        hit.score,
                        &hit.chunk.text,
                    );
                }
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
