//! Fetch command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::Pipeline;
use anyhow::Result;

/// Run the fetch command: print the raw transcript to stdout.
pub async fn run_fetch(url: &str, settings: Settings) -> Result<()> {
    let pipeline = Pipeline::new(settings)?;

    let spinner = Output::spinner("Fetching transcript...");
    match pipeline.fetch_transcript(url).await {
        Ok(transcript) => {
            spinner.finish_and_clear();
            Output::info(&format!(
                "{} ({} chars)",
                transcript.source_url,
                transcript.char_count()
            ));
            println!("{}", transcript.text);
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("{}", e));
            Err(e.into())
        }
    }
}
