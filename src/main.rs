//! Tubeqa CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tubeqa::cli::{commands, Cli, Commands};
use tubeqa::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("tubeqa={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&Settings::expand_path(path)))?,
        None => Settings::load()?,
    };

    // Execute command
    match cli.command {
        Commands::Ask {
            url,
            question,
            chunk_size,
            top_k,
            model,
            temperature,
            max_context_chars,
        } => {
            let options = commands::AskOptions {
                chunk_size,
                top_k,
                model,
                temperature,
                max_context_chars,
            };
            commands::run_ask(&url, &question, options, settings).await?;
        }

        Commands::Fetch { url } => {
            commands::run_fetch(&url, settings).await?;
        }

        Commands::Chunks { url, chunk_size } => {
            commands::run_chunks(&url, chunk_size, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, settings)?;
        }
    }

    Ok(())
}
