//! CLI module for tubeqa.

pub mod commands;
mod output;
pub mod preflight;

pub use output::{content_preview, Output};

use clap::{Parser, Subcommand};

/// Tubeqa - Question Answering over YouTube Transcripts
///
/// Fetches a video's transcript, builds a vector index over it, and answers
/// questions with AI-generated responses grounded in the transcript.
#[derive(Parser, Debug)]
#[command(name = "tubeqa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a question about a YouTube video
    Ask {
        /// YouTube watch URL
        url: String,

        /// The question to ask
        question: String,

        /// Chunk size in characters (2000, 3000 or 4000)
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Number of context chunks to retrieve
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Completion model to use
        #[arg(short, long)]
        model: Option<String>,

        /// Sampling temperature
        #[arg(short, long)]
        temperature: Option<f32>,

        /// Character budget for the assembled context
        #[arg(long)]
        max_context_chars: Option<usize>,
    },

    /// Fetch and print a video's transcript
    Fetch {
        /// YouTube watch URL
        url: String,
    },

    /// Preview how a video's transcript would be chunked
    Chunks {
        /// YouTube watch URL
        url: String,

        /// Chunk size in characters (2000, 3000 or 4000)
        #[arg(long)]
        chunk_size: Option<usize>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
