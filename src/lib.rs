//! Tubeqa - Question Answering over YouTube Transcripts
//!
//! A CLI tool and library for asking questions about YouTube videos using
//! retrieval-augmented generation.
//!
//! # Overview
//!
//! Tubeqa lets you:
//! - Fetch the caption transcript of a YouTube video
//! - Split it into overlapping chunks and build an in-memory vector index
//! - Ask questions and get AI-generated answers grounded in the transcript
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management and prompt templates
//! - `transcript` - Transcript fetching with URL validation and caching
//! - `chunking` - Fixed-size overlapping transcript chunking
//! - `embedding` - Embedding generation
//! - `completion` - Completion API boundary
//! - `index` - In-memory vector index with cosine retrieval
//! - `rag` - Question answering over a built index
//! - `pipeline` - End-to-end wiring
//!
//! # Example
//!
//! ```rust,no_run
//! use tubeqa::config::Settings;
//! use tubeqa::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(settings)?;
//!
//!     let index = pipeline
//!         .build_index("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
//!         .await?;
//!     let result = pipeline.answer(&index, "What is this video about?").await?;
//!     println!("{}", result.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod completion;
pub mod config;
pub mod embedding;
pub mod error;
pub mod index;
pub mod openai;
pub mod pipeline;
pub mod rag;
pub mod transcript;

pub use error::{Result, TubeqaError};
