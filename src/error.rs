//! Error types for tubeqa.

use thiserror::Error;

/// Library-level error type for tubeqa operations.
#[derive(Error, Debug)]
pub enum TubeqaError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Transcript fetch failed: {0}")]
    Fetch(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Prompt exceeded the model context window: {0}. Reduce chunk_size or max_context_chars and rebuild the index.")]
    ContextTooLarge(String),

    #[error("Completion failed: {0}")]
    Completion(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for tubeqa operations.
pub type Result<T> = std::result::Result<T, TubeqaError>;
