//! OpenAI client configuration with sensible defaults.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for OpenAI API requests (2 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Resolve the API credential.
///
/// An explicit caller-supplied key overrides the `OPENAI_API_KEY`
/// environment default. Empty values count as absent.
pub fn resolve_api_key(explicit: Option<&str>) -> Option<String> {
    explicit
        .filter(|k| !k.is_empty())
        .map(|k| k.to_string())
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .filter(|k| !k.is_empty())
}

/// Create an OpenAI client with configured timeout and credential.
///
/// Uses a 2-minute timeout by default to prevent hung API calls.
pub fn create_client(api_key: Option<&str>) -> Client<OpenAIConfig> {
    create_client_with_timeout(api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create an OpenAI client with a custom timeout.
pub fn create_client_with_timeout(
    api_key: Option<&str>,
    timeout: Duration,
) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    let config = match resolve_api_key(api_key) {
        Some(key) => OpenAIConfig::new().with_api_key(key),
        None => OpenAIConfig::default(),
    };

    Client::with_config(config).with_http_client(http_client)
}
