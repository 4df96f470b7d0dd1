//! OpenAI chat completion backend.

use super::CompletionBackend;
use crate::error::{Result, TubeqaError};
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// OpenAI-based completion backend.
pub struct OpenAICompletion {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAICompletion {
    /// Create a completion backend over an existing client.
    pub fn new(
        client: async_openai::Client<async_openai::config::OpenAIConfig>,
        model: &str,
        temperature: f32,
    ) -> Self {
        Self {
            client,
            model: model.to_string(),
            temperature,
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAICompletion {
    #[instrument(skip(self, prompt), fields(prompt_chars = prompt.len()))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.to_string())
                .build()
                .map_err(|e| TubeqaError::Completion(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| TubeqaError::Completion(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(map_completion_error)?;

        let answer = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| TubeqaError::Completion("Empty response from model".to_string()))?
            .clone();

        debug!("Received completion ({} chars)", answer.len());
        Ok(answer)
    }
}

/// Map OpenAI API failures onto the typed error kinds callers act on.
fn map_completion_error(err: OpenAIError) -> TubeqaError {
    match err {
        OpenAIError::ApiError(api) => {
            let code = api.code.as_deref().unwrap_or("");
            let message = api.message;

            if code == "context_length_exceeded"
                || message.contains("context length")
                || message.contains("maximum context")
            {
                TubeqaError::ContextTooLarge(message)
            } else if code == "invalid_api_key" || code == "invalid_organization" {
                TubeqaError::Auth(message)
            } else if code == "rate_limit_exceeded" || code == "insufficient_quota" {
                TubeqaError::RateLimited(message)
            } else {
                TubeqaError::Completion(message)
            }
        }
        other => TubeqaError::Completion(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_openai::error::ApiError;

    fn api_error(code: Option<&str>, message: &str) -> OpenAIError {
        OpenAIError::ApiError(ApiError {
            message: message.to_string(),
            r#type: Some("invalid_request_error".to_string()),
            param: None,
            code: code.map(|c| c.to_string()),
        })
    }

    #[test]
    fn test_context_length_maps_to_context_too_large() {
        let err = map_completion_error(api_error(
            Some("context_length_exceeded"),
            "This model's maximum context length is 128000 tokens",
        ));
        assert!(matches!(err, TubeqaError::ContextTooLarge(_)));

        // Some deployments omit the code but keep the message.
        let err = map_completion_error(api_error(None, "maximum context length exceeded"));
        assert!(matches!(err, TubeqaError::ContextTooLarge(_)));
    }

    #[test]
    fn test_auth_and_rate_limit_mapping() {
        let err = map_completion_error(api_error(Some("invalid_api_key"), "Incorrect API key"));
        assert!(matches!(err, TubeqaError::Auth(_)));

        let err = map_completion_error(api_error(Some("rate_limit_exceeded"), "Slow down"));
        assert!(matches!(err, TubeqaError::RateLimited(_)));
    }

    #[test]
    fn test_other_errors_map_to_completion() {
        let err = map_completion_error(api_error(Some("server_error"), "upstream blew up"));
        assert!(matches!(err, TubeqaError::Completion(_)));
    }
}
