//! OpenAI client configuration and shared completion plumbing.

use crate::error::{BriefError, Result};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for OpenAI API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an OpenAI client with configured timeout.
///
/// Uses a 5-minute timeout by default to prevent hung API calls.
pub fn create_client() -> Client<OpenAIConfig> {
    create_client_with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create an OpenAI client with a custom timeout.
pub fn create_client_with_timeout(timeout: Duration) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    Client::with_config(OpenAIConfig::default()).with_http_client(http_client)
}

/// Check if the OpenAI API key is configured.
pub fn is_api_key_configured() -> bool {
    std::env::var("OPENAI_API_KEY").is_ok()
}

/// Run a single system + user chat completion and return the response text.
///
/// The summarizer, translator, and chat engine all issue this same request
/// shape; they differ only in prompts and model.
pub async fn chat_completion(
    client: &Client<OpenAIConfig>,
    model: &str,
    system: &str,
    user: &str,
) -> Result<String> {
    let messages: Vec<ChatCompletionRequestMessage> = vec![
        ChatCompletionRequestSystemMessageArgs::default()
            .content(system.to_string())
            .build()
            .map_err(|e| BriefError::OpenAI(e.to_string()))?
            .into(),
        ChatCompletionRequestUserMessageArgs::default()
            .content(user.to_string())
            .build()
            .map_err(|e| BriefError::OpenAI(e.to_string()))?
            .into(),
    ];

    complete_messages(client, model, messages).await
}

/// Run a chat completion over a prepared message list.
pub async fn complete_messages(
    client: &Client<OpenAIConfig>,
    model: &str,
    messages: Vec<ChatCompletionRequestMessage>,
) -> Result<String> {
    let request = CreateChatCompletionRequestArgs::default()
        .model(model)
        .messages(messages)
        .temperature(0.7)
        .build()
        .map_err(|e| BriefError::OpenAI(e.to_string()))?;

    let response = client
        .chat()
        .create(request)
        .await
        .map_err(|e| BriefError::OpenAI(format!("Chat completion failed: {}", e)))?;

    response
        .choices
        .first()
        .and_then(|c| c.message.content.as_ref())
        .cloned()
        .ok_or_else(|| BriefError::OpenAI("Empty response from model".to_string()))
}
