//! Question answering over one video's transcript.

use crate::config::{Prompts, Settings};
use crate::error::{BriefError, Result};
use crate::openai::{complete_messages, create_client};
use crate::transcript::Transcript;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use std::collections::HashMap;
use tracing::{info, instrument};

/// Chat engine bound to a single transcript.
pub struct TranscriptChat {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    transcript: Transcript,
    prompts: Prompts,
    max_history_messages: usize,
    conversation_history: Vec<ChatCompletionRequestMessage>,
}

impl TranscriptChat {
    pub fn new(settings: &Settings, transcript: Transcript) -> Self {
        Self {
            client: create_client(),
            model: settings.chat.model.clone(),
            transcript,
            prompts: Prompts::default(),
            max_history_messages: settings.chat.max_history_messages,
            conversation_history: Vec::new(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Ask a single question; no history is kept.
    #[instrument(skip(self), fields(question = %question))]
    pub async fn ask(&self, question: &str) -> Result<String> {
        info!("Processing question");

        let messages = vec![
            system_message(&self.prompts.chat.system)?,
            user_message(&self.render_question(question))?,
        ];

        self.complete(messages).await
    }

    /// Continue a chat session; history is carried between calls.
    #[instrument(skip(self), fields(message = %message))]
    pub async fn chat(&mut self, message: &str) -> Result<String> {
        info!("Chat message");

        self.conversation_history
            .push(user_message(&self.render_question(message))?);

        let mut messages = vec![system_message(&self.prompts.chat.system)?];
        messages.extend(self.conversation_history.clone());

        let answer = self.complete(messages).await?;

        self.conversation_history
            .push(assistant_message(&answer)?);

        // Trim history if too long
        if self.conversation_history.len() > self.max_history_messages {
            let start = self.conversation_history.len() - self.max_history_messages;
            self.conversation_history = self.conversation_history[start..].to_vec();
        }

        Ok(answer)
    }

    /// Clear conversation history.
    pub fn clear_history(&mut self) {
        self.conversation_history.clear();
    }

    fn render_question(&self, question: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), question.to_string());
        vars.insert("transcript".to_string(), self.transcript.text.clone());
        self.prompts.render_with_custom(&self.prompts.chat.user, &vars)
    }

    async fn complete(&self, messages: Vec<ChatCompletionRequestMessage>) -> Result<String> {
        complete_messages(&self.client, &self.model, messages)
            .await
            .map_err(|e| match e {
                BriefError::OpenAI(msg) => BriefError::Chat(msg),
                other => other,
            })
    }
}

fn system_message(content: &str) -> Result<ChatCompletionRequestMessage> {
    Ok(ChatCompletionRequestSystemMessageArgs::default()
        .content(content.to_string())
        .build()
        .map_err(|e| BriefError::Chat(e.to_string()))?
        .into())
}

fn user_message(content: &str) -> Result<ChatCompletionRequestMessage> {
    Ok(ChatCompletionRequestUserMessageArgs::default()
        .content(content.to_string())
        .build()
        .map_err(|e| BriefError::Chat(e.to_string()))?
        .into())
}

fn assistant_message(content: &str) -> Result<ChatCompletionRequestMessage> {
    Ok(ChatCompletionRequestAssistantMessageArgs::default()
        .content(content.to_string())
        .build()
        .map_err(|e| BriefError::Chat(e.to_string()))?
        .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::TranscriptSource;
    use crate::video::VideoId;

    fn chat_fixture() -> TranscriptChat {
        let settings = Settings::default();
        let video = VideoId::parse("dQw4w9WgXcQ").unwrap();
        let transcript = Transcript::new(
            &video,
            "We discuss binary numbers.".to_string(),
            TranscriptSource::PlatformApi,
        );
        TranscriptChat::new(&settings, transcript)
    }

    #[test]
    fn test_render_question_includes_transcript_and_question() {
        let chat = chat_fixture();
        let rendered = chat.render_question("What is discussed?");
        assert!(rendered.contains("What is discussed?"));
        assert!(rendered.contains("We discuss binary numbers."));
    }

    #[test]
    fn test_clear_history() {
        let mut chat = chat_fixture();
        chat.conversation_history.push(user_message("hi").unwrap());
        chat.clear_history();
        assert!(chat.conversation_history.is_empty());
    }
}
