//! Summary generation over a resolved transcript.

use crate::config::{Prompts, Settings};
use crate::error::{BriefError, Result};
use crate::openai::{chat_completion, create_client};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Target summary size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    #[default]
    Short,
    Medium,
    Detailed,
}

impl SummaryLength {
    /// The instruction sent to the model for this tier.
    pub fn instruction(&self, prompts: &Prompts) -> String {
        match self {
            SummaryLength::Short => prompts.summary.short.clone(),
            SummaryLength::Medium => prompts.summary.medium.clone(),
            SummaryLength::Detailed => prompts.summary.detailed.clone(),
        }
    }
}

impl std::str::FromStr for SummaryLength {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "short" => Ok(SummaryLength::Short),
            "medium" => Ok(SummaryLength::Medium),
            "detailed" | "long" => Ok(SummaryLength::Detailed),
            _ => Err(format!("Unknown summary length: {} (expected short, medium, or detailed)", s)),
        }
    }
}

impl std::fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryLength::Short => write!(f, "short"),
            SummaryLength::Medium => write!(f, "medium"),
            SummaryLength::Detailed => write!(f, "detailed"),
        }
    }
}

/// Generates summaries from transcript text.
pub struct Summarizer {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    max_transcript_chars: usize,
    prompts: Prompts,
}

impl Summarizer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: create_client(),
            model: settings.summary.model.clone(),
            max_transcript_chars: settings.summary.max_transcript_chars,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Summarize transcript text at the given length tier.
    #[instrument(skip(self, transcript), fields(length = %length, chars = transcript.len()))]
    pub async fn summarize(&self, transcript: &str, length: SummaryLength) -> Result<String> {
        if transcript.trim().is_empty() {
            return Err(BriefError::Summary("Transcript is empty".to_string()));
        }

        let truncated = truncate_chars(transcript, self.max_transcript_chars);
        if truncated.len() < transcript.len() {
            debug!(
                "Transcript truncated from {} to {} characters",
                transcript.len(),
                truncated.len()
            );
        }

        let user = format!("{}\n\nTranscript:\n{}", length.instruction(&self.prompts), truncated);

        chat_completion(&self.client, &self.model, &self.prompts.summary.system, &user)
            .await
            .map_err(|e| match e {
                BriefError::OpenAI(msg) => BriefError::Summary(msg),
                other => other,
            })
    }
}

/// Truncate to a character budget without splitting a UTF-8 boundary.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_length_from_str() {
        assert_eq!(SummaryLength::from_str("short").unwrap(), SummaryLength::Short);
        assert_eq!(SummaryLength::from_str("MEDIUM").unwrap(), SummaryLength::Medium);
        assert_eq!(SummaryLength::from_str("detailed").unwrap(), SummaryLength::Detailed);
        assert_eq!(SummaryLength::from_str("long").unwrap(), SummaryLength::Detailed);
        assert!(SummaryLength::from_str("gigantic").is_err());
    }

    #[test]
    fn test_instruction_mapping() {
        let prompts = Prompts::default();
        assert!(SummaryLength::Short.instruction(&prompts).contains("100 words"));
        assert!(SummaryLength::Medium.instruction(&prompts).contains("250 words"));
        assert!(SummaryLength::Detailed.instruction(&prompts).contains("500 words"));
    }

    #[test]
    fn test_truncate_chars_respects_utf8() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        // Multi-byte characters must not be split
        assert_eq!(truncate_chars("héllo", 2), "hé");
    }
}
