//! Configuration settings for ytbrief.

use crate::error::{BriefError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub transcript: TranscriptSettings,
    pub transcription: TranscriptionSettings,
    pub summary: SummarySettings,
    pub translation: TranslationSettings,
    pub dictionary: DictionarySettings,
    pub chat: ChatSettings,
    pub prompts: PromptSettings,
}


/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for temporary files.
    pub temp_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            temp_dir: "/tmp/ytbrief".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Transcript resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Language codes to request, in preference order.
    pub languages: Vec<String>,
    /// Timeout for transcript-service HTTP requests, in seconds.
    pub request_timeout_secs: u64,
    /// Timeout for yt-dlp invocations, in seconds.
    pub tool_timeout_secs: u64,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string(), "en-US".to_string()],
            request_timeout_secs: 30,
            tool_timeout_secs: 120,
        }
    }
}

/// Speech-to-text transcription settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// Whisper model to use.
    pub model: String,
    /// Duration in seconds for splitting long audio files.
    pub chunk_duration_seconds: u32,
    /// Maximum concurrent chunk processing.
    pub max_concurrent_chunks: usize,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            model: "whisper-1".to_string(),
            chunk_duration_seconds: 120,
            max_concurrent_chunks: 3,
        }
    }
}

/// Summary generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarySettings {
    /// LLM model for summary generation.
    pub model: String,
    /// Maximum transcript characters sent to the model; longer input is truncated.
    pub max_transcript_chars: usize,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_transcript_chars: 48_000,
        }
    }
}

/// Translation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationSettings {
    /// LLM model for translation.
    pub model: String,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
        }
    }
}

/// Dictionary lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionarySettings {
    /// Base URL of the dictionary entries endpoint.
    pub endpoint: String,
    /// Timeout for dictionary HTTP requests, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for DictionarySettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.dictionaryapi.dev/api/v2/entries/en".to_string(),
            request_timeout_secs: 15,
        }
    }
}

/// Transcript chat settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// LLM model for question answering.
    pub model: String,
    /// Maximum number of conversation turns kept in history.
    pub max_history_messages: usize,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_history_messages: 20,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}


impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| BriefError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate settings at startup, before any of them are used.
    pub fn validate(&self) -> Result<()> {
        if self.general.temp_dir.trim().is_empty() {
            return Err(BriefError::Config("general.temp_dir must not be empty".to_string()));
        }
        if self.transcript.languages.is_empty() {
            return Err(BriefError::Config(
                "transcript.languages must list at least one language code".to_string(),
            ));
        }
        if self.transcript.request_timeout_secs == 0 || self.transcript.tool_timeout_secs == 0 {
            return Err(BriefError::Config(
                "transcript timeouts must be greater than zero".to_string(),
            ));
        }
        if self.transcription.chunk_duration_seconds == 0 {
            return Err(BriefError::Config(
                "transcription.chunk_duration_seconds must be greater than zero".to_string(),
            ));
        }
        if self.transcription.max_concurrent_chunks == 0 {
            return Err(BriefError::Config(
                "transcription.max_concurrent_chunks must be greater than zero".to_string(),
            ));
        }
        if self.summary.max_transcript_chars == 0 {
            return Err(BriefError::Config(
                "summary.max_transcript_chars must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ytbrief")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded temp directory path.
    pub fn temp_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.transcription.model, "whisper-1");
        assert_eq!(settings.transcript.languages[0], "en");
    }

    #[test]
    fn test_validate_rejects_empty_languages() {
        let mut settings = Settings::default();
        settings.transcript.languages.clear();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut settings = Settings::default();
        settings.transcript.request_timeout_secs = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.summary.model, settings.summary.model);
        assert_eq!(parsed.chat.max_history_messages, settings.chat.max_history_messages);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Settings = toml::from_str("[summary]\nmodel = \"gpt-4.1\"\n").unwrap();
        assert_eq!(parsed.summary.model, "gpt-4.1");
        assert_eq!(parsed.transcription.model, "whisper-1");
    }
}
