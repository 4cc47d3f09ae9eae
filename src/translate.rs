//! Translation of summaries and transcripts.

use crate::config::{Prompts, Settings};
use crate::error::{BriefError, Result};
use crate::openai::{chat_completion, create_client};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::instrument;

/// Supported translation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    Tamil,
    Hindi,
    French,
}

impl TargetLanguage {
    /// ISO 639-1 code for this language.
    pub fn code(&self) -> &'static str {
        match self {
            TargetLanguage::Tamil => "ta",
            TargetLanguage::Hindi => "hi",
            TargetLanguage::French => "fr",
        }
    }

    /// English name of this language.
    pub fn name(&self) -> &'static str {
        match self {
            TargetLanguage::Tamil => "Tamil",
            TargetLanguage::Hindi => "Hindi",
            TargetLanguage::French => "French",
        }
    }

    /// All supported languages.
    pub fn all() -> &'static [TargetLanguage] {
        &[TargetLanguage::Tamil, TargetLanguage::Hindi, TargetLanguage::French]
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ta" | "tamil" => Ok(TargetLanguage::Tamil),
            "hi" | "hindi" => Ok(TargetLanguage::Hindi),
            "fr" | "french" => Ok(TargetLanguage::French),
            _ => Err(format!(
                "Unknown target language: {} (expected one of: ta, hi, fr)",
                s
            )),
        }
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Translates text into one of the supported target languages.
pub struct Translator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    prompts: Prompts,
}

impl Translator {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: create_client(),
            model: settings.translation.model.clone(),
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Translate text into the target language.
    #[instrument(skip(self, text), fields(language = %language, chars = text.len()))]
    pub async fn translate(&self, text: &str, language: TargetLanguage) -> Result<String> {
        if text.trim().is_empty() {
            return Err(BriefError::Translation("Nothing to translate".to_string()));
        }

        let mut vars = HashMap::new();
        vars.insert("language".to_string(), language.name().to_string());
        vars.insert("text".to_string(), text.to_string());

        let system = self
            .prompts
            .render_with_custom(&self.prompts.translate.system, &vars);
        let user = self
            .prompts
            .render_with_custom(&self.prompts.translate.user, &vars);

        chat_completion(&self.client, &self.model, &system, &user)
            .await
            .map_err(|e| match e {
                BriefError::OpenAI(msg) => BriefError::Translation(msg),
                other => other,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_language_codes() {
        assert_eq!(TargetLanguage::Tamil.code(), "ta");
        assert_eq!(TargetLanguage::Hindi.code(), "hi");
        assert_eq!(TargetLanguage::French.code(), "fr");
    }

    #[test]
    fn test_language_from_str_accepts_names_and_codes() {
        assert_eq!(TargetLanguage::from_str("ta").unwrap(), TargetLanguage::Tamil);
        assert_eq!(TargetLanguage::from_str("Hindi").unwrap(), TargetLanguage::Hindi);
        assert_eq!(TargetLanguage::from_str("FRENCH").unwrap(), TargetLanguage::French);
        assert!(TargetLanguage::from_str("klingon").is_err());
    }

    #[test]
    fn test_all_lists_every_language() {
        assert_eq!(TargetLanguage::all().len(), 3);
    }
}
