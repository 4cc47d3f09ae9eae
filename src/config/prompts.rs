//! Prompt templates for ytbrief.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub summary: SummaryPrompts,
    pub translate: TranslatePrompts,
    pub chat: ChatPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}


/// Prompts for summary generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub system: String,
    pub short: String,
    pub medium: String,
    pub detailed: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a video content summarizer. You receive the transcript of a YouTube video and produce a clear, faithful summary of its content.

Guidelines:
- Base the summary only on the transcript; never invent content
- Preserve the speaker's key claims, examples, and conclusions
- Write in plain prose, no headings or bullet lists unless the video itself is list-structured
- Ignore sponsor reads, subscription requests, and channel self-promotion"#
                .to_string(),
            short: "Summarize this video in brief within 100 words.".to_string(),
            medium: "Summarize this video in moderate detail within 250 words.".to_string(),
            detailed: "Provide a comprehensive summary of this video in 500 words.".to_string(),
        }
    }
}

/// Prompts for translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatePrompts {
    pub system: String,
    pub user: String,
}

impl Default for TranslatePrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a translator. Translate the text you are given into {{language}}.

Guidelines:
- Produce natural, fluent {{language}}, not a word-for-word rendering
- Keep names, numbers, and technical terms intact
- Output only the translation, with no commentary"#
                .to_string(),
            user: "Translate the following text into {{language}}:\n\n{{text}}".to_string(),
        }
    }
}

/// Prompts for transcript chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatPrompts {
    pub system: String,
    pub user: String,
}

impl Default for ChatPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a helpful assistant that answers questions about one YouTube video, using only its transcript.

Guidelines:
- Answer questions using only the provided transcript
- If the transcript doesn't contain the answer, say so clearly
- Remember previous questions in the conversation for follow-ups
- Be concise but thorough in your responses"#
                .to_string(),
            user: r#"Question: {{question}}

Video transcript:
{{transcript}}

Please answer the question based on the transcript above."#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }

            let translate_path = custom_path.join("translate.toml");
            if translate_path.exists() {
                let content = std::fs::read_to_string(&translate_path)?;
                prompts.translate = toml::from_str(&content)?;
            }

            let chat_path = custom_path.join("chat.toml");
            if chat_path.exists() {
                let content = std::fs::read_to_string(&chat_path)?;
                prompts.chat = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(!prompts.summary.system.is_empty());
        assert!(prompts.summary.short.contains("100 words"));
        assert!(prompts.summary.medium.contains("250 words"));
        assert!(prompts.summary.detailed.contains("500 words"));
    }

    #[test]
    fn test_render_template() {
        let template = "Translate into {{language}}: {{text}}";
        let mut vars = std::collections::HashMap::new();
        vars.insert("language".to_string(), "French".to_string());
        vars.insert("text".to_string(), "hello".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Translate into French: hello");
    }

    #[test]
    fn test_custom_variables_are_overridden() {
        let mut prompts = Prompts::default();
        prompts.variables.insert("language".to_string(), "Hindi".to_string());

        let mut vars = std::collections::HashMap::new();
        vars.insert("language".to_string(), "Tamil".to_string());

        let rendered = prompts.render_with_custom("to {{language}}", &vars);
        assert_eq!(rendered, "to Tamil");
    }
}
