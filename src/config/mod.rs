//! Configuration module for ytbrief.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{ChatPrompts, Prompts, SummaryPrompts, TranslatePrompts};
pub use settings::{
    ChatSettings, DictionarySettings, GeneralSettings, PromptSettings, Settings, SummarySettings,
    TranscriptSettings, TranscriptionSettings, TranslationSettings,
};
