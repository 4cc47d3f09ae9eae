//! Error types for ytbrief.

use thiserror::Error;

/// Library-level error type for ytbrief operations.
#[derive(Error, Debug)]
pub enum BriefError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid video reference: {0}")]
    MalformedReference(String),

    #[error("Transcripts are disabled for video {0}")]
    TranscriptsDisabled(String),

    #[error("No transcript found for video {0} in languages [{1}]")]
    NoTranscriptFound(String, String),

    #[error("No captions available for video {0}")]
    CaptionsUnavailable(String),

    #[error("Transcript acquisition failed: {0}")]
    Acquisition(String),

    #[error("Audio download failed: {0}")]
    AudioDownload(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Summary generation failed: {0}")]
    Summary(String),

    #[error("Translation failed: {0}")]
    Translation(String),

    #[error("Dictionary lookup failed: {0}")]
    Dictionary(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for ytbrief operations.
pub type Result<T> = std::result::Result<T, BriefError>;
