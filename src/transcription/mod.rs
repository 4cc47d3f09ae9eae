//! Speech-to-text transcription.
//!
//! Handles audio transcription using OpenAI Whisper. Long audio is split into
//! chunks which are transcribed concurrently and reassembled in order.

mod whisper;

pub use whisper::WhisperTranscriber;

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Trait for transcription services.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file and return its plain text.
    async fn transcribe(&self, audio_path: &Path) -> Result<String>;

    /// Transcribe an audio file with a specific language hint.
    async fn transcribe_with_language(&self, audio_path: &Path, language: &str) -> Result<String>;
}
