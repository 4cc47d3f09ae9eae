//! Speech-to-text strategy.
//!
//! Last resort: download the best audio-only stream into a temporary
//! directory and run it through Whisper. The temporary directory is removed
//! on every exit path. Failures here are fatal; there is nothing left to
//! fall through to.

use super::{Acquisition, AcquisitionStrategy, Transcript, TranscriptSource};
use crate::audio;
use crate::config::Settings;
use crate::error::{BriefError, Result};
use crate::transcription::{Transcriber, WhisperTranscriber};
use crate::video::VideoId;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, instrument};

/// Third strategy: audio download plus Whisper transcription.
pub struct SpeechToTextStrategy {
    model: String,
    chunk_duration_seconds: u32,
    max_concurrent_chunks: usize,
    tool_timeout: Duration,
    temp_dir: std::path::PathBuf,
}

impl SpeechToTextStrategy {
    pub fn new(settings: &Settings) -> Self {
        Self {
            model: settings.transcription.model.clone(),
            chunk_duration_seconds: settings.transcription.chunk_duration_seconds,
            max_concurrent_chunks: settings.transcription.max_concurrent_chunks,
            tool_timeout: Duration::from_secs(settings.transcript.tool_timeout_secs),
            temp_dir: settings.temp_dir(),
        }
    }
}

#[async_trait]
impl AcquisitionStrategy for SpeechToTextStrategy {
    fn name(&self) -> &'static str {
        "speech-to-text"
    }

    #[instrument(skip(self), fields(video_id = %video))]
    async fn acquire(&self, video: &VideoId) -> Result<Acquisition> {
        info!("Falling back to audio transcription");

        // Scoped audio storage: dropped (and deleted) on success and failure.
        std::fs::create_dir_all(&self.temp_dir)?;
        let temp_dir = tempfile::tempdir_in(&self.temp_dir)?;

        let audio_path = audio::download_audio(
            &video.watch_url(),
            video.as_str(),
            temp_dir.path(),
            self.tool_timeout,
        )
        .await?;

        let transcriber = WhisperTranscriber::with_config(
            &self.model,
            self.chunk_duration_seconds,
            self.max_concurrent_chunks,
        );

        let text = transcriber.transcribe(&audio_path).await?;

        if text.trim().is_empty() {
            return Err(BriefError::Transcription(
                "Speech-to-text produced no text".to_string(),
            ));
        }

        Ok(Acquisition::Acquired(Transcript::new(
            video,
            text.trim().to_string(),
            TranscriptSource::SpeechToText,
        )))
    }
}
