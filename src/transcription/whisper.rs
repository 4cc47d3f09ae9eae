//! OpenAI Whisper transcription implementation.

use super::Transcriber;
use crate::audio::split_audio;
use crate::error::{BriefError, Result};
use crate::openai::create_client;
use async_openai::types::CreateTranscriptionRequestArgs;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::{debug, info, instrument};

/// OpenAI Whisper-based transcriber.
pub struct WhisperTranscriber {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    chunk_duration_seconds: u32,
    max_concurrent_chunks: usize,
}

impl WhisperTranscriber {
    /// Create a new Whisper transcriber with default settings.
    pub fn new() -> Self {
        Self::with_config("whisper-1", 120, 3)
    }

    /// Create a new Whisper transcriber with custom configuration.
    pub fn with_config(
        model: &str,
        chunk_duration_seconds: u32,
        max_concurrent_chunks: usize,
    ) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            chunk_duration_seconds,
            max_concurrent_chunks,
        }
    }

    /// Transcribe a single audio file (no splitting).
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    async fn transcribe_single(&self, audio_path: &Path, language: Option<&str>) -> Result<String> {
        debug!("Transcribing audio file");

        let file_bytes = tokio::fs::read(audio_path).await?;

        let mut request_builder = CreateTranscriptionRequestArgs::default();
        request_builder
            .file(async_openai::types::AudioInput::from_vec_u8(
                audio_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("audio.mp3")
                    .to_string(),
                file_bytes,
            ))
            .model(&self.model);

        if let Some(lang) = language {
            request_builder.language(lang);
        }

        let request = request_builder
            .build()
            .map_err(|e| BriefError::Transcription(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .audio()
            .transcribe(request)
            .await
            .map_err(|e| BriefError::OpenAI(format!("Whisper API error: {}", e)))?;

        Ok(response.text.trim().to_string())
    }

    /// Transcribe an audio file, splitting if necessary.
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    async fn transcribe_with_splitting(
        &self,
        audio_path: &Path,
        language: Option<&str>,
    ) -> Result<String> {
        let temp_dir = tempfile::tempdir()?;
        let chunks = split_audio(audio_path, temp_dir.path(), self.chunk_duration_seconds).await?;

        if chunks.len() == 1 {
            // No splitting needed
            return self.transcribe_single(audio_path, language).await;
        }

        let chunk_count = chunks.len();
        info!("Processing {} audio chunks with {}", chunk_count, self.model);

        let pb = ProgressBar::new(chunk_count as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  {spinner:.green} Whisper   [{bar:30.cyan/blue}] {pos}/{len}")
                .unwrap()
                .progress_chars("█▓░"),
        );

        // Process chunks in parallel with concurrency limit, fail fast on error
        let mut results: Vec<(usize, String)> = Vec::with_capacity(chunk_count);

        let mut stream = stream::iter(chunks.into_iter().enumerate())
            .map(|(idx, (chunk_path, time_offset))| {
                let language = language.map(|s| s.to_string());
                async move {
                    let result = self.transcribe_single(&chunk_path, language.as_deref()).await;
                    (idx, time_offset, result)
                }
            })
            .buffer_unordered(self.max_concurrent_chunks);

        while let Some((idx, time_offset, result)) = stream.next().await {
            pb.inc(1);
            match result {
                Ok(text) => results.push((idx, text)),
                Err(e) => {
                    pb.finish_and_clear();
                    drop(temp_dir);
                    return Err(BriefError::Transcription(format!(
                        "Chunk {} at {:.0}s failed: {}",
                        idx, time_offset, e
                    )));
                }
            }
        }

        pb.finish_and_clear();

        // Reassemble in chunk order
        results.sort_by_key(|(idx, _)| *idx);

        let text = results
            .into_iter()
            .map(|(_, text)| text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        // Clean up temp files
        drop(temp_dir);

        Ok(text)
    }
}

impl Default for WhisperTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        self.transcribe_with_splitting(audio_path, None).await
    }

    async fn transcribe_with_language(&self, audio_path: &Path, language: &str) -> Result<String> {
        self.transcribe_with_splitting(audio_path, Some(language)).await
    }
}
