//! Embedded caption strategy.
//!
//! Fetches a caption track as WebVTT via yt-dlp and renders it to plain
//! text. This stage never fails the chain: anything that prevents usable
//! caption text is logged and reported as a miss so resolution can still
//! fall through to speech-to-text.

use super::{Acquisition, AcquisitionStrategy, MissReason, Transcript, TranscriptSource};
use crate::config::Settings;
use crate::error::{BriefError, Result};
use crate::video::VideoId;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Placeholder some tracks carry instead of real caption text.
const NO_CAPTIONS_PLACEHOLDER: &str = "No captions available.";

/// Second strategy: embedded caption tracks.
pub struct CaptionStrategy {
    languages: Vec<String>,
    tool_timeout: Duration,
    temp_dir: PathBuf,
}

impl CaptionStrategy {
    pub fn new(settings: &Settings) -> Self {
        Self {
            languages: settings.transcript.languages.clone(),
            tool_timeout: Duration::from_secs(settings.transcript.tool_timeout_secs),
            temp_dir: settings.temp_dir(),
        }
    }

    async fn fetch_caption_text(&self, video: &VideoId) -> Result<Option<String>> {
        std::fs::create_dir_all(&self.temp_dir)?;
        let temp_dir = tempfile::tempdir_in(&self.temp_dir)?;
        let output_template = temp_dir.path().join("%(id)s.%(ext)s");
        let langs = self.languages.join(",");

        let result = tokio::time::timeout(
            self.tool_timeout,
            tokio::process::Command::new("yt-dlp")
                .arg("--skip-download")
                .arg("--write-sub")
                .arg("--write-auto-sub")
                .arg("--sub-lang")
                .arg(&langs)
                .arg("--sub-format")
                .arg("vtt")
                .arg("--output")
                .arg(output_template.to_string_lossy().to_string())
                .arg("--no-warnings")
                .arg(video.watch_url())
                .output(),
        )
        .await;

        let output = match result {
            Ok(Ok(o)) => o,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BriefError::ToolNotFound("yt-dlp".to_string()));
            }
            Ok(Err(e)) => {
                return Err(BriefError::ToolFailed(format!("yt-dlp failed to run: {}", e)));
            }
            Err(_) => {
                return Err(BriefError::ToolFailed(
                    "yt-dlp caption fetch timed out".to_string(),
                ));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BriefError::ToolFailed(format!(
                "yt-dlp caption fetch failed: {}",
                stderr.trim()
            )));
        }

        let Some(vtt_path) = find_vtt_file(temp_dir.path())? else {
            return Ok(None);
        };

        let vtt = std::fs::read_to_string(&vtt_path)?;
        Ok(Some(vtt_to_text(&vtt)))
    }
}

#[async_trait]
impl AcquisitionStrategy for CaptionStrategy {
    fn name(&self) -> &'static str {
        "captions"
    }

    #[instrument(skip(self), fields(video_id = %video))]
    async fn acquire(&self, video: &VideoId) -> Result<Acquisition> {
        match self.fetch_caption_text(video).await {
            Ok(Some(text)) if is_usable(&text) => Ok(Acquisition::Acquired(Transcript::new(
                video,
                text,
                TranscriptSource::Captions,
            ))),
            Ok(Some(_)) => {
                debug!("Caption track rendered to no usable text");
                Ok(Acquisition::Miss(MissReason::CaptionsUnavailable))
            }
            Ok(None) => {
                debug!("No caption track for requested languages");
                Ok(Acquisition::Miss(MissReason::CaptionsUnavailable))
            }
            Err(e) => {
                // Caption fetch failure and "no captions" look the same to the
                // caller; keep the chain alive so speech-to-text can run.
                warn!("Caption fetch failed, treating as miss: {}", e);
                Ok(Acquisition::Miss(MissReason::CaptionsUnavailable))
            }
        }
    }
}

/// Caption text that is empty or just the placeholder is not a transcript.
fn is_usable(text: &str) -> bool {
    !text.is_empty() && text != NO_CAPTIONS_PLACEHOLDER
}

/// Pick the produced VTT file, preferring an English track.
fn find_vtt_file(dir: &std::path::Path) -> Result<Option<PathBuf>> {
    let mut vtt_files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("vtt"))
        .collect();

    vtt_files.sort_by_key(|p| {
        let name = p.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
        if name.contains(".en") {
            0
        } else {
            1
        }
    });

    Ok(vtt_files.into_iter().next())
}

/// Render WebVTT to plain text.
///
/// Drops the header, timing lines, and numeric cue ids; strips inline tags;
/// collapses whitespace; de-duplicates rolling caption repeats.
fn vtt_to_text(vtt: &str) -> String {
    let mut fragments: Vec<String> = Vec::new();

    for line in vtt.lines() {
        let line = line.trim();

        if line.is_empty()
            || line.eq_ignore_ascii_case("webvtt")
            || line.starts_with("Kind:")
            || line.starts_with("Language:")
            || line.contains("-->")
        {
            continue;
        }

        // numeric cue ids
        if line.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }

        let stripped = strip_tags(line);
        let cleaned = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

        if cleaned.is_empty() {
            continue;
        }

        // Rolling captions repeat the previous cue's text.
        if fragments.last().map(|prev| prev == &cleaned).unwrap_or(false) {
            continue;
        }

        fragments.push(cleaned);
    }

    fragments.join(" ")
}

/// Remove inline markup like `<c>` and `<00:00:01.000>`.
fn strip_tags(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_tag = false;
    for c in line.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vtt_to_text_drops_header_timings_and_ids() {
        let vtt = "WEBVTT\nKind: captions\nLanguage: en\n\n1\n00:00:00.000 --> 00:00:01.000\nHello   world\n\n2\n00:00:01.000 --> 00:00:02.000\nSecond line\n";
        let text = vtt_to_text(vtt);
        assert_eq!(text, "Hello world Second line");
    }

    #[test]
    fn test_vtt_to_text_strips_inline_tags() {
        let vtt = "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\n<c>Hi</c> <00:00:00.500>everyone</c>\n";
        assert_eq!(vtt_to_text(vtt), "Hi everyone");
    }

    #[test]
    fn test_vtt_to_text_dedups_rolling_captions() {
        let vtt = "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\nso today\n\n00:00:01.000 --> 00:00:02.000\nso today\n\n00:00:02.000 --> 00:00:03.000\nwe will\n";
        assert_eq!(vtt_to_text(vtt), "so today we will");
    }

    #[test]
    fn test_placeholder_and_empty_are_not_usable() {
        assert!(!is_usable(""));
        assert!(!is_usable("No captions available."));
        assert!(is_usable("Hi everyone"));
    }
}
