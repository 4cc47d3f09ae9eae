//! Audio download and processing utilities.
//!
//! This module provides functions for downloading audio from URLs using yt-dlp
//! and processing audio files using ffmpeg. Every external invocation is
//! bounded by a caller-supplied timeout.

use crate::error::{BriefError, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

/// Downloads the best audio-only stream from a URL and saves it as MP3.
///
/// The output directory is expected to be temporary, scoped storage owned by
/// the caller; nothing is cached between invocations.
#[instrument(skip(output_dir, timeout), fields(video_id = %video_id))]
pub async fn download_audio(
    url: &str,
    video_id: &str,
    output_dir: &Path,
    timeout: Duration,
) -> Result<PathBuf> {
    info!("Downloading audio from {}", url);

    let target_path = output_dir.join(format!("{}.mp3", video_id));
    let template = output_dir.join(format!("{}.%(ext)s", video_id));

    let result = tokio::time::timeout(
        timeout,
        Command::new("yt-dlp")
            .arg("--extract-audio")
            .arg("--audio-format").arg("mp3")
            .arg("--audio-quality").arg("0")
            .arg("--output").arg(template.to_str().unwrap_or_default())
            .arg("--no-playlist")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg(url)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output(),
    )
    .await;

    let output = match result {
        Ok(Ok(o)) => o,
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(BriefError::ToolNotFound("yt-dlp".into()));
        }
        Ok(Err(e)) => {
            return Err(BriefError::AudioDownload(format!("yt-dlp execution failed: {e}")));
        }
        Err(_) => {
            return Err(BriefError::AudioDownload(format!(
                "yt-dlp timed out after {}s",
                timeout.as_secs()
            )));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BriefError::AudioDownload(format!("yt-dlp failed: {stderr}")));
    }

    // yt-dlp may output different formats; find and normalize to mp3
    let downloaded = find_audio_file(output_dir, video_id)?;

    if downloaded != target_path {
        normalize_to_mp3(&downloaded, &target_path, timeout).await?;
        let _ = std::fs::remove_file(&downloaded);
    }

    Ok(target_path)
}

/// Locates a downloaded audio file by video ID.
fn find_audio_file(dir: &Path, video_id: &str) -> Result<PathBuf> {
    // Common audio formats that yt-dlp may produce
    for ext in &["mp3", "opus", "m4a", "webm", "ogg"] {
        let candidate = dir.join(format!("{}.{}", video_id, ext));
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    // Fallback: scan directory for matching prefix
    let entries = std::fs::read_dir(dir)
        .map_err(|e| BriefError::AudioDownload(format!("Cannot read directory: {e}")))?;

    for entry in entries.flatten() {
        let name = entry.file_name();
        if name.to_string_lossy().starts_with(video_id) {
            return Ok(entry.path());
        }
    }

    Err(BriefError::AudioDownload("Audio file not found after download".into()))
}

/// Converts an audio file to MP3 using ffmpeg.
async fn normalize_to_mp3(source: &Path, dest: &Path, timeout: Duration) -> Result<()> {
    debug!("Converting {:?} to MP3", source);

    let result = tokio::time::timeout(
        timeout,
        Command::new("ffmpeg")
            .arg("-i").arg(source)
            .arg("-vn")
            .arg("-codec:a").arg("libmp3lame")
            .arg("-qscale:a").arg("2")
            .arg("-y")
            .arg("-loglevel").arg("error")
            .arg(dest)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output(),
    )
    .await;

    match result {
        Ok(Ok(out)) if out.status.success() => Ok(()),
        Ok(Ok(out)) => {
            let err = String::from_utf8_lossy(&out.stderr);
            Err(BriefError::AudioDownload(format!("ffmpeg conversion failed: {err}")))
        }
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(BriefError::ToolNotFound("ffmpeg".into()))
        }
        Ok(Err(e)) => Err(BriefError::AudioDownload(format!("ffmpeg error: {e}"))),
        Err(_) => Err(BriefError::AudioDownload("ffmpeg conversion timed out".into())),
    }
}

/// Segments a long audio file into smaller chunks for processing.
///
/// Each chunk will be approximately `chunk_seconds` long. Returns tuples of
/// (chunk_path, offset_seconds) for each segment.
#[instrument(skip_all)]
pub async fn split_audio(
    source: &Path,
    output_dir: &Path,
    chunk_seconds: u32,
) -> Result<Vec<(PathBuf, f64)>> {
    std::fs::create_dir_all(output_dir)?;

    let total_duration = probe_duration(source).await?;
    info!("Total audio duration: {:.1}s", total_duration);

    let chunk_len = chunk_seconds as f64;

    // Short audio doesn't need splitting
    if total_duration <= chunk_len {
        return Ok(vec![(source.to_path_buf(), 0.0)]);
    }

    let base_name = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("audio");

    let mut segments = Vec::new();
    let mut offset = 0.0;
    let mut idx = 0u32;

    while offset < total_duration {
        let segment_path = output_dir.join(format!("{}_{:04}.mp3", base_name, idx));
        let segment_len = chunk_len.min(total_duration - offset);

        extract_segment(source, &segment_path, offset, segment_len).await?;

        debug!("Created segment {} at offset {:.1}s", idx, offset);
        segments.push((segment_path, offset));

        offset += chunk_len;
        idx += 1;
    }

    info!("Created {} audio segments", segments.len());
    Ok(segments)
}

/// Extracts a time segment from an audio file.
async fn extract_segment(source: &Path, dest: &Path, start: f64, length: f64) -> Result<()> {
    // First attempt: stream copy (fast, no quality loss)
    let copy_result = Command::new("ffmpeg")
        .arg("-ss").arg(format!("{:.3}", start))
        .arg("-i").arg(source)
        .arg("-t").arg(format!("{:.3}", length))
        .arg("-c").arg("copy")
        .arg("-y")
        .arg("-loglevel").arg("warning")
        .arg(dest)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    if let Ok(status) = copy_result {
        if status.success() && dest.exists() {
            return Ok(());
        }
    }

    // Fallback: re-encode to MP3
    warn!("Stream copy failed, re-encoding segment");

    let encode_result = Command::new("ffmpeg")
        .arg("-ss").arg(format!("{:.3}", start))
        .arg("-i").arg(source)
        .arg("-t").arg(format!("{:.3}", length))
        .arg("-codec:a").arg("libmp3lame")
        .arg("-qscale:a").arg("2")
        .arg("-y")
        .arg("-loglevel").arg("error")
        .arg(dest)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    match encode_result {
        Ok(out) if out.status.success() => Ok(()),
        Ok(out) => {
            let err = String::from_utf8_lossy(&out.stderr);
            Err(BriefError::AudioDownload(format!("Segment extraction failed: {err}")))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(BriefError::ToolNotFound("ffmpeg".into()))
        }
        Err(e) => Err(BriefError::AudioDownload(format!("ffmpeg error: {e}"))),
    }
}

/// Queries the duration of an audio file using ffprobe with JSON output.
async fn probe_duration(path: &Path) -> Result<f64> {
    let result = Command::new("ffprobe")
        .arg("-v").arg("quiet")
        .arg("-print_format").arg("json")
        .arg("-show_format")
        .arg(path)
        .output()
        .await;

    let output = match result {
        Ok(o) => o,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(BriefError::ToolNotFound("ffprobe".into()));
        }
        Err(e) => {
            return Err(BriefError::AudioDownload(format!("ffprobe failed: {e}")));
        }
    };

    if !output.status.success() {
        return Err(BriefError::AudioDownload("ffprobe returned error".into()));
    }

    // Parse JSON output to extract duration
    let json_str = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|_| BriefError::AudioDownload("Invalid ffprobe output".into()))?;

    parsed["format"]["duration"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| BriefError::AudioDownload("Could not determine audio duration".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_audio_file_prefers_known_extensions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("abc123.webm"), b"x").unwrap();
        std::fs::write(dir.path().join("abc123.mp3"), b"x").unwrap();

        let found = find_audio_file(dir.path(), "abc123").unwrap();
        assert_eq!(found, dir.path().join("abc123.mp3"));
    }

    #[test]
    fn test_find_audio_file_falls_back_to_prefix_scan() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("abc123.aac"), b"x").unwrap();

        let found = find_audio_file(dir.path(), "abc123").unwrap();
        assert_eq!(found, dir.path().join("abc123.aac"));
    }

    #[test]
    fn test_find_audio_file_missing_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_audio_file(dir.path(), "abc123").is_err());
    }
}
