//! Video reference parsing and metadata.
//!
//! A video reference is whatever the user pastes: a full watch URL, a short
//! youtu.be link, an embed/shorts URL, or a bare 11-character video ID.

use crate::error::{BriefError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// An 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    /// Parse a video ID out of a video reference.
    ///
    /// Accepts watch URLs (`?v=`), youtu.be short links, `/embed/` and
    /// `/shorts/` paths, and bare IDs. Anything else is a typed
    /// `MalformedReference` error.
    pub fn parse(reference: &str) -> Result<Self> {
        let input = reference.trim();

        if is_valid_id(input) {
            return Ok(Self(input.to_string()));
        }

        // Tolerate scheme-less URLs the way browsers do.
        let url_str = if input.starts_with("http://") || input.starts_with("https://") {
            input.to_string()
        } else if input.contains("youtube.com") || input.contains("youtu.be") {
            format!("https://{}", input)
        } else {
            return Err(malformed(reference));
        };

        let url = url::Url::parse(&url_str).map_err(|_| malformed(reference))?;

        let host = url.host_str().unwrap_or("");
        if !is_youtube_host(host) {
            return Err(malformed(reference));
        }

        // watch?v=<id>
        if let Some(id) = url
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.to_string())
        {
            if is_valid_id(&id) {
                return Ok(Self(id));
            }
        }

        // youtu.be/<id>
        if host.eq_ignore_ascii_case("youtu.be") {
            if let Some(seg) = url.path_segments().and_then(|mut s| s.next()) {
                if is_valid_id(seg) {
                    return Ok(Self(seg.to_string()));
                }
            }
        }

        // youtube.com/embed/<id>, youtube.com/shorts/<id>
        if let Some(mut segs) = url.path_segments() {
            let first = segs.next().unwrap_or("");
            let second = segs.next().unwrap_or("");
            if (first == "embed" || first == "shorts") && is_valid_id(second) {
                return Ok(Self(second.to_string()));
            }
        }

        Err(malformed(reference))
    }

    /// The raw 11-character identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }

    /// Thumbnail URL for this video.
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/0.jpg", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn malformed(reference: &str) -> BriefError {
    BriefError::MalformedReference(format!(
        "{} (expected a YouTube URL or an 11-character video ID)",
        reference
    ))
}

fn is_valid_id(candidate: &str) -> bool {
    candidate.len() == 11
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn is_youtube_host(host: &str) -> bool {
    let h = host.to_ascii_lowercase();
    h == "youtube.com" || h == "youtu.be" || h.ends_with(".youtube.com")
}

/// Metadata about a video, fetched best-effort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoDetails {
    /// Video ID.
    pub id: String,
    /// Title ("Unknown Title" when metadata could not be fetched).
    pub title: String,
    /// Channel or uploader name (if available).
    pub channel: Option<String>,
    /// Duration in seconds (if known).
    pub duration_seconds: Option<u32>,
    /// Thumbnail URL.
    pub thumbnail_url: String,
    /// Publication date (if available).
    pub published_at: Option<DateTime<Utc>>,
}

impl VideoDetails {
    /// Fallback details when yt-dlp is unavailable or the fetch fails.
    pub fn unknown(video: &VideoId) -> Self {
        Self {
            id: video.as_str().to_string(),
            title: "Unknown Title".to_string(),
            channel: None,
            duration_seconds: None,
            thumbnail_url: video.thumbnail_url(),
            published_at: None,
        }
    }
}

/// Fetch video metadata using yt-dlp.
///
/// Metadata is display-only, so every failure degrades to
/// `VideoDetails::unknown` rather than surfacing an error.
pub async fn fetch_details(video: &VideoId, timeout: Duration) -> VideoDetails {
    let result = tokio::time::timeout(
        timeout,
        tokio::process::Command::new("yt-dlp")
            .args([
                "--dump-json",
                "--no-download",
                "--no-warnings",
                "--ignore-errors",
                &video.watch_url(),
            ])
            .output(),
    )
    .await;

    let output = match result {
        Ok(Ok(o)) if o.status.success() => o,
        Ok(Ok(o)) => {
            debug!(
                "yt-dlp metadata fetch failed: {}",
                String::from_utf8_lossy(&o.stderr).trim()
            );
            return VideoDetails::unknown(video);
        }
        Ok(Err(e)) => {
            debug!("yt-dlp not runnable: {}", e);
            return VideoDetails::unknown(video);
        }
        Err(_) => {
            debug!("yt-dlp metadata fetch timed out");
            return VideoDetails::unknown(video);
        }
    };

    let json_str = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = match serde_json::from_str(&json_str) {
        Ok(v) => v,
        Err(e) => {
            debug!("Failed to parse yt-dlp output: {}", e);
            return VideoDetails::unknown(video);
        }
    };

    let title = json["title"]
        .as_str()
        .unwrap_or("Unknown Title")
        .to_string();

    let channel = json["channel"]
        .as_str()
        .or_else(|| json["uploader"].as_str())
        .map(|s| s.to_string());

    let duration = json["duration"].as_f64().map(|d| d as u32);

    let published_at = json["upload_date"].as_str().and_then(|date_str| {
        // yt-dlp returns date as YYYYMMDD
        if date_str.len() == 8 {
            chrono::NaiveDate::parse_from_str(date_str, "%Y%m%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|d| d.and_utc())
        } else {
            None
        }
    });

    VideoDetails {
        id: video.as_str().to_string(),
        title,
        channel,
        duration_seconds: duration,
        thumbnail_url: video.thumbnail_url(),
        published_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_forms() {
        for input in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "http://youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=abc123",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "youtube.com/watch?v=dQw4w9WgXcQ",
            "dQw4w9WgXcQ",
        ] {
            let id = VideoId::parse(input).unwrap();
            assert_eq!(id.as_str(), "dQw4w9WgXcQ", "input: {}", input);
        }
    }

    #[test]
    fn test_parse_rejects_malformed_references() {
        for input in [
            "",
            "not-a-video-id",
            "https://example.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch",
            "https://youtube.com/watch?v=short",
        ] {
            let err = VideoId::parse(input).unwrap_err();
            assert!(
                matches!(err, BriefError::MalformedReference(_)),
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_watch_and_thumbnail_urls() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        assert_eq!(id.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert!(id.thumbnail_url().contains("dQw4w9WgXcQ"));
    }

    #[test]
    fn test_unknown_details_fallback() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        let details = VideoDetails::unknown(&id);
        assert_eq!(details.title, "Unknown Title");
        assert_eq!(details.id, "dQw4w9WgXcQ");
    }
}
