//! Platform transcript strategy.
//!
//! Talks to YouTube's InnerTube player API: the watch page yields an API key,
//! the player response lists caption tracks, and the selected track's timed
//! text is fetched as JSON. Fragments are joined with single spaces in the
//! order the service returns them.

use super::{Acquisition, AcquisitionStrategy, MissReason, Transcript, TranscriptSource};
use crate::config::Settings;
use crate::error::{BriefError, Result};
use crate::video::VideoId;
use async_trait::async_trait;
use regex::Regex;
use std::time::Duration;
use tracing::{debug, instrument};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const INNERTUBE_PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player?key=";

/// Primary strategy: the platform's own transcript service.
pub struct PlatformTranscriptStrategy {
    client: reqwest::Client,
    languages: Vec<String>,
    api_key_regex: Regex,
}

impl PlatformTranscriptStrategy {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("en-US"),
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.transcript.request_timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| BriefError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let api_key_regex = Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#)
            .expect("Invalid regex");

        Ok(Self {
            client,
            languages: settings.transcript.languages.clone(),
            api_key_regex,
        })
    }

    async fn fetch_watch_page(&self, video: &VideoId) -> Result<String> {
        let url = format!("{}{}", WATCH_URL, video.as_str());
        let response = self.client.get(&url).send().await.map_err(|e| {
            BriefError::Acquisition(format!("Failed to fetch watch page: {}", e))
        })?;

        check_http_status(&response)?;

        response
            .text()
            .await
            .map_err(|e| BriefError::Acquisition(format!("Failed to read watch page: {}", e)))
    }

    fn extract_api_key(&self, html: &str, video: &VideoId) -> Result<String> {
        if html.contains("g-recaptcha") {
            return Err(BriefError::Acquisition(format!(
                "Request for video {} blocked by the platform",
                video.as_str()
            )));
        }

        self.api_key_regex
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                BriefError::Acquisition(format!(
                    "Could not extract API key for video {}",
                    video.as_str()
                ))
            })
    }

    async fn fetch_player_response(
        &self,
        video: &VideoId,
        api_key: &str,
    ) -> Result<serde_json::Value> {
        let url = format!("{}{}", INNERTUBE_PLAYER_URL, api_key);

        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": "ANDROID",
                    "clientVersion": "20.10.38"
                }
            },
            "videoId": video.as_str()
        });

        let response = self.client.post(&url).json(&body).send().await.map_err(|e| {
            BriefError::Acquisition(format!("Failed to query player API: {}", e))
        })?;

        check_http_status(&response)?;

        response
            .json()
            .await
            .map_err(|e| BriefError::Acquisition(format!("Invalid player response: {}", e)))
    }

    async fn fetch_timed_text(&self, base_url: &str) -> Result<serde_json::Value> {
        // json3 gives structured events instead of XML.
        let url = format!("{}&fmt=json3", base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            BriefError::Acquisition(format!("Failed to fetch transcript track: {}", e))
        })?;

        check_http_status(&response)?;

        response
            .json()
            .await
            .map_err(|e| BriefError::Acquisition(format!("Invalid transcript payload: {}", e)))
    }
}

#[async_trait]
impl AcquisitionStrategy for PlatformTranscriptStrategy {
    fn name(&self) -> &'static str {
        "platform"
    }

    #[instrument(skip(self), fields(video_id = %video))]
    async fn acquire(&self, video: &VideoId) -> Result<Acquisition> {
        let html = self.fetch_watch_page(video).await?;
        let api_key = self.extract_api_key(&html, video)?;
        let player = self.fetch_player_response(video, &api_key).await?;

        check_playability(video, &player)?;

        let base_url = match select_caption_track(&player, &self.languages) {
            Ok(url) => url,
            Err(reason) => return Ok(Acquisition::Miss(reason)),
        };

        let timed_text = self.fetch_timed_text(&base_url).await?;
        let text = join_fragments(&timed_text);

        if text.is_empty() {
            debug!("Transcript track was empty");
            return Ok(Acquisition::Miss(MissReason::NoTranscriptFound {
                languages: self.languages.clone(),
            }));
        }

        Ok(Acquisition::Acquired(Transcript::new(
            video,
            text,
            TranscriptSource::PlatformApi,
        )))
    }
}

fn check_http_status(response: &reqwest::Response) -> Result<()> {
    if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(BriefError::Acquisition(
            "Rate limited by the platform (HTTP 429)".to_string(),
        ));
    }
    if !response.status().is_success() {
        return Err(BriefError::Acquisition(format!(
            "HTTP {}",
            response.status()
        )));
    }
    Ok(())
}

/// Surface unplayable videos as fatal acquisition errors.
fn check_playability(video: &VideoId, player: &serde_json::Value) -> Result<()> {
    let Some(status_obj) = player.get("playabilityStatus") else {
        return Ok(());
    };

    let status = status_obj.get("status").and_then(|s| s.as_str()).unwrap_or("");
    if status == "OK" || status.is_empty() {
        return Ok(());
    }

    let reason = status_obj.get("reason").and_then(|r| r.as_str()).unwrap_or("");

    Err(BriefError::Acquisition(format!(
        "Video {} is not playable ({}: {})",
        video.as_str(),
        status,
        if reason.is_empty() { "no reason given" } else { reason }
    )))
}

/// Pick a caption track's timed-text URL from the player response.
///
/// Manually created tracks win over auto-generated ones for the same
/// language; languages are tried in the caller's preference order. Absence of
/// any caption data means transcripts are disabled for the video; caption
/// data without a matching language is a narrower miss.
fn select_caption_track(
    player: &serde_json::Value,
    languages: &[String],
) -> std::result::Result<String, MissReason> {
    let tracks = player
        .get("captions")
        .and_then(|c| c.get("playerCaptionsTracklistRenderer"))
        .and_then(|r| r.get("captionTracks"))
        .and_then(|t| t.as_array())
        .filter(|t| !t.is_empty())
        .ok_or(MissReason::TranscriptsDisabled)?;

    let track_url = |track: &serde_json::Value| {
        track
            .get("baseUrl")
            .and_then(|u| u.as_str())
            .map(|u| u.replace("&fmt=srv3", ""))
    };

    let is_generated = |track: &serde_json::Value| {
        track
            .get("kind")
            .and_then(|k| k.as_str())
            .map(|k| k == "asr")
            .unwrap_or(false)
    };

    let matches_language = |track: &serde_json::Value, wanted: &str| {
        track
            .get("languageCode")
            .and_then(|l| l.as_str())
            .map(|code| code == wanted)
            .unwrap_or(false)
    };

    for wanted in languages {
        for track in tracks.iter().filter(|t| !is_generated(t)) {
            if matches_language(track, wanted) {
                if let Some(url) = track_url(track) {
                    return Ok(url);
                }
            }
        }
        for track in tracks.iter().filter(|t| is_generated(t)) {
            if matches_language(track, wanted) {
                if let Some(url) = track_url(track) {
                    return Ok(url);
                }
            }
        }
    }

    Err(MissReason::NoTranscriptFound {
        languages: languages.to_vec(),
    })
}

/// Join timed-text fragments with single spaces, in service order.
///
/// Style-only events carry no segments and are skipped; whitespace inside a
/// fragment (including embedded newlines) is collapsed.
fn join_fragments(timed_text: &serde_json::Value) -> String {
    let Some(events) = timed_text.get("events").and_then(|e| e.as_array()) else {
        return String::new();
    };

    let mut fragments = Vec::new();
    for event in events {
        let Some(segs) = event.get("segs").and_then(|s| s.as_array()) else {
            continue;
        };

        let fragment: String = segs
            .iter()
            .filter_map(|seg| seg.get("utf8").and_then(|t| t.as_str()))
            .collect();

        let cleaned = fragment.split_whitespace().collect::<Vec<_>>().join(" ");
        if !cleaned.is_empty() {
            fragments.push(cleaned);
        }
    }

    fragments.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_with_tracks(tracks: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "captions": {
                "playerCaptionsTracklistRenderer": {
                    "captionTracks": tracks
                }
            }
        })
    }

    #[test]
    fn test_join_fragments_space_joins_in_order() {
        let timed_text = serde_json::json!({
            "events": [
                {"tStartMs": 0, "segs": [{"utf8": "Hello"}]},
                {"tStartMs": 1200, "segs": [{"utf8": "world"}]}
            ]
        });
        assert_eq!(join_fragments(&timed_text), "Hello world");
    }

    #[test]
    fn test_join_fragments_collapses_whitespace_and_skips_style_events() {
        let timed_text = serde_json::json!({
            "events": [
                {"tStartMs": 0, "wWinId": 1},
                {"tStartMs": 0, "segs": [{"utf8": "first\nline"}]},
                {"tStartMs": 500, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 900, "segs": [{"utf8": "  second "}, {"utf8": "half"}]}
            ]
        });
        assert_eq!(join_fragments(&timed_text), "first line second half");
    }

    #[test]
    fn test_no_caption_data_is_transcripts_disabled() {
        let player = serde_json::json!({"videoDetails": {}});
        let languages = vec!["en".to_string()];
        assert_eq!(
            select_caption_track(&player, &languages).unwrap_err(),
            MissReason::TranscriptsDisabled
        );
    }

    #[test]
    fn test_empty_track_list_is_transcripts_disabled() {
        let player = player_with_tracks(serde_json::json!([]));
        let languages = vec!["en".to_string()];
        assert_eq!(
            select_caption_track(&player, &languages).unwrap_err(),
            MissReason::TranscriptsDisabled
        );
    }

    #[test]
    fn test_missing_language_is_no_transcript_found() {
        let player = player_with_tracks(serde_json::json!([
            {"languageCode": "de", "baseUrl": "https://example.com/de"}
        ]));
        let languages = vec!["en".to_string()];
        match select_caption_track(&player, &languages).unwrap_err() {
            MissReason::NoTranscriptFound { languages } => assert_eq!(languages, vec!["en"]),
            other => panic!("unexpected miss: {:?}", other),
        }
    }

    #[test]
    fn test_manual_track_preferred_over_generated() {
        let player = player_with_tracks(serde_json::json!([
            {"languageCode": "en", "baseUrl": "https://example.com/asr", "kind": "asr"},
            {"languageCode": "en", "baseUrl": "https://example.com/manual"}
        ]));
        let languages = vec!["en".to_string()];
        assert_eq!(
            select_caption_track(&player, &languages).unwrap(),
            "https://example.com/manual"
        );
    }

    #[test]
    fn test_language_preference_order_wins() {
        let player = player_with_tracks(serde_json::json!([
            {"languageCode": "en-US", "baseUrl": "https://example.com/en-us"},
            {"languageCode": "en", "baseUrl": "https://example.com/en"}
        ]));
        let languages = vec!["en".to_string(), "en-US".to_string()];
        assert_eq!(
            select_caption_track(&player, &languages).unwrap(),
            "https://example.com/en"
        );
    }

    #[test]
    fn test_playability_error_is_fatal() {
        let video = VideoId::parse("dQw4w9WgXcQ").unwrap();
        let player = serde_json::json!({
            "playabilityStatus": {"status": "ERROR", "reason": "Video unavailable"}
        });
        let err = check_playability(&video, &player).unwrap_err();
        assert!(matches!(err, BriefError::Acquisition(_)));
    }

    #[test]
    fn test_playability_ok_passes() {
        let video = VideoId::parse("dQw4w9WgXcQ").unwrap();
        let player = serde_json::json!({"playabilityStatus": {"status": "OK"}});
        assert!(check_playability(&video, &player).is_ok());
    }
}
