//! Transcript resolution with ordered fallback strategies.
//!
//! A video's transcript can come from three places, tried in strict priority
//! order: the platform's own transcript service, embedded caption tracks, and
//! finally speech-to-text over the downloaded audio. Platform transcripts are
//! authoritative and cheapest; captions are a degraded but still-authored
//! fallback; audio transcription is the most expensive and least accurate,
//! used only when both text sources are unavailable.

mod captions;
mod platform;
mod speech;

pub use captions::CaptionStrategy;
pub use platform::PlatformTranscriptStrategy;
pub use speech::SpeechToTextStrategy;

use crate::config::Settings;
use crate::error::{BriefError, Result};
use crate::video::VideoId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Which acquisition strategy produced a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptSource {
    /// Platform transcript service.
    PlatformApi,
    /// Embedded caption track.
    Captions,
    /// Speech-to-text over downloaded audio.
    SpeechToText,
}

impl std::fmt::Display for TranscriptSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptSource::PlatformApi => write!(f, "platform transcripts"),
            TranscriptSource::Captions => write!(f, "embedded captions"),
            TranscriptSource::SpeechToText => write!(f, "speech-to-text"),
        }
    }
}

/// A resolved transcript: plain text plus provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Video ID this transcript belongs to.
    pub video_id: String,
    /// Plain transcript text.
    pub text: String,
    /// Strategy that produced the text.
    pub source: TranscriptSource,
}

impl Transcript {
    pub fn new(video_id: &VideoId, text: String, source: TranscriptSource) -> Self {
        Self {
            video_id: video_id.as_str().to_string(),
            text,
            source,
        }
    }
}

/// Why a strategy declined without failing.
///
/// A miss moves the chain to the next strategy; a fatal error (returned as
/// `Err` from [`AcquisitionStrategy::acquire`]) stops the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissReason {
    /// The video has no caption data at all.
    TranscriptsDisabled,
    /// Caption data exists, but no track matches the requested languages.
    NoTranscriptFound { languages: Vec<String> },
    /// No usable embedded captions.
    CaptionsUnavailable,
}

impl MissReason {
    /// Convert a miss into its error, for when the chain is exhausted.
    fn into_error(self, video: &VideoId) -> BriefError {
        match self {
            MissReason::TranscriptsDisabled => {
                BriefError::TranscriptsDisabled(video.as_str().to_string())
            }
            MissReason::NoTranscriptFound { languages } => {
                BriefError::NoTranscriptFound(video.as_str().to_string(), languages.join(", "))
            }
            MissReason::CaptionsUnavailable => {
                BriefError::CaptionsUnavailable(video.as_str().to_string())
            }
        }
    }
}

impl std::fmt::Display for MissReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissReason::TranscriptsDisabled => write!(f, "transcripts disabled"),
            MissReason::NoTranscriptFound { languages } => {
                write!(f, "no transcript in [{}]", languages.join(", "))
            }
            MissReason::CaptionsUnavailable => write!(f, "captions unavailable"),
        }
    }
}

/// Outcome of one strategy's attempt.
#[derive(Debug)]
pub enum Acquisition {
    /// The strategy produced a transcript.
    Acquired(Transcript),
    /// The strategy declined; the chain continues.
    Miss(MissReason),
}

/// One entry in the fallback chain.
#[async_trait]
pub trait AcquisitionStrategy: Send + Sync {
    /// Strategy name, for logging.
    fn name(&self) -> &'static str;

    /// Attempt to acquire a transcript.
    ///
    /// `Ok(Acquired)` ends the chain with a transcript, `Ok(Miss)` hands over
    /// to the next strategy, and `Err` is fatal and surfaces to the caller.
    async fn acquire(&self, video: &VideoId) -> Result<Acquisition>;
}

/// Resolves a video reference to transcript text via the fallback chain.
pub struct TranscriptResolver {
    strategies: Vec<Box<dyn AcquisitionStrategy>>,
}

impl TranscriptResolver {
    /// Build the standard chain from settings.
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            strategies: vec![
                Box::new(PlatformTranscriptStrategy::new(settings)?),
                Box::new(CaptionStrategy::new(settings)),
                Box::new(SpeechToTextStrategy::new(settings)),
            ],
        })
    }

    /// Build a resolver from an explicit strategy list.
    pub fn with_strategies(strategies: Vec<Box<dyn AcquisitionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Resolve a transcript for the given video reference.
    ///
    /// Strategies run in order; misses fall through, fatal errors stop the
    /// chain immediately. Exhausting the chain surfaces the last miss as its
    /// corresponding error.
    pub async fn resolve(&self, reference: &str) -> Result<Transcript> {
        let video = VideoId::parse(reference)?;
        self.resolve_id(&video).await
    }

    /// Resolve a transcript for an already-parsed video ID.
    pub async fn resolve_id(&self, video: &VideoId) -> Result<Transcript> {
        let mut last_miss: Option<MissReason> = None;

        for strategy in &self.strategies {
            match strategy.acquire(video).await? {
                Acquisition::Acquired(transcript) => {
                    info!(
                        strategy = strategy.name(),
                        chars = transcript.text.len(),
                        "Transcript acquired"
                    );
                    return Ok(transcript);
                }
                Acquisition::Miss(reason) => {
                    warn!(strategy = strategy.name(), %reason, "Strategy missed, falling through");
                    last_miss = Some(reason);
                }
            }
        }

        let reason = last_miss.unwrap_or(MissReason::CaptionsUnavailable);
        Err(reason.into_error(video))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Test double returning a canned outcome and counting invocations.
    struct FakeStrategy {
        name: &'static str,
        outcome: fn(&VideoId) -> Result<Acquisition>,
        calls: Arc<AtomicUsize>,
    }

    impl FakeStrategy {
        fn boxed(
            name: &'static str,
            outcome: fn(&VideoId) -> Result<Acquisition>,
        ) -> (Box<dyn AcquisitionStrategy>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Box::new(Self {
                    name,
                    outcome,
                    calls: calls.clone(),
                }),
                calls,
            )
        }
    }

    #[async_trait]
    impl AcquisitionStrategy for FakeStrategy {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn acquire(&self, video: &VideoId) -> Result<Acquisition> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)(video)
        }
    }

    fn acquired(video: &VideoId, text: &str, source: TranscriptSource) -> Result<Acquisition> {
        Ok(Acquisition::Acquired(Transcript::new(
            video,
            text.to_string(),
            source,
        )))
    }

    #[tokio::test]
    async fn test_first_strategy_success_short_circuits() {
        let (first, _) = FakeStrategy::boxed("platform", |v| {
            acquired(v, "Hello world", TranscriptSource::PlatformApi)
        });
        let (second, second_calls) = FakeStrategy::boxed("captions", |v| {
            acquired(v, "unused", TranscriptSource::Captions)
        });

        let resolver = TranscriptResolver::with_strategies(vec![first, second]);
        let transcript = resolver
            .resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await
            .unwrap();

        assert_eq!(transcript.text, "Hello world");
        assert_eq!(transcript.source, TranscriptSource::PlatformApi);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_miss_falls_through_to_captions_before_speech() {
        let (platform, _) = FakeStrategy::boxed("platform", |_| {
            Ok(Acquisition::Miss(MissReason::NoTranscriptFound {
                languages: vec!["en".to_string()],
            }))
        });
        let (captions, _) = FakeStrategy::boxed("captions", |v| {
            acquired(v, "Hi everyone", TranscriptSource::Captions)
        });
        let (speech, speech_calls) = FakeStrategy::boxed("speech", |v| {
            acquired(v, "unused", TranscriptSource::SpeechToText)
        });

        let resolver = TranscriptResolver::with_strategies(vec![platform, captions, speech]);
        let transcript = resolver.resolve("dQw4w9WgXcQ").await.unwrap();

        assert_eq!(transcript.text, "Hi everyone");
        assert_eq!(transcript.source, TranscriptSource::Captions);
        assert_eq!(speech_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_double_miss_reaches_speech_to_text() {
        let (platform, _) = FakeStrategy::boxed("platform", |_| {
            Ok(Acquisition::Miss(MissReason::TranscriptsDisabled))
        });
        let (captions, _) = FakeStrategy::boxed("captions", |_| {
            Ok(Acquisition::Miss(MissReason::CaptionsUnavailable))
        });
        let (speech, _) = FakeStrategy::boxed("speech", |v| {
            acquired(v, "test audio text", TranscriptSource::SpeechToText)
        });

        let resolver = TranscriptResolver::with_strategies(vec![platform, captions, speech]);
        let transcript = resolver.resolve("dQw4w9WgXcQ").await.unwrap();

        assert_eq!(transcript.text, "test audio text");
        assert_eq!(transcript.source, TranscriptSource::SpeechToText);
    }

    #[tokio::test]
    async fn test_fatal_error_stops_the_chain() {
        let (platform, _) = FakeStrategy::boxed("platform", |_| {
            Err(BriefError::Acquisition("HTTP 429".to_string()))
        });
        let (captions, caption_calls) = FakeStrategy::boxed("captions", |v| {
            acquired(v, "unused", TranscriptSource::Captions)
        });

        let resolver = TranscriptResolver::with_strategies(vec![platform, captions]);
        let err = resolver.resolve("dQw4w9WgXcQ").await.unwrap_err();

        assert!(matches!(err, BriefError::Acquisition(_)));
        assert_eq!(caption_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_exhausted_chain_surfaces_last_miss() {
        let (platform, _) = FakeStrategy::boxed("platform", |_| {
            Ok(Acquisition::Miss(MissReason::TranscriptsDisabled))
        });
        let (captions, _) = FakeStrategy::boxed("captions", |_| {
            Ok(Acquisition::Miss(MissReason::CaptionsUnavailable))
        });

        let resolver = TranscriptResolver::with_strategies(vec![platform, captions]);
        let err = resolver.resolve("dQw4w9WgXcQ").await.unwrap_err();

        assert!(matches!(err, BriefError::CaptionsUnavailable(_)));
    }

    #[tokio::test]
    async fn test_malformed_reference_is_a_typed_error() {
        let resolver = TranscriptResolver::with_strategies(vec![]);
        let err = resolver.resolve("https://youtube.com/watch").await.unwrap_err();
        assert!(matches!(err, BriefError::MalformedReference(_)));
    }
}
