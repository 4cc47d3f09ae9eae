//! ytbrief - YouTube Video Summarizer
//!
//! A CLI tool for turning YouTube videos into summaries, translations, and
//! conversations.
//!
//! # Overview
//!
//! ytbrief allows you to:
//! - Resolve the best available transcript for a video (platform transcripts,
//!   embedded captions, or speech-to-text, in that order)
//! - Generate summaries at three length tiers
//! - Translate summaries into a small set of target languages
//! - Look up word definitions
//! - Ask questions about a video in a chat session
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `video` - Video reference parsing and metadata
//! - `transcript` - Transcript resolution with ordered fallback strategies
//! - `audio` - Audio download and processing
//! - `transcription` - Speech-to-text transcription
//! - `summary` - Summary generation
//! - `translate` - Summary translation
//! - `dictionary` - Word definition lookup
//! - `chat` - Question answering over a transcript
//!
//! # Example
//!
//! ```rust,no_run
//! use ytbrief::config::Settings;
//! use ytbrief::summary::{Summarizer, SummaryLength};
//! use ytbrief::transcript::TranscriptResolver;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     settings.validate()?;
//!
//!     let resolver = TranscriptResolver::new(&settings)?;
//!     let transcript = resolver
//!         .resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
//!         .await?;
//!
//!     let summarizer = Summarizer::new(&settings);
//!     let summary = summarizer
//!         .summarize(&transcript.text, SummaryLength::Short)
//!         .await?;
//!     println!("{}", summary);
//!
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod chat;
pub mod cli;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod openai;
pub mod summary;
pub mod transcript;
pub mod transcription;
pub mod translate;
pub mod video;

pub use error::{BriefError, Result};
