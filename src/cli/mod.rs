//! CLI module for ytbrief.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// ytbrief - YouTube Video Summarizer
///
/// Paste a YouTube link, get the transcript, a summary, a translation,
/// or a conversation about the video.
#[derive(Parser, Debug)]
#[command(name = "ytbrief")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a YouTube video
    Summarize {
        /// YouTube URL or 11-character video ID
        video: String,

        /// Summary length (short, medium, detailed)
        #[arg(short, long, default_value = "short")]
        length: String,

        /// Translate the summary (ta, hi, fr)
        #[arg(short, long)]
        translate: Option<String>,

        /// Write the summary to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Resolve and print a video's transcript
    Transcript {
        /// YouTube URL or 11-character video ID
        video: String,

        /// Write the transcript to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Ask a single question about a video
    Ask {
        /// YouTube URL or 11-character video ID
        video: String,

        /// The question to ask
        question: String,

        /// LLM model to use for the answer
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Start an interactive chat session about a video
    Chat {
        /// YouTube URL or 11-character video ID
        video: String,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Look up a word definition
    Define {
        /// The word to look up
        word: String,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "summary.model")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
