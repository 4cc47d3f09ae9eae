//! Transcript command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::TranscriptResolver;
use anyhow::Result;

/// Run the transcript command.
pub async fn run_transcript(
    video: &str,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Transcript) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ytbrief doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let resolver = TranscriptResolver::new(&settings)?;

    let spinner = Output::spinner("Resolving transcript...");
    let transcript = match resolver.resolve(video).await {
        Ok(t) => {
            spinner.finish_and_clear();
            t
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to resolve transcript: {}", e));
            return Err(e.into());
        }
    };

    Output::transcript_source(transcript.source);

    match output {
        Some(path) => {
            std::fs::write(&path, &transcript.text)?;
            Output::success(&format!("Transcript written to {}", path));
        }
        None => {
            println!("\n{}\n", transcript.text);
        }
    }

    Ok(())
}
