//! Ask command implementation.

use crate::chat::TranscriptChat;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::transcript::TranscriptResolver;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(
    video: &str,
    question: &str,
    model: Option<String>,
    mut settings: Settings,
) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Summarize) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ytbrief doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    if let Some(model) = model {
        settings.chat.model = model;
    }

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;

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

    let chat = TranscriptChat::new(&settings, transcript).with_prompts(prompts);

    let spinner = Output::spinner("Thinking...");
    match chat.ask(question).await {
        Ok(answer) => {
            spinner.finish_and_clear();
            println!("\n{}\n", answer);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
