//! Interactive chat command.

use crate::chat::TranscriptChat;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::transcript::TranscriptResolver;
use crate::video::{self, VideoId};
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// Run the interactive chat command.
pub async fn run_chat(video: &str, model: Option<String>, mut settings: Settings) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Summarize) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ytbrief doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    if let Some(model) = model {
        settings.chat.model = model;
    }

    let video_id = VideoId::parse(video)?;

    let details = video::fetch_details(
        &video_id,
        Duration::from_secs(settings.transcript.tool_timeout_secs),
    )
    .await;
    Output::video_banner(&details);

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;

    let resolver = TranscriptResolver::new(&settings)?;

    let spinner = Output::spinner("Resolving transcript...");
    let transcript = match resolver.resolve_id(&video_id).await {
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

    let mut chat = TranscriptChat::new(&settings, transcript).with_prompts(prompts);

    println!("\n{}", style("ytbrief Chat").bold().cyan());
    println!(
        "{}\n",
        style("Ask about the video, or 'exit' to quit. Use 'clear' to reset conversation.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            chat.clear_history();
            Output::info("Conversation history cleared.");
            continue;
        }

        match chat.chat(input).await {
            Ok(answer) => {
                println!("\n{} {}\n", style("ytbrief:").cyan().bold(), answer);
            }
            Err(e) => {
                Output::error(&format!("Error: {}", e));
            }
        }
    }

    Ok(())
}
