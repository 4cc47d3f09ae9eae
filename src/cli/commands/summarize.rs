//! Summarize command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::error::BriefError;
use crate::summary::{Summarizer, SummaryLength};
use crate::transcript::TranscriptResolver;
use crate::translate::{TargetLanguage, Translator};
use crate::video::{self, VideoId};
use anyhow::Result;
use std::str::FromStr;
use std::time::Duration;

/// Run the summarize command.
pub async fn run_summarize(
    video: &str,
    length: &str,
    translate: Option<String>,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Summarize) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ytbrief doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let length = SummaryLength::from_str(length)
        .map_err(BriefError::InvalidInput)?;
    let target_language = translate
        .map(|t| TargetLanguage::from_str(&t).map_err(BriefError::InvalidInput))
        .transpose()?;

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

    let summarizer = Summarizer::new(&settings).with_prompts(prompts.clone());

    let spinner = Output::spinner(&format!("Generating {} summary...", length));
    let mut summary = match summarizer.summarize(&transcript.text, length).await {
        Ok(s) => {
            spinner.finish_and_clear();
            s
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate summary: {}", e));
            return Err(e.into());
        }
    };

    if let Some(language) = target_language {
        let translator = Translator::new(&settings).with_prompts(prompts);
        let spinner = Output::spinner(&format!("Translating into {}...", language.name()));
        summary = match translator.translate(&summary, language).await {
            Ok(t) => {
                spinner.finish_and_clear();
                t
            }
            Err(e) => {
                spinner.finish_and_clear();
                Output::error(&format!("Failed to translate summary: {}", e));
                return Err(e.into());
            }
        };
    }

    match output {
        Some(path) => {
            std::fs::write(&path, &summary)?;
            Output::success(&format!("Summary written to {}", path));
        }
        None => {
            Output::header("Summary");
            println!("\n{}\n", summary);
        }
    }

    Ok(())
}
