//! ytbrief CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ytbrief::cli::{commands, Cli, Commands};
use ytbrief::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ytbrief={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load and validate configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };
    settings.validate()?;

    // Execute command
    match &cli.command {
        Commands::Summarize {
            video,
            length,
            translate,
            output,
        } => {
            commands::run_summarize(video, length, translate.clone(), output.clone(), settings)
                .await?;
        }

        Commands::Transcript { video, output } => {
            commands::run_transcript(video, output.clone(), settings).await?;
        }

        Commands::Ask {
            video,
            question,
            model,
        } => {
            commands::run_ask(video, question, model.clone(), settings).await?;
        }

        Commands::Chat { video, model } => {
            commands::run_chat(video, model.clone(), settings).await?;
        }

        Commands::Define { word } => {
            commands::run_define(word, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
