//! Define command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::dictionary::DictionaryClient;
use anyhow::Result;
use console::style;

/// Run the define command.
pub async fn run_define(word: &str, settings: Settings) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Define) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let client = DictionaryClient::new(&settings)?;

    let spinner = Output::spinner("Looking up definition...");
    match client.define(word).await {
        Ok(definition) => {
            spinner.finish_and_clear();
            println!("\n{}: {}\n", style(word).bold(), definition);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Lookup failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
