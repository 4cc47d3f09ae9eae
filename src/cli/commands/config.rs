//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Set { key, value } => {
            let updated = set_key(&settings, key, value)?;
            updated.validate()?;
            updated.save()?;
            Output::success(&format!("Set {} = {}", key, value));
        }

        ConfigAction::Edit => {
            let config_path = Settings::default_config_path();

            // Create default config if it doesn't exist
            if !config_path.exists() {
                settings.save()?;
                Output::info(&format!("Created default config at {:?}", config_path));
            }

            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

            Output::info(&format!("Opening config in {}...", editor));

            let status = std::process::Command::new(&editor)
                .arg(&config_path)
                .status();

            match status {
                Ok(s) if s.success() => {
                    Output::success("Config saved.");
                }
                Ok(_) => {
                    Output::warning("Editor exited with non-zero status.");
                }
                Err(e) => {
                    Output::error(&format!("Failed to open editor: {}", e));
                    Output::info(&format!("Config file is at: {:?}", config_path));
                }
            }
        }

        ConfigAction::Path => {
            let config_path = Settings::default_config_path();
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Apply a dotted-key assignment (e.g. "summary.model") to the settings.
fn set_key(settings: &Settings, key: &str, value: &str) -> Result<Settings> {
    let mut table: toml::Value = toml::Value::try_from(settings)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    let mut node = &mut table;
    let parts: Vec<&str> = key.split('.').collect();
    let (last, path) = parts
        .split_last()
        .ok_or_else(|| anyhow::anyhow!("Empty configuration key"))?;

    for part in path {
        node = node
            .get_mut(*part)
            .ok_or_else(|| anyhow::anyhow!("Unknown configuration section: {}", part))?;
    }

    let slot = node
        .get_mut(*last)
        .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))?;

    // Keep the existing value's type: numbers stay numbers, strings stay strings.
    *slot = match slot {
        toml::Value::String(_) => toml::Value::String(value.to_string()),
        toml::Value::Integer(_) => toml::Value::Integer(value.parse()?),
        toml::Value::Float(_) => toml::Value::Float(value.parse()?),
        toml::Value::Boolean(_) => toml::Value::Boolean(value.parse()?),
        toml::Value::Array(_) => toml::Value::Array(
            value
                .split(',')
                .map(|s| toml::Value::String(s.trim().to_string()))
                .collect(),
        ),
        _ => {
            return Err(anyhow::anyhow!(
                "Key {} is not a settable value",
                key
            ))
        }
    };

    let updated: Settings = table
        .try_into()
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_key_string() {
        let settings = Settings::default();
        let updated = set_key(&settings, "summary.model", "gpt-4.1").unwrap();
        assert_eq!(updated.summary.model, "gpt-4.1");
    }

    #[test]
    fn test_set_key_integer() {
        let settings = Settings::default();
        let updated = set_key(&settings, "chat.max_history_messages", "40").unwrap();
        assert_eq!(updated.chat.max_history_messages, 40);
    }

    #[test]
    fn test_set_key_list() {
        let settings = Settings::default();
        let updated = set_key(&settings, "transcript.languages", "en, de").unwrap();
        assert_eq!(updated.transcript.languages, vec!["en", "de"]);
    }

    #[test]
    fn test_set_key_unknown() {
        let settings = Settings::default();
        assert!(set_key(&settings, "summary.nonexistent", "x").is_err());
        assert!(set_key(&settings, "bogus.model", "x").is_err());
    }
}
