//! Word definition lookup against the free Dictionary API.

use crate::config::Settings;
use crate::error::{BriefError, Result};
use std::time::Duration;
use tracing::instrument;

/// Fixed message returned when a word has no dictionary entry.
pub const NOT_FOUND_MESSAGE: &str = "No definition found.";

/// Client for the Dictionary API entries endpoint.
pub struct DictionaryClient {
    client: reqwest::Client,
    endpoint: String,
}

impl DictionaryClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.dictionary.request_timeout_secs))
            .build()
            .map_err(|e| BriefError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: settings.dictionary.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Look up a word and return its first definition.
    ///
    /// An unknown word yields the fixed not-found message; transport and
    /// decoding problems are errors.
    #[instrument(skip(self))]
    pub async fn define(&self, word: &str) -> Result<String> {
        let word = word.trim();
        if word.is_empty() || word.contains(char::is_whitespace) {
            return Err(BriefError::InvalidInput(
                "Expected a single word to look up".to_string(),
            ));
        }

        let url = format!("{}/{}", self.endpoint, word.to_lowercase());
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BriefError::Dictionary(format!("Request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(NOT_FOUND_MESSAGE.to_string());
        }

        if !response.status().is_success() {
            return Err(BriefError::Dictionary(format!(
                "Dictionary service returned HTTP {}",
                response.status()
            )));
        }

        let entries: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BriefError::Dictionary(format!("Invalid response: {}", e)))?;

        Ok(first_definition(&entries).unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string()))
    }
}

/// Extract the first definition from an entries payload.
///
/// The payload is an array of entries, each with meanings, each with
/// definitions. The part of speech is prefixed when present.
fn first_definition(entries: &serde_json::Value) -> Option<String> {
    let entry = entries.as_array()?.first()?;

    let meaning = entry.get("meanings")?.as_array()?.first()?;
    let definition = meaning
        .get("definitions")?
        .as_array()?
        .first()?
        .get("definition")?
        .as_str()?;

    let part_of_speech = meaning.get("partOfSpeech").and_then(|p| p.as_str());

    Some(match part_of_speech {
        Some(pos) => format!("({}) {}", pos, definition),
        None => definition.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_definition_extracts_with_part_of_speech() {
        let payload = serde_json::json!([{
            "word": "listen",
            "meanings": [{
                "partOfSpeech": "verb",
                "definitions": [
                    {"definition": "To pay attention to a sound."},
                    {"definition": "To accept advice."}
                ]
            }]
        }]);

        assert_eq!(
            first_definition(&payload).unwrap(),
            "(verb) To pay attention to a sound."
        );
    }

    #[test]
    fn test_first_definition_without_part_of_speech() {
        let payload = serde_json::json!([{
            "meanings": [{
                "definitions": [{"definition": "A thing."}]
            }]
        }]);

        assert_eq!(first_definition(&payload).unwrap(), "A thing.");
    }

    #[test]
    fn test_first_definition_empty_payload() {
        assert!(first_definition(&serde_json::json!([])).is_none());
        assert!(first_definition(&serde_json::json!({"title": "No Definitions Found"})).is_none());
    }
}
