//! Gemini generateContent backend.

use async_trait::async_trait;
use log::debug;
use serde_json::{json, Value};

use crate::config::GEMINI_API_BASE;
use crate::error_handling::BackendError;

use super::VerdictBackend;

/// Production backend: the Gemini REST API.
///
/// Stateless with respect to credentials; the key for each call comes from
/// the pool, so rotating keys never rebuilds the client.
pub struct GeminiBackend {
    http: reqwest::Client,
    endpoint: String,
}

impl GeminiBackend {
    pub fn new(http: reqwest::Client, model: &str) -> Self {
        GeminiBackend {
            http,
            endpoint: format!("{GEMINI_API_BASE}/{model}:generateContent"),
        }
    }

    /// Backend pointing at an arbitrary endpoint. Used by tests to target a
    /// local mock server.
    pub fn with_endpoint(http: reqwest::Client, endpoint: String) -> Self {
        GeminiBackend { http, endpoint }
    }
}

#[async_trait]
impl VerdictBackend for GeminiBackend {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, BackendError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }

        let envelope: Value = response.json().await?;
        let text = extract_candidate_text(&envelope).ok_or(BackendError::EmptyResponse)?;
        debug!("Gemini returned {} chars of candidate text", text.len());
        Ok(text)
    }
}

/// Pulls the concatenated text parts of the first candidate out of a
/// generateContent response envelope.
fn extract_candidate_text(envelope: &Value) -> Option<String> {
    let parts = envelope
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_candidate_text() {
        let envelope = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "part one " }, { "text": "part two" }] }
            }]
        });
        assert_eq!(
            extract_candidate_text(&envelope),
            Some("part one part two".to_string())
        );
    }

    #[test]
    fn test_extract_rejects_empty_envelope() {
        assert_eq!(extract_candidate_text(&json!({})), None);
        assert_eq!(
            extract_candidate_text(&json!({ "candidates": [] })),
            None
        );
        let no_text = json!({ "candidates": [{ "content": { "parts": [] } }] });
        assert_eq!(extract_candidate_text(&no_text), None);
    }
}
