use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{Summarizer, SummaryResponse};

/// Substituted when a successful model reply carries no usable text.
pub const NO_SUMMARY_FALLBACK: &str = "No summary generated.";

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub async fn send_generate_content_request(
        &self,
        model_name: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
        };

        let resp = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url,
                model_name.into()
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(GeminiError::Api { status, message });
        }

        Ok(resp.json::<GenerateContentResponse>().await?)
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, if there are any.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text = parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<String>()
            .trim()
            .to_string();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl Summarizer for GeminiClient {
    const SUMMARIZER_MODEL: &'static str = "gemini-1.5-pro-latest";
    type Error = GeminiError;

    async fn summarize(&self, prompt: &str) -> Result<SummaryResponse, Self::Error> {
        let response = self
            .send_generate_content_request(Self::SUMMARIZER_MODEL, prompt)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize content"))?;

        let summary = response
            .text()
            .unwrap_or_else(|| NO_SUMMARY_FALLBACK.to_string());

        Ok(SummaryResponse { summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "Summarize this: hello".into(),
                }],
            }],
        };

        let value = serde_json::to_value(&body).expect("serializes");
        assert_eq!(
            value,
            json!({"contents": [{"parts": [{"text": "Summarize this: hello"}]}]})
        );
    }

    #[test]
    fn test_response_text_reads_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "A summary."}], "role": "model"}, "finishReason": "STOP"},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .expect("deserializes");

        assert_eq!(response.text().as_deref(), Some("A summary."));
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "Part one. "}, {"text": "Part two."}]}}
            ]
        }))
        .expect("deserializes");

        assert_eq!(response.text().as_deref(), Some("Part one. Part two."));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({})).expect("deserializes");
        assert!(response.text().is_none());
    }

    #[test]
    fn test_response_with_blank_text_has_no_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "   "}]}}]
        }))
        .expect("deserializes");

        assert!(response.text().is_none());
    }
}
