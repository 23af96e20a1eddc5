//! Client for the Gemini `generateContent` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("response contained no candidates")]
    NoCandidates,

    #[error("malformed response: {0}")]
    MalformedResponse(&'static str),
}

/// Turns one prompt into one block of text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.8,
            top_k: 40,
            max_output_tokens: 500,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// A blocked candidate (`finishReason: "SAFETY"`) carries no `content`.
#[derive(Debug, Default, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

/// Non-text parts (`functionCall`, `inlineData`) have no `text`.
#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        // Request URLs stay out of logged errors.
        GenerationError::Http(e.without_url())
    }
}

impl GenerateContentResponse {
    /// Text of the first candidate's first part, trimmed.
    pub fn first_text(&self) -> Result<String, GenerationError> {
        let candidate = self.candidates.first().ok_or(GenerationError::NoCandidates)?;
        let content = candidate
            .content
            .as_ref()
            .ok_or(GenerationError::MalformedResponse("candidate has no content"))?;
        let part = content
            .parts
            .first()
            .ok_or(GenerationError::MalformedResponse("candidate has no parts"))?;
        let text = part
            .text
            .as_deref()
            .ok_or(GenerationError::MalformedResponse("first part has no text"))?;
        Ok(text.trim().to_string())
    }
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    generation: GenerationConfig,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            generation: GenerationConfig::default(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, GenerationError> {
        Self::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_base_url.clone(),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        if self.api_key.is_empty() {
            return Err(GenerationError::MissingApiKey);
        }

        let body = GenerateContentRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: self.generation,
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status, body });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parsed.first_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_text_is_trimmed() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "\n  Across the nebula...  \n" } ] } },
                { "content": { "parts": [ { "text": "second" } ] } }
            ]
        }))
        .unwrap();
        assert_eq!(resp.first_text().unwrap(), "Across the nebula...");
    }

    #[test]
    fn test_empty_candidates_is_an_error() {
        let resp: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(matches!(resp.first_text(), Err(GenerationError::NoCandidates)));

        let resp: GenerateContentResponse =
            serde_json::from_value(json!({ "promptFeedback": {} })).unwrap();
        assert!(matches!(resp.first_text(), Err(GenerationError::NoCandidates)));
    }

    #[test]
    fn test_blocked_candidate_is_malformed() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [ { "finishReason": "SAFETY" } ]
        }))
        .unwrap();
        assert!(matches!(
            resp.first_text(),
            Err(GenerationError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_part_without_text_is_malformed() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [ { "content": { "parts": [ { "functionCall": {} } ] } } ]
        }))
        .unwrap();
        assert!(matches!(
            resp.first_text(),
            Err(GenerationError::MalformedResponse(_))
        ));

        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [ { "content": { "parts": [] } } ]
        }))
        .unwrap();
        assert!(matches!(
            resp.first_text(),
            Err(GenerationError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_transport_error_does_not_leak_api_key() {
        let client = GeminiClient::new(
            "SECRET_KEY_123".into(),
            "gemini-2.0-flash".into(),
            "http://127.0.0.1:9".into(),
        )
        .unwrap();

        let err = client.generate("hi").await.unwrap_err();
        assert!(matches!(err, GenerationError::Http(_)));
        assert!(!err.to_string().contains("SECRET_KEY_123"));
        assert!(!format!("{err:?}").contains("SECRET_KEY_123"));
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentRequest {
            contents: [Content {
                parts: [Part { text: "hello" }],
            }],
            generation_config: GenerationConfig::default(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generationConfig"]["topK"], 40);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 500);
        assert!((json["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = GeminiClient::new(
            "key".into(),
            "gemini-2.0-flash".into(),
            "https://example.test/v1beta/".into(),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_short_circuits() {
        let client = GeminiClient::new(
            String::new(),
            "gemini-2.0-flash".into(),
            "http://127.0.0.1:9".into(),
        )
        .unwrap();
        assert!(matches!(
            client.generate("hi").await,
            Err(GenerationError::MissingApiKey)
        ));
    }
}
