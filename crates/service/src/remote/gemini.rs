use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{send_json, RemoteError};

const SERVICE: &str = "LLM service";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-pro";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Google Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Text of the first candidate, with its parts concatenated.
    pub async fn generate(&self, prompt: &str) -> Result<String, RemoteError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        let body = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "calling generateContent");

        let request = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body);
        let response: GenerateResponse = send_json(SERVICE, request).await?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(RemoteError::Decode {
                service: SERVICE,
                reason: "no candidate text in response".to_string(),
            });
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{http_client, testing::spawn, DEFAULT_TIMEOUT};
    use axum::http::HeaderMap;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_generate_joins_candidate_parts() -> Result<(), Box<dyn std::error::Error>> {
        let app = Router::new().route(
            "/models/{model}",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["x-goog-api-key"], "key-123");
                assert_eq!(body["contents"][0]["parts"][0]["text"], "rank please");

                Json(json!({
                    "candidates": [
                        {"content": {"parts": [{"text": "[{\"mentor_id\""}, {"text": ": \"a\"}]"}]}},
                        {"content": {"parts": [{"text": "ignored"}]}}
                    ]
                }))
            }),
        );
        let base = spawn(app).await;
        let client = GeminiClient::new(http_client(DEFAULT_TIMEOUT)?, base, "test-model", "key-123");

        let text = client.generate("rank please").await?;
        assert_eq!(text, "[{\"mentor_id\": \"a\"}]");
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_without_candidates() -> Result<(), Box<dyn std::error::Error>> {
        let app = Router::new().route(
            "/models/{model}",
            post(|| async { Json(json!({"candidates": []})) }),
        );
        let base = spawn(app).await;
        let client = GeminiClient::new(http_client(DEFAULT_TIMEOUT)?, base, "test-model", "k");

        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, RemoteError::Decode { .. }), "{err:?}");
        Ok(())
    }
}
