// src/services/gemini.rs
//
// Thin HTTP client for the Gemini generateContent endpoint. One call in,
// one piece of text out; every other outcome is a `GeminiError`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The one model this gateway talks to.
pub const GEMINI_MODEL: &str = "gemini-3-flash-preview";

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("failed to reach the Gemini API: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gemini API returned error status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse Gemini API response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Gemini API blocked the prompt: {0}")]
    Blocked(String),

    #[error("Gemini API response contained no text")]
    Empty,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_base_url(GEMINI_API_BASE_URL, model)
    }

    /// Point the client somewhere other than the real API (used by tests
    /// against a local mock server).
    pub fn with_base_url(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Request a single completion for `prompt` using `api_key`.
    /// No retries; the caller sees exactly one downstream attempt.
    pub async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, GeminiError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "calling Gemini API");

        let response = self.http.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_string());
            tracing::error!(status = status.as_u16(), body = %body, "Gemini API error");
            return Err(GeminiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&raw).map_err(GeminiError::Decode)?;

        if let Some(reason) = parsed
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            return Err(GeminiError::Blocked(reason));
        }

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .filter(|text| !text.is_empty())
            .ok_or(GeminiError::Empty)?;

        tracing::debug!(response_len = text.len(), "Gemini API responded");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client_for(server: &Server) -> GeminiClient {
        GeminiClient::with_base_url(server.url(), GEMINI_MODEL)
    }

    #[tokio::test]
    async fn generate_returns_candidate_text() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-3-flash-preview:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_body(
                r#"{"candidates":[{"content":{"parts":[{"text":"hi there"}],"role":"model"}}]}"#,
            )
            .create_async()
            .await;

        let result = client_for(&server).generate("test-key", "say hi").await;

        mock.assert_async().await;
        assert_eq!(result.unwrap(), "hi there");
    }

    #[tokio::test]
    async fn generate_sends_prompt_verbatim() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-3-flash-preview:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_body(Matcher::PartialJson(serde_json::json!({
                "contents": [{"parts": [{"text": "exact prompt text"}]}]
            })))
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"ok"}]}}]}"#)
            .create_async()
            .await;

        let result = client_for(&server)
            .generate("test-key", "exact prompt text")
            .await;

        mock.assert_async().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn error_status_carries_upstream_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-3-flash-preview:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "bad-key".into()))
            .with_status(400)
            .with_body(r#"{"error":{"message":"API key not valid"}}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .generate("bad-key", "prompt")
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, GeminiError::Status { status: 400, .. }));
        assert!(err.to_string().contains("API key not valid"));
    }

    #[tokio::test]
    async fn blocked_prompt_is_an_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-3-flash-preview:generateContent")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates":[],"promptFeedback":{"blockReason":"SAFETY"}}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .generate("test-key", "prompt")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("SAFETY"));
    }

    #[tokio::test]
    async fn missing_candidates_is_an_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-3-flash-preview:generateContent")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .generate("test-key", "prompt")
            .await
            .unwrap_err();

        assert!(matches!(err, GeminiError::Empty));
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-3-flash-preview:generateContent")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("this is not json")
            .create_async()
            .await;

        let err = client_for(&server)
            .generate("test-key", "prompt")
            .await
            .unwrap_err();

        assert!(matches!(err, GeminiError::Decode(_)));
    }
}
