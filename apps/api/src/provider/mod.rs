//! Provider client — the single point of entry for all generative-text
//! API calls in this service.
//!
//! ARCHITECTURAL RULE: no other module may call the Generative Language
//! API directly. All provider interactions MUST go through this module.
//!
//! Errors are a closed taxonomy classified from HTTP status codes. The
//! model-fallback loop in `generation::generator` switches on these
//! variants; it never inspects message text.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Typed provider failure. `RateLimited` and `Overloaded` are transient
/// (worth trying the next model after a delay); `NotFound` means the model
/// identifier is unknown to the provider (try the next model immediately);
/// everything else is terminal for the current generation attempt.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited")]
    RateLimited,

    #[error("service overloaded")]
    Overloaded,

    #[error("model not found")]
    NotFound,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("provider returned empty content")]
    EmptyContent,
}

impl ProviderError {
    /// Transient failures warrant retrying against a different model.
    pub fn is_transient(&self) -> bool {
        matches!(self, ProviderError::RateLimited | ProviderError::Overloaded)
    }
}

/// Seam between the generator and the remote provider, mockable in tests.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Asks the given model to complete `prompt`, returning raw text.
    async fn generate_text(&self, model: &str, prompt: &str) -> Result<String, ProviderError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Reqwest-backed client for the Generative Language `generateContent`
/// endpoint. One instance is shared by all requests.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, GEMINI_API_BASE)
    }

    /// Constructor with an overridable base URL, used by HTTP-mock tests.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TextProvider for GeminiClient {
    async fn generate_text(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(ProviderError::Http)?;

        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| p.text.clone())
            .filter(|t| !t.trim().is_empty())
            .ok_or(ProviderError::EmptyContent)?;

        debug!("Provider call to {model} succeeded ({} chars)", text.len());
        Ok(text)
    }
}

/// Maps a non-success HTTP status to the error taxonomy. 5xx is treated
/// as overload; the provider reports capacity problems as 503 but other
/// server errors are equally transient from the caller's perspective.
fn classify_failure(status: u16, body: String) -> ProviderError {
    match status {
        429 => ProviderError::RateLimited,
        404 => ProviderError::NotFound,
        500..=599 => ProviderError::Overloaded,
        _ => {
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            ProviderError::Api { status, message }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn classify_failure_maps_statuses_to_taxonomy() {
        assert!(matches!(
            classify_failure(429, String::new()),
            ProviderError::RateLimited
        ));
        assert!(matches!(
            classify_failure(404, String::new()),
            ProviderError::NotFound
        ));
        assert!(matches!(
            classify_failure(503, String::new()),
            ProviderError::Overloaded
        ));
        assert!(matches!(
            classify_failure(400, String::new()),
            ProviderError::Api { status: 400, .. }
        ));
    }

    #[test]
    fn classify_failure_extracts_api_error_message() {
        let body = r#"{"error": {"message": "API key not valid", "code": 400}}"#.to_string();
        match classify_failure(400, body) {
            ProviderError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn transient_classification_covers_rate_limit_and_overload_only() {
        assert!(ProviderError::RateLimited.is_transient());
        assert!(ProviderError::Overloaded.is_transient());
        assert!(!ProviderError::NotFound.is_transient());
        assert!(!ProviderError::EmptyContent.is_transient());
    }

    #[tokio::test]
    async fn generate_text_returns_first_candidate_text() {
        let server = MockServer::start().await;

        let body = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Lovely place, would return." }] } }
            ]
        });

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url("test-key".to_string(), server.uri());
        let text = client
            .generate_text("gemini-2.0-flash", "write a review")
            .await
            .expect("should succeed");

        assert_eq!(text, "Lovely place, would return.");
    }

    #[tokio::test]
    async fn generate_text_surfaces_rate_limit_as_typed_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url("test-key".to_string(), server.uri());
        let err = client
            .generate_text("gemini-2.0-flash", "write a review")
            .await
            .expect_err("should fail");

        assert!(matches!(err, ProviderError::RateLimited));
    }

    #[tokio::test]
    async fn generate_text_with_no_candidates_is_empty_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url("test-key".to_string(), server.uri());
        let err = client
            .generate_text("gemini-2.0-flash", "write a review")
            .await
            .expect_err("should fail");

        assert!(matches!(err, ProviderError::EmptyContent));
    }
}
