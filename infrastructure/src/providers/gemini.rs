//! Gemini backend
//!
//! Calls the `generateContent` REST endpoint with one user turn per prompt and
//! concatenates the text parts of the first candidate.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use triage_application::ports::llm_gateway::{GatewayError, LlmGateway};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_API_KEY";

// ============================================================================
// API Types
// ============================================================================

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiTextPart>,
}

#[derive(Serialize)]
struct GeminiTextPart {
    text: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiError>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContentResponse>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
}

fn build_request(prompt: &str) -> GeminiRequest {
    GeminiRequest {
        contents: vec![GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiTextPart {
                text: prompt.to_string(),
            }],
        }],
    }
}

/// Map an HTTP status and body to the generated text or a gateway error.
fn parse_response(status: u16, body: &str) -> Result<String, GatewayError> {
    let parsed: Result<GeminiResponse, _> = serde_json::from_str(body);

    if !(200..300).contains(&status) {
        let message = parsed
            .ok()
            .and_then(|r| r.error)
            .map(|e| e.message)
            .unwrap_or_else(|| body.trim().to_string());
        return Err(GatewayError::ApiError { status, message });
    }

    let response = parsed.map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

    if let Some(error) = response.error {
        return Err(GatewayError::ApiError {
            status,
            message: error.message,
        });
    }

    let candidate = response
        .candidates
        .and_then(|c| c.into_iter().next())
        .ok_or_else(|| GatewayError::InvalidResponse("no candidates in response".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(GatewayError::InvalidResponse(format!(
            "empty candidate (finish reason: {})",
            reason
        )));
    }

    Ok(text)
}

/// Gateway backed by the Gemini REST API
pub struct GeminiGateway {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiGateway {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }

    /// Read the API key from the environment variable `api_key_env`.
    pub fn from_env(api_key_env: &str, model: impl Into<String>) -> Result<Self, GatewayError> {
        let api_key = std::env::var(api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GatewayError::Configuration(format!("{} not set", api_key_env)))?;
        Ok(Self::new(api_key, model))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&build_request(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;
        debug!(model = %self.model, status, body_bytes = body.len(), "Gemini responded");

        parse_response(status, &body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let value = serde_json::to_value(build_request("hello")).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn test_parse_success_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"ESI Level: 2"},{"text":"\nConfidence: High"}]},"finishReason":"STOP"}]}"#;
        assert_eq!(
            parse_response(200, body).unwrap(),
            "ESI Level: 2\nConfidence: High"
        );
    }

    #[test]
    fn test_parse_http_error_uses_api_message() {
        let body = r#"{"error":{"code":429,"message":"Resource exhausted"}}"#;
        let err = parse_response(429, body).unwrap_err();
        assert_eq!(
            err,
            GatewayError::ApiError {
                status: 429,
                message: "Resource exhausted".to_string()
            }
        );
        assert!(err.is_transient());
    }

    #[test]
    fn test_parse_http_error_with_plain_body() {
        let err = parse_response(502, "Bad Gateway\n").unwrap_err();
        assert_eq!(
            err,
            GatewayError::ApiError {
                status: 502,
                message: "Bad Gateway".to_string()
            }
        );
    }

    #[test]
    fn test_parse_blocked_candidate() {
        let body = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;
        match parse_response(200, body) {
            Err(GatewayError::InvalidResponse(msg)) => assert!(msg.contains("SAFETY")),
            other => panic!("Expected InvalidResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_no_candidates() {
        assert!(matches!(
            parse_response(200, "{}"),
            Err(GatewayError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_response(200, "not json"),
            Err(GatewayError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_endpoint() {
        let gateway = GeminiGateway::new("key", DEFAULT_GEMINI_MODEL).with_base_url("http://localhost:8080/v1beta/");
        assert_eq!(
            gateway.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(gateway.model_name(), "gemini-2.0-flash");
    }

    #[test]
    fn test_from_env_missing_key() {
        let result = GeminiGateway::from_env("TRIAGE_TEST_KEY_THAT_IS_NEVER_SET", DEFAULT_GEMINI_MODEL);
        assert!(matches!(result, Err(GatewayError::Configuration(_))));
    }
}
