//! LLM Gateway port
//!
//! Defines the interface for communicating with the text-generation backend.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::ConnectionError(_) | GatewayError::Timeout => true,
            GatewayError::ApiError { status, .. } => *status == 429 || *status >= 500,
            GatewayError::InvalidResponse(_)
            | GatewayError::Configuration(_)
            | GatewayError::Other(_) => false,
        }
    }
}

/// Gateway for text generation
///
/// One call, one prompt, one response. No streaming and no conversation
/// state: every negotiation turn sends a fully rendered prompt.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send a prompt and return the generated text
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;

    /// Identifier of the backend model, for logs
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(GatewayError::Timeout.is_transient());
        assert!(GatewayError::ConnectionError("reset".into()).is_transient());
        assert!(
            GatewayError::ApiError {
                status: 503,
                message: "overloaded".into()
            }
            .is_transient()
        );
        assert!(
            GatewayError::ApiError {
                status: 429,
                message: "rate limited".into()
            }
            .is_transient()
        );
        assert!(
            !GatewayError::ApiError {
                status: 400,
                message: "bad request".into()
            }
            .is_transient()
        );
        assert!(!GatewayError::InvalidResponse("empty".into()).is_transient());
    }
}
