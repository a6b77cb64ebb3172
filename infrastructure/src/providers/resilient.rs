//! Timeout and retry decorator for any [`LlmGateway`]

use async_trait::async_trait;
use tracing::warn;
use triage_application::BehaviorConfig;
use triage_application::ports::llm_gateway::{GatewayError, LlmGateway};

/// Applies a per-call timeout and retries transient failures
pub struct ResilientGateway<G: LlmGateway> {
    inner: G,
    config: BehaviorConfig,
}

impl<G: LlmGateway> ResilientGateway<G> {
    pub fn new(inner: G, config: BehaviorConfig) -> Self {
        Self { inner, config }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    async fn attempt(&self, prompt: &str) -> Result<String, GatewayError> {
        match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, self.inner.generate(prompt))
                .await
                .unwrap_or(Err(GatewayError::Timeout)),
            None => self.inner.generate(prompt).await,
        }
    }
}

#[async_trait]
impl<G: LlmGateway> LlmGateway for ResilientGateway<G> {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let mut retry = 0;
        loop {
            match self.attempt(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() && retry < self.config.max_retries => {
                    retry += 1;
                    let delay = self.config.backoff_for(retry);
                    warn!(
                        model = %self.inner.model_name(),
                        retry,
                        max_retries = self.config.max_retries,
                        "Transient backend error, retrying in {:?}: {}",
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}
