//! Role invocation
//!
//! Renders the prompt for one role and makes exactly one backend call. No
//! caching and no retries here: resilience is a decorator around the gateway.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use std::sync::Arc;
use tracing::debug;
use triage_domain::{NegotiationState, PromptTemplate, Role};

/// Invokes the nurse or doctor role against a gateway
pub struct RoleInvoker<G: LlmGateway + ?Sized> {
    gateway: Arc<G>,
}

impl<G: LlmGateway + ?Sized> RoleInvoker<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Build the role's prompt from `state` and return the raw response text.
    pub async fn invoke(&self, role: Role, state: &NegotiationState) -> Result<String, GatewayError> {
        let prompt = PromptTemplate::for_role(role, state);
        debug!(
            role = %role,
            model = %self.gateway.model_name(),
            prompt_bytes = prompt.len(),
            "Invoking role"
        );

        let response = self.gateway.generate(&prompt).await?;
        debug!(role = %role, response_bytes = response.len(), "Role responded");
        Ok(response)
    }
}
