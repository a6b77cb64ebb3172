//! Backend configuration from TOML (`[backend]` section)

use super::ConfigWarning;
use crate::providers::{DEFAULT_API_KEY_ENV, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use serde::{Deserialize, Serialize};
use triage_application::BehaviorConfig;

/// Providers this build can talk to
pub const SUPPORTED_PROVIDERS: &[&str] = &["gemini"];

/// Text-generation backend configuration.
///
/// ```toml
/// [backend]
/// provider = "gemini"
/// model = "gemini-2.0-flash"
/// api_key_env = "GOOGLE_API_KEY"
/// timeout_seconds = 60
/// max_retries = 2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    pub provider: String,
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub base_url: String,
    /// Per-call timeout; 0 disables it
    pub timeout_seconds: u64,
    /// Retries for transient failures
    pub max_retries: u32,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout_seconds: 60,
            max_retries: 2,
        }
    }
}

impl FileBackendConfig {
    pub fn behavior(&self) -> BehaviorConfig {
        BehaviorConfig::from_timeout_seconds(Some(self.timeout_seconds))
            .with_max_retries(self.max_retries)
    }

    pub(super) fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if !SUPPORTED_PROVIDERS.contains(&self.provider.to_lowercase().as_str()) {
            warnings.push(ConfigWarning::new(
                "backend.provider",
                format!(
                    "unknown provider '{}', expected one of: {}",
                    self.provider,
                    SUPPORTED_PROVIDERS.join(", ")
                ),
            ));
        }
        if self.model.trim().is_empty() {
            warnings.push(ConfigWarning::new("backend.model", "model name is empty"));
        }
        if self.timeout_seconds == 0 {
            warnings.push(ConfigWarning::new(
                "backend.timeout_seconds",
                "timeout is 0, backend calls will never time out",
            ));
        }

        warnings
    }
}
