//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

mod backend;
mod logging;
mod output;
mod storage;

pub use backend::{FileBackendConfig, SUPPORTED_PROVIDERS};
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use storage::FileStorageConfig;

use serde::{Deserialize, Serialize};

/// A non-fatal problem found in the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
}

impl ConfigWarning {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Text-generation backend
    pub backend: FileBackendConfig,
    /// Assessment store
    pub storage: FileStorageConfig,
    /// Log file and default filter
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning every warning found.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = self.backend.validate();

        warnings.extend(self.output.parse_format().1);

        if self.storage.enabled && self.storage.resolved_path().is_none() {
            warnings.push(ConfigWarning::new(
                "storage.path",
                "no data directory found and no path set, assessments will not be stored",
            ));
        }

        warnings
    }
}
