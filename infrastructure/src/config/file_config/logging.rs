//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Also write tracing output to this file
    pub log_file: Option<PathBuf>,
    /// Filter used when no `-v` flag is given, e.g. "info" or "triage_application=debug"
    pub level: Option<String>,
}
