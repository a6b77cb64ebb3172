//! Storage configuration from TOML (`[storage]` section)

use crate::storage::JsonlAssessmentRepository;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Store completed assessments
    pub enabled: bool,
    /// JSONL file; defaults to the platform data directory
    pub path: Option<PathBuf>,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl FileStorageConfig {
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path
            .clone()
            .or_else(JsonlAssessmentRepository::default_path)
    }
}
