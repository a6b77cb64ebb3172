//! Infrastructure layer for triage-consensus
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigWarning, FileConfig};
pub use providers::{GeminiGateway, ResilientGateway};
pub use storage::JsonlAssessmentRepository;
