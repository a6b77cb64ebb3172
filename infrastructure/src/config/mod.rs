//! Configuration file loading for triage-consensus
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TRIAGE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./triage.toml` or `./.triage.toml`
//! 4. Global: `$XDG_CONFIG_HOME/triage-consensus/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigWarning, FileBackendConfig, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileStorageConfig, SUPPORTED_PROVIDERS,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
