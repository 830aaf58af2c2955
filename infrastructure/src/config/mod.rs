//! Configuration file loading for decision-quorum
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `DECIDE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./decide.toml` or `./.decide.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/decision-quorum/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileEngineConfig, FileLoggingConfig, FileOutputConfig, FileRecordsConfig,
    FileStorageConfig,
};
pub use loader::ConfigLoader;
