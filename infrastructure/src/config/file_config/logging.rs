//! Event log configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
///
/// Diagnostic verbosity is controlled by `-v` / `RUST_LOG`; this section
/// only covers the JSONL audit trail of decision events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Append decision events to this JSONL file
    pub event_log: Option<PathBuf>,
}
