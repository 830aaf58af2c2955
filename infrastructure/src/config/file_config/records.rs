//! Decision record configuration from TOML (`[records]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw record configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRecordsConfig {
    /// Directory the `ADR-<number>-<slug>.md` files are written to
    pub output_dir: PathBuf,
}

impl Default for FileRecordsConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("docs/decisions"),
        }
    }
}
