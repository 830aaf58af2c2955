//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod engine;
mod logging;
mod output;
mod records;
mod storage;

pub use engine::FileEngineConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use records::FileRecordsConfig;
pub use storage::FileStorageConfig;

use decision_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Decision defaults and record switch
    pub engine: FileEngineConfig,
    /// Where decisions and votes are stored
    pub storage: FileStorageConfig,
    /// Where decision records are written
    pub records: FileRecordsConfig,
    /// Decision event log
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Display names keyed by user ID
    pub users: BTreeMap<String, String>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.engine.parse_criteria().1);
        issues.extend(self.engine.parse_deadline_days().1);

        for (user_id, name) in &self.users {
            if name.trim().is_empty() {
                issues.push(ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::EmptyDisplayName {
                        user_id: user_id.clone(),
                    },
                    message: format!(
                        "users.{}: empty display name, the user ID will be shown instead",
                        user_id
                    ),
                });
            }
        }

        issues
    }
}
