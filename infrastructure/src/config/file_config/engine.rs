//! Engine configuration from TOML (`[engine]` section)
//!
//! ```toml
//! [engine]
//! default_criteria = "super_majority"   # or "simple_majority", "unanimous"
//! default_deadline_days = 7
//! records_enabled = true
//! ```

use decision_application::EngineConfig;
use decision_domain::{ConfigIssue, ConfigIssueCode, Severity, SuccessCriteria};
use serde::{Deserialize, Serialize};

/// Raw engine configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    /// Success rule for decisions created without one
    pub default_criteria: String,
    /// Days until the deadline for decisions created without one
    pub default_deadline_days: u32,
    /// Render and publish a record when a decision is finalized
    pub records_enabled: bool,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        Self {
            default_criteria: SuccessCriteria::default().as_str().to_string(),
            default_deadline_days: 7,
            records_enabled: true,
        }
    }
}

impl FileEngineConfig {
    /// Parse `default_criteria`, falling back to simple majority
    pub fn parse_criteria(&self) -> (SuccessCriteria, Vec<ConfigIssue>) {
        match self.default_criteria.parse::<SuccessCriteria>() {
            Ok(criteria) => (criteria, Vec::new()),
            Err(_) => (
                SuccessCriteria::default(),
                vec![ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "engine.default_criteria".to_string(),
                        value: self.default_criteria.clone(),
                        valid_values: vec![
                            "simple_majority".to_string(),
                            "super_majority".to_string(),
                            "unanimous".to_string(),
                        ],
                    },
                    message: format!(
                        "engine.default_criteria: unknown value '{}', falling back to 'simple_majority'",
                        self.default_criteria
                    ),
                }],
            ),
        }
    }

    /// Check `default_deadline_days`, falling back to the default of 7
    pub fn parse_deadline_days(&self) -> (u32, Vec<ConfigIssue>) {
        if self.default_deadline_days > 0 {
            return (self.default_deadline_days, Vec::new());
        }
        let fallback = Self::default().default_deadline_days;
        (
            fallback,
            vec![ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::ZeroValue {
                    field: "engine.default_deadline_days".to_string(),
                },
                message: format!(
                    "engine.default_deadline_days must be at least 1, using {}",
                    fallback
                ),
            }],
        )
    }

    /// Convert to the application-level config
    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            records_enabled: self.records_enabled,
            default_criteria: self.parse_criteria().0,
            default_deadline_days: self.parse_deadline_days().0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_default() {
        let config = FileEngineConfig::default();
        assert_eq!(config.default_criteria, "simple_majority");
        assert_eq!(config.default_deadline_days, 7);
        assert!(config.records_enabled);
    }

    #[test]
    fn test_engine_config_deserialize() {
        let toml_str = r#"
[engine]
default_criteria = "supermajority"
default_deadline_days = 3
records_enabled = false
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let engine = config.engine.to_engine_config();
        assert_eq!(engine.default_criteria, SuccessCriteria::SuperMajority);
        assert_eq!(engine.default_deadline_days, 3);
        assert!(!engine.records_enabled);
    }

    #[test]
    fn test_unknown_criteria_falls_back() {
        let config = FileEngineConfig {
            default_criteria: "plurality".to_string(),
            ..Default::default()
        };
        let (criteria, issues) = config.parse_criteria();
        assert_eq!(criteria, SuccessCriteria::SimpleMajority);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
        assert!(issues[0].message.contains("plurality"));
    }

    #[test]
    fn test_zero_deadline_days_falls_back() {
        let config = FileEngineConfig {
            default_deadline_days: 0,
            ..Default::default()
        };
        let (days, issues) = config.parse_deadline_days();
        assert_eq!(days, 7);
        assert!(matches!(
            &issues[0].code,
            ConfigIssueCode::ZeroValue { field } if field == "engine.default_deadline_days"
        ));
    }
}
