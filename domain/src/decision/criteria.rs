//! Success criteria for decisions
//!
//! Selects which algorithm the outcome evaluator applies to a tally.

use serde::{Deserialize, Serialize};

/// Yes-share a simple majority must strictly exceed (percent of votes cast)
pub const SIMPLE_MAJORITY_PERCENT: usize = 50;

/// Yes-share a supermajority must reach (percent of required voters)
pub const SUPERMAJORITY_PERCENT: usize = 66;

/// Rule used to decide whether a proposal passes
///
/// # Example
///
/// ```
/// use decision_domain::decision::SuccessCriteria;
///
/// let rule: SuccessCriteria = "super_majority".parse().unwrap();
/// assert_eq!(rule, SuccessCriteria::SuperMajority);
/// assert_eq!(rule.as_str(), "super_majority");
/// assert!("plurality".parse::<SuccessCriteria>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SuccessCriteria {
    /// More than half of the votes cast are yes
    #[default]
    SimpleMajority,
    /// At least 66% of all required voters voted yes
    SuperMajority,
    /// Quorum reached, nobody voted no, and at least one yes
    Unanimous,
}

impl SuccessCriteria {
    /// Stable identifier used in storage and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            SuccessCriteria::SimpleMajority => "simple_majority",
            SuccessCriteria::SuperMajority => "super_majority",
            SuccessCriteria::Unanimous => "unanimous",
        }
    }

    /// Short label for documents
    pub fn label(&self) -> &'static str {
        match self {
            SuccessCriteria::SimpleMajority => "Simple majority",
            SuccessCriteria::SuperMajority => "Supermajority",
            SuccessCriteria::Unanimous => "Unanimous",
        }
    }

    /// Get a human-readable description of this rule
    pub fn description(&self) -> String {
        match self {
            SuccessCriteria::SimpleMajority => format!(
                "simple majority (more than {}% of votes cast)",
                SIMPLE_MAJORITY_PERCENT
            ),
            SuccessCriteria::SuperMajority => format!(
                "supermajority (at least {}% of required voters)",
                SUPERMAJORITY_PERCENT
            ),
            SuccessCriteria::Unanimous => "unanimous (quorum reached, no dissent)".to_string(),
        }
    }
}

impl std::fmt::Display for SuccessCriteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for SuccessCriteria {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "simple_majority" | "majority" | "simple" => Ok(SuccessCriteria::SimpleMajority),
            "super_majority" | "supermajority" | "super" => Ok(SuccessCriteria::SuperMajority),
            "unanimous" | "unanimity" => Ok(SuccessCriteria::Unanimous),
            _ => Err(format!(
                "Unknown success criteria: {}. Valid: simple_majority, super_majority, unanimous",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_criteria() {
        assert_eq!(
            "simple_majority".parse::<SuccessCriteria>().ok(),
            Some(SuccessCriteria::SimpleMajority)
        );
        assert_eq!(
            "Super-Majority".parse::<SuccessCriteria>().ok(),
            Some(SuccessCriteria::SuperMajority)
        );
        assert_eq!(
            "unanimity".parse::<SuccessCriteria>().ok(),
            Some(SuccessCriteria::Unanimous)
        );
    }

    #[test]
    fn test_parse_unknown_names_value() {
        let err = "ranked_choice".parse::<SuccessCriteria>().unwrap_err();
        assert!(err.contains("ranked_choice"));
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&SuccessCriteria::SuperMajority).unwrap();
        assert_eq!(json, "\"super_majority\"");
    }

    #[test]
    fn test_default() {
        assert_eq!(SuccessCriteria::default(), SuccessCriteria::SimpleMajority);
    }
}
