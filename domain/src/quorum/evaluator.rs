//! Outcome evaluation
//!
//! Applies one of the three success rules to a tally and the roster size.
//! Every path returns a [`DecisionResult`]; invalid input is reported in
//! the result, never by panicking or returning an error.
//!
//! | Rule | Denominator | Passes when |
//! |------|-------------|-------------|
//! | simple majority | votes cast | `yes / total > 50%` |
//! | supermajority | required voters | `yes / required >= 66%` |
//! | unanimous | required voters | quorum met, no `no` votes, at least one `yes` |

use super::tally::{VoteCounts, percentage};
use crate::decision::{SIMPLE_MAJORITY_PERCENT, SUPERMAJORITY_PERCENT, SuccessCriteria};
use serde::{Deserialize, Serialize};

/// Verdict for a decision, recomputed on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResult {
    pub passed: bool,
    /// Human-readable explanation
    pub reason: String,
    pub vote_counts: VoteCounts,
    /// Yes-share in percent, rounded to two decimals
    pub percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_voters_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_votes: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quorum: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quorum_met: Option<bool>,
    /// Set when the input itself was invalid (e.g. unknown success criteria)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

impl DecisionResult {
    fn verdict(passed: bool, reason: String, counts: &VoteCounts, percentage: f64) -> Self {
        Self {
            passed,
            reason,
            vote_counts: *counts,
            percentage,
            required_voters_count: None,
            missing_votes: None,
            quorum: None,
            quorum_met: None,
            error: false,
        }
    }

    /// Result for a success criteria value nobody recognizes
    pub fn invalid_criteria(raw: &str, counts: &VoteCounts) -> Self {
        Self {
            error: true,
            ..Self::verdict(
                false,
                format!(
                    "Invalid success criteria '{}' (expected simple_majority, super_majority or unanimous)",
                    raw
                ),
                counts,
                0.0,
            )
        }
    }

    fn with_required(mut self, required: usize, counts: &VoteCounts) -> Self {
        self.required_voters_count = Some(required);
        self.missing_votes = Some(counts.remaining(required));
        self
    }

    fn with_quorum(mut self, quorum: usize, met: bool) -> Self {
        self.quorum = Some(quorum);
        self.quorum_met = Some(met);
        self
    }
}

/// Success-rule algorithms
pub struct OutcomeEvaluator;

impl OutcomeEvaluator {
    /// Evaluate using a criteria name as stored or configured
    ///
    /// Unknown names produce a result with `error = true`.
    ///
    /// # Example
    ///
    /// ```
    /// use decision_domain::quorum::{OutcomeEvaluator, VoteCounts};
    ///
    /// let result = OutcomeEvaluator::evaluate("simple_majority", &VoteCounts::new(2, 1, 0), 3, None);
    /// assert!(result.passed);
    /// assert_eq!(result.percentage, 66.67);
    ///
    /// let invalid = OutcomeEvaluator::evaluate("plurality", &VoteCounts::new(2, 1, 0), 3, None);
    /// assert!(invalid.error);
    /// ```
    pub fn evaluate(
        criteria: &str,
        counts: &VoteCounts,
        required_voters: usize,
        quorum: Option<usize>,
    ) -> DecisionResult {
        match criteria.parse::<SuccessCriteria>() {
            Ok(criteria) => Self::evaluate_criteria(criteria, counts, required_voters, quorum),
            Err(_) => DecisionResult::invalid_criteria(criteria, counts),
        }
    }

    /// Evaluate using an already-validated rule
    pub fn evaluate_criteria(
        criteria: SuccessCriteria,
        counts: &VoteCounts,
        required_voters: usize,
        quorum: Option<usize>,
    ) -> DecisionResult {
        match criteria {
            SuccessCriteria::SimpleMajority => {
                Self::simple_majority(counts).with_required(required_voters, counts)
            }
            SuccessCriteria::SuperMajority => Self::super_majority(counts, required_voters),
            SuccessCriteria::Unanimous => Self::unanimity(counts, required_voters, quorum),
        }
    }

    /// More than half of the votes cast are yes; exactly half fails
    pub fn simple_majority(counts: &VoteCounts) -> DecisionResult {
        if counts.total == 0 {
            return DecisionResult::verdict(false, "No votes cast".to_string(), counts, 0.0);
        }

        let pct = percentage(counts.yes, counts.total);
        let passed = counts.yes * 100 > counts.total * SIMPLE_MAJORITY_PERCENT;
        let reason = if passed {
            format!(
                "Simple majority reached: {:.2}% voted yes (more than {}% required)",
                pct, SIMPLE_MAJORITY_PERCENT
            )
        } else {
            format!(
                "Simple majority not reached: {:.2}% voted yes (more than {}% required)",
                pct, SIMPLE_MAJORITY_PERCENT
            )
        };

        DecisionResult::verdict(passed, reason, counts, pct)
    }

    /// At least 66% of all required voters voted yes
    ///
    /// The denominator is the roster size, so voters who never vote count
    /// against the proposal.
    pub fn super_majority(counts: &VoteCounts, required_voters: usize) -> DecisionResult {
        if required_voters == 0 {
            return DecisionResult::verdict(
                false,
                "No required voters defined for supermajority".to_string(),
                counts,
                0.0,
            )
            .with_required(0, counts);
        }

        let pct = percentage(counts.yes, required_voters);
        let passed = counts.yes * 100 >= required_voters * SUPERMAJORITY_PERCENT;
        let missing = counts.remaining(required_voters);
        let reason = if passed {
            format!(
                "Supermajority reached: {:.2}% of required voters voted yes (at least {}% required)",
                pct, SUPERMAJORITY_PERCENT
            )
        } else if missing > 0 {
            format!(
                "Supermajority not reached: {:.2}% of required voters voted yes (at least {}% required, {} votes missing)",
                pct, SUPERMAJORITY_PERCENT, missing
            )
        } else {
            format!(
                "Supermajority not reached: {:.2}% of required voters voted yes (at least {}% required)",
                pct, SUPERMAJORITY_PERCENT
            )
        };

        DecisionResult::verdict(passed, reason, counts, pct).with_required(required_voters, counts)
    }

    /// Quorum reached, nobody voted no, and at least one yes
    ///
    /// `quorum` defaults to `required_voters`.
    pub fn unanimity(
        counts: &VoteCounts,
        required_voters: usize,
        quorum: Option<usize>,
    ) -> DecisionResult {
        if required_voters == 0 {
            return DecisionResult::verdict(
                false,
                "No required voters defined for unanimity".to_string(),
                counts,
                0.0,
            )
            .with_required(0, counts);
        }

        let quorum = quorum.unwrap_or(required_voters);
        let pct = percentage(counts.yes, required_voters);
        let base = |passed: bool, reason: String| {
            DecisionResult::verdict(passed, reason, counts, pct).with_required(required_voters, counts)
        };

        if counts.total < quorum {
            return base(
                false,
                format!("Quorum not met: {} of {} votes cast", counts.total, quorum),
            )
            .with_quorum(quorum, false);
        }

        if counts.no > 0 {
            return base(
                false,
                format!("Unanimity not achieved: {} voter(s) voted no", counts.no),
            )
            .with_quorum(quorum, true);
        }

        if counts.yes == 0 {
            return base(
                false,
                "No yes votes: every participating voter abstained".to_string(),
            )
            .with_quorum(quorum, true);
        }

        base(
            true,
            format!(
                "Unanimous approval: {} yes, {} abstained ({:.2}% of required voters)",
                counts.yes, counts.abstain, pct
            ),
        )
        .with_quorum(quorum, true)
    }
}

/// Evaluate a tally against a criteria name
pub fn evaluate(
    criteria: &str,
    counts: &VoteCounts,
    required_voters: usize,
    quorum: Option<usize>,
) -> DecisionResult {
    OutcomeEvaluator::evaluate(criteria, counts, required_voters, quorum)
}
