//! Deadlock detection
//!
//! Answers "can this decision still pass?" for a partial tally. The check
//! is advisory: it never changes a decision and does not trigger
//! finalization on its own.

use super::tally::{VoteCounts, percentage, tally};
use super::vote::Vote;
use crate::decision::{SIMPLE_MAJORITY_PERCENT, SUPERMAJORITY_PERCENT, SuccessCriteria};
use serde::{Deserialize, Serialize};

/// Result of a deadlock check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlockResult {
    /// The success rule can no longer be satisfied
    pub deadlocked: bool,
    pub reason: String,
    /// Voters on the roster who have not voted
    pub remaining_votes: usize,
    /// Yes-share reached if every remaining voter votes yes
    pub best_case_percentage: f64,
}

/// Read-only check on whether a success rule is still reachable
pub struct DeadlockDetector;

impl DeadlockDetector {
    /// Check counts against a rule for a roster of `required_voters`
    pub fn check(
        counts: &VoteCounts,
        criteria: SuccessCriteria,
        required_voters: usize,
    ) -> DeadlockResult {
        let remaining = counts.remaining(required_voters);
        match criteria {
            SuccessCriteria::SimpleMajority => Self::simple_majority(counts, remaining),
            SuccessCriteria::SuperMajority => {
                Self::super_majority(counts, remaining, required_voters)
            }
            SuccessCriteria::Unanimous => Self::unanimity(counts, remaining, required_voters),
        }
    }

    fn simple_majority(counts: &VoteCounts, remaining: usize) -> DeadlockResult {
        let current = percentage(counts.yes, counts.total);
        if counts.total > 0 && counts.yes * 100 > counts.total * SIMPLE_MAJORITY_PERCENT {
            return DeadlockResult {
                deadlocked: false,
                reason: format!("Already passing with {:.2}% yes", current),
                remaining_votes: remaining,
                best_case_percentage: percentage(counts.yes + remaining, counts.total + remaining),
            };
        }

        let pool = counts.total + remaining;
        if pool == 0 {
            return DeadlockResult {
                deadlocked: true,
                reason: "No voters remain to cast a vote".to_string(),
                remaining_votes: 0,
                best_case_percentage: 0.0,
            };
        }

        let best = counts.yes + remaining;
        let best_pct = percentage(best, pool);
        let deadlocked = best * 100 <= pool * SIMPLE_MAJORITY_PERCENT;
        let reason = if deadlocked {
            format!(
                "Cannot pass: even if all {} remaining voters vote yes, yes reaches only {:.2}%",
                remaining, best_pct
            )
        } else {
            format!(
                "Still reachable: {} remaining votes could lift yes to {:.2}%",
                remaining, best_pct
            )
        };

        DeadlockResult {
            deadlocked,
            reason,
            remaining_votes: remaining,
            best_case_percentage: best_pct,
        }
    }

    fn super_majority(
        counts: &VoteCounts,
        remaining: usize,
        required_voters: usize,
    ) -> DeadlockResult {
        if required_voters == 0 {
            return DeadlockResult {
                deadlocked: true,
                reason: "No required voters defined for supermajority".to_string(),
                remaining_votes: 0,
                best_case_percentage: 0.0,
            };
        }

        let best = counts.yes + remaining;
        let best_pct = percentage(best, required_voters);
        let deadlocked = best * 100 < required_voters * SUPERMAJORITY_PERCENT;
        let reason = if deadlocked {
            format!(
                "Cannot pass: at most {:.2}% of required voters can vote yes ({}% required)",
                best_pct, SUPERMAJORITY_PERCENT
            )
        } else {
            format!(
                "Still reachable: up to {:.2}% of required voters can vote yes",
                best_pct
            )
        };

        DeadlockResult {
            deadlocked,
            reason,
            remaining_votes: remaining,
            best_case_percentage: best_pct,
        }
    }

    fn unanimity(counts: &VoteCounts, remaining: usize, required_voters: usize) -> DeadlockResult {
        if counts.no > 0 {
            return DeadlockResult {
                deadlocked: true,
                reason: format!(
                    "Cannot pass: {} voter(s) already voted no, unanimity is impossible",
                    counts.no
                ),
                remaining_votes: remaining,
                best_case_percentage: 0.0,
            };
        }

        DeadlockResult {
            deadlocked: false,
            reason: "Still reachable: no dissenting votes so far".to_string(),
            remaining_votes: remaining,
            best_case_percentage: percentage(counts.yes + remaining, required_voters),
        }
    }
}

/// Tally `votes` and check whether `criteria` can still be reached
pub fn check_deadlock(
    votes: &[Vote],
    criteria: SuccessCriteria,
    required_voters: usize,
) -> DeadlockResult {
    DeadlockDetector::check(&tally(votes), criteria, required_voters)
}
