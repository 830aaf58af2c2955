//! JSON output
//!
//! Every document carries an `outcome` tag and the user-facing `message`,
//! so scripts can branch without parsing text.

use crate::output::formatter::OutputFormatter;
use decision_application::{
    CastVoteOutcome, CreateDecisionOutcome, DecisionStatusView, FinalizeOutcome, SweepReport,
    WithdrawOutcome,
};
use decision_domain::DecisionResult;
use serde::Serialize;
use serde_json::{Value, json};

/// Formats outcomes as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    fn render(value: &impl Serialize) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    /// JSON value for a finalize outcome
    pub fn finalize_value(outcome: &FinalizeOutcome) -> Value {
        let message = outcome.message();
        match outcome {
            FinalizeOutcome::Finalized(report) => json!({
                "outcome": "finalized",
                "message": message,
                "report": report,
            }),
            FinalizeOutcome::AlreadyFinalized(status) => json!({
                "outcome": "already_finalized",
                "message": message,
                "status": status,
            }),
            FinalizeOutcome::NotDue {
                counts,
                required_voters,
            } => json!({
                "outcome": "not_due",
                "message": message,
                "voteCounts": counts,
                "requiredVoters": required_voters,
            }),
            FinalizeOutcome::NotFound(id) => json!({
                "outcome": "not_found",
                "message": message,
                "decisionId": id,
            }),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn created(&self, outcome: &CreateDecisionOutcome) -> String {
        let message = outcome.message();
        let value = match outcome {
            CreateDecisionOutcome::Created { decision, roster } => json!({
                "outcome": "created",
                "message": message,
                "decision": decision,
                "voters": roster.iter().map(|v| &v.user_id).collect::<Vec<_>>(),
            }),
            CreateDecisionOutcome::Invalid(_) => json!({
                "outcome": "invalid",
                "message": message,
            }),
            CreateDecisionOutcome::AlreadyExists(id) => json!({
                "outcome": "already_exists",
                "message": message,
                "decisionId": id,
            }),
        };
        Self::render(&value)
    }

    fn vote(&self, outcome: &CastVoteOutcome) -> String {
        let message = outcome.message();
        let value = match outcome {
            CastVoteOutcome::Recorded(receipt) => json!({
                "outcome": "recorded",
                "message": message,
                "vote": receipt.vote,
                "replaced": receipt.replaced,
                "voteCounts": receipt.counts,
                "requiredVoters": receipt.required_voters,
                "deadlock": receipt.deadlock,
                "finalization": receipt.finalization.as_ref().map(Self::finalize_value),
            }),
            CastVoteOutcome::NotFound(id) => json!({
                "outcome": "not_found",
                "message": message,
                "decisionId": id,
            }),
            CastVoteOutcome::NotActive(status) => json!({
                "outcome": "not_active",
                "message": message,
                "status": status,
            }),
            CastVoteOutcome::NotEligible(user) => json!({
                "outcome": "not_eligible",
                "message": message,
                "userId": user,
            }),
        };
        Self::render(&value)
    }

    fn status(&self, view: &DecisionStatusView) -> String {
        Self::render(view)
    }

    fn finalize(&self, outcome: &FinalizeOutcome) -> String {
        Self::render(&Self::finalize_value(outcome))
    }

    fn withdraw(&self, outcome: &WithdrawOutcome) -> String {
        let message = outcome.message();
        let value = match outcome {
            WithdrawOutcome::Cancelled(decision) => json!({
                "outcome": "cancelled",
                "message": message,
                "decision": decision,
            }),
            WithdrawOutcome::Deleted(decision) => json!({
                "outcome": "deleted",
                "message": message,
                "decision": decision,
            }),
            WithdrawOutcome::NotFound(id) => json!({
                "outcome": "not_found",
                "message": message,
                "decisionId": id,
            }),
            WithdrawOutcome::Refused(_) => json!({
                "outcome": "refused",
                "message": message,
            }),
        };
        Self::render(&value)
    }

    fn sweep(&self, report: &SweepReport) -> String {
        Self::render(&json!({
            "finalized": report.finalized.iter().map(Self::finalize_value).collect::<Vec<_>>(),
            "reminders": report.reminders,
            "failures": report.failures,
        }))
    }

    fn evaluation(&self, result: &DecisionResult) -> String {
        Self::render(result)
    }

    fn not_found(&self, decision_id: &str) -> String {
        Self::render(&json!({
            "outcome": "not_found",
            "message": format!("Decision {} not found", decision_id),
            "decisionId": decision_id,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decision_domain::{DecisionStatus, OutcomeEvaluator, VoteCounts};

    #[test]
    fn test_evaluation_uses_camel_case() {
        let result = OutcomeEvaluator::super_majority(&VoteCounts::new(4, 1, 1), 6);
        let value: Value = serde_json::from_str(&JsonFormatter.evaluation(&result)).unwrap();
        assert_eq!(value["passed"], true);
        assert_eq!(value["voteCounts"]["yes"], 4);
        assert_eq!(value["requiredVotersCount"], 6);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_finalize_outcome_is_tagged() {
        let outcome = FinalizeOutcome::AlreadyFinalized(DecisionStatus::Rejected);
        let value: Value = serde_json::from_str(&JsonFormatter.finalize(&outcome)).unwrap();
        assert_eq!(value["outcome"], "already_finalized");
        assert_eq!(value["status"], "rejected");
        assert!(value["message"].as_str().unwrap().contains("already been finalized"));
    }
}
