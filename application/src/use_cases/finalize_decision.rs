//! Finalize Decision use case
//!
//! Runs the approve/reject transition for a decision that is due.
//! The decision is re-read right before the transition is committed and
//! the transition is skipped when it is no longer active, so concurrent
//! callers produce at most one status change.
//!
//! Record generation happens after the status write and is best effort:
//! a rendering or publishing failure is logged and reported, never
//! rolled back into the status.

use crate::ports::decision_store::StoreError;
use crate::ports::event_logger::DecisionEvent;
use crate::services::DecisionServices;
use decision_domain::{
    Decision, DecisionId, DecisionResult, DecisionStatus, FinalizationStateMachine,
    OutcomeEvaluator, RecordGenerator, Vote, VoteCounts, required_count, tally,
};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

/// What happened to the decision record after finalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RecordStatus {
    Published { number: String, location: String },
    Failed { message: String },
    Disabled,
}

/// Details of a committed finalization
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizationReport {
    pub decision: Decision,
    pub result: DecisionResult,
    pub counts: VoteCounts,
    pub required_voters: usize,
    pub record: RecordStatus,
}

impl FinalizationReport {
    pub fn status(&self) -> DecisionStatus {
        self.decision.status()
    }
}

/// Result of a finalize request
#[derive(Debug, Clone)]
pub enum FinalizeOutcome {
    /// This call performed the transition
    Finalized(Box<FinalizationReport>),
    /// Someone else already moved the decision out of `active`
    AlreadyFinalized(DecisionStatus),
    /// Neither the deadline has passed nor has the roster fully voted
    NotDue { counts: VoteCounts, required_voters: usize },
    NotFound(DecisionId),
}

impl FinalizeOutcome {
    /// Whether this call changed the decision's status
    pub fn is_transition(&self) -> bool {
        matches!(self, FinalizeOutcome::Finalized(_))
    }

    /// User-facing message
    pub fn message(&self) -> String {
        match self {
            FinalizeOutcome::Finalized(report) => format!(
                "Decision \"{}\" {}: {}",
                report.decision.name,
                report.status(),
                report.result.reason
            ),
            FinalizeOutcome::AlreadyFinalized(status) => {
                format!("This decision has already been finalized (status: {})", status)
            }
            FinalizeOutcome::NotDue {
                counts,
                required_voters,
            } => format!(
                "Not ready to finalize: {} of {} votes cast and the deadline has not passed",
                counts.total, required_voters
            ),
            FinalizeOutcome::NotFound(id) => format!("Decision {} not found", id),
        }
    }
}

/// Use case for finalizing a decision once it is due
pub struct FinalizeDecisionUseCase {
    services: DecisionServices,
}

impl FinalizeDecisionUseCase {
    pub fn new(services: DecisionServices) -> Self {
        Self { services }
    }

    /// Finalize if due
    ///
    /// `known_votes` is the caller's already-corrected vote list (see
    /// [`merge_known_write`](decision_domain::merge_known_write)); when
    /// `None` the votes are queried from storage.
    pub async fn execute(
        &self,
        decision_id: &DecisionId,
        known_votes: Option<Vec<Vote>>,
    ) -> Result<FinalizeOutcome, StoreError> {
        let votes = match known_votes {
            Some(votes) => votes,
            None => self.services.votes.query_votes(decision_id).await?,
        };
        let roster = self.services.roster.voters(decision_id).await?;
        let required_voters = required_count(&roster);
        let counts = tally(&votes);

        // Re-read the authoritative status immediately before acting.
        let Some(mut decision) = self.services.decisions.get_decision(decision_id).await? else {
            return Ok(FinalizeOutcome::NotFound(decision_id.clone()));
        };
        if !decision.is_active() {
            debug!(
                "Decision {} already {}, skipping finalization",
                decision_id,
                decision.status()
            );
            return Ok(FinalizeOutcome::AlreadyFinalized(decision.status()));
        }

        let now = self.services.clock.now();
        if !FinalizationStateMachine::should_finalize(
            decision.status(),
            decision.deadline,
            now,
            counts.total,
            required_voters,
        ) {
            return Ok(FinalizeOutcome::NotDue {
                counts,
                required_voters,
            });
        }

        let result = OutcomeEvaluator::evaluate_criteria(
            decision.success_criteria,
            &counts,
            required_voters,
            decision.quorum,
        );
        if let Err(refusal) = FinalizationStateMachine::finalize(&mut decision, &result, now) {
            debug!("Finalization of {} refused: {}", decision_id, refusal);
            return Ok(FinalizeOutcome::AlreadyFinalized(decision.status()));
        }
        self.services.decisions.put_decision(&decision).await?;

        info!(
            "Decision {} finalized as {} ({})",
            decision.id,
            decision.status(),
            result.reason
        );
        self.services.logger.log(DecisionEvent::new(
            "decision_finalized",
            json!({
                "decision_id": decision.id,
                "status": decision.status(),
                "passed": result.passed,
                "reason": result.reason,
                "percentage": result.percentage,
                "vote_counts": counts,
                "required_voters": required_voters,
            }),
        ));

        let record = self.publish_record(&decision, &counts, &result, &roster).await;

        Ok(FinalizeOutcome::Finalized(Box::new(FinalizationReport {
            decision,
            result,
            counts,
            required_voters,
            record,
        })))
    }

    async fn publish_record(
        &self,
        decision: &Decision,
        counts: &VoteCounts,
        result: &DecisionResult,
        roster: &[decision_domain::Voter],
    ) -> RecordStatus {
        if !self.services.config.records_enabled {
            return RecordStatus::Disabled;
        }

        let users: Vec<_> = roster.iter().map(|v| v.user_id.clone()).collect();
        let voter_names = self.services.directory.display_names(&users).await;

        let rendered = RecordGenerator::render(decision, counts, result, &voter_names);
        let outcome = match rendered {
            Ok(record) => self
                .services
                .publisher
                .publish(&record)
                .await
                .map(|location| (record.number, location))
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match outcome {
            Ok((number, location)) => {
                info!("Published decision record ADR-{} to {}", number, location);
                RecordStatus::Published { number, location }
            }
            Err(message) => {
                warn!(
                    "Decision {} was finalized but its record could not be generated: {}",
                    decision.id, message
                );
                self.services.logger.log(DecisionEvent::new(
                    "record_failed",
                    json!({ "decision_id": decision.id, "error": message }),
                ));
                RecordStatus::Failed { message }
            }
        }
    }
}
