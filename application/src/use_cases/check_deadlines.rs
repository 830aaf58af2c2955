//! Check Deadlines use case
//!
//! Periodic sweep over active decisions. Decisions past their deadline are
//! finalized through [`FinalizeDecisionUseCase`]; the rest yield reminders
//! listing roster voters who have not voted yet.

use crate::ports::decision_store::StoreError;
use crate::services::DecisionServices;
use crate::use_cases::finalize_decision::{FinalizeDecisionUseCase, FinalizeOutcome};
use crate::use_cases::shared::missing_voters;
use chrono::NaiveDate;
use decision_domain::{
    DeadlockDetector, Decision, DecisionId, FinalizationStateMachine, UserId, required_count,
    tally,
};
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

/// Nudge for a decision still waiting on voters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub decision_id: DecisionId,
    pub name: String,
    pub deadline: NaiveDate,
    pub missing_voters: Vec<UserId>,
    /// The success rule can no longer be met by the remaining votes
    pub deadlocked: bool,
}

/// A decision the sweep could not process
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepFailure {
    pub decision_id: DecisionId,
    pub message: String,
}

/// Result of one sweep
#[derive(Debug, Default)]
pub struct SweepReport {
    pub finalized: Vec<FinalizeOutcome>,
    pub reminders: Vec<Reminder>,
    pub failures: Vec<SweepFailure>,
}

impl SweepReport {
    pub fn is_empty(&self) -> bool {
        self.finalized.is_empty() && self.reminders.is_empty() && self.failures.is_empty()
    }
}

enum SweepItem {
    Finalized(FinalizeOutcome),
    Reminder(Reminder),
}

/// Use case for the deadline sweep
pub struct CheckDeadlinesUseCase {
    services: DecisionServices,
    finalize: FinalizeDecisionUseCase,
}

impl CheckDeadlinesUseCase {
    pub fn new(services: DecisionServices) -> Self {
        Self {
            finalize: FinalizeDecisionUseCase::new(services.clone()),
            services,
        }
    }

    /// Sweep all active decisions
    ///
    /// Only the initial listing can fail the whole sweep; per-decision
    /// errors are collected into [`SweepReport::failures`].
    pub async fn execute(&self) -> Result<SweepReport, StoreError> {
        let active = self.services.decisions.list_active_decisions().await?;
        info!("Deadline sweep over {} active decision(s)", active.len());

        let results = join_all(active.iter().map(|d| self.sweep_one(d))).await;

        let mut report = SweepReport::default();
        for (decision, result) in active.iter().zip(results) {
            match result {
                Ok(SweepItem::Finalized(outcome)) => report.finalized.push(outcome),
                Ok(SweepItem::Reminder(reminder)) => report.reminders.push(reminder),
                Err(e) => {
                    warn!("Sweep of decision {} failed: {}", decision.id, e);
                    report.failures.push(SweepFailure {
                        decision_id: decision.id.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }
        Ok(report)
    }

    async fn sweep_one(&self, decision: &Decision) -> Result<SweepItem, StoreError> {
        let now = self.services.clock.now();
        if FinalizationStateMachine::deadline_passed(decision.deadline, now) {
            let outcome = self.finalize.execute(&decision.id, None).await?;
            return Ok(SweepItem::Finalized(outcome));
        }

        let roster = self.services.roster.voters(&decision.id).await?;
        let votes = self.services.votes.query_votes(&decision.id).await?;
        let missing = missing_voters(&roster, &votes);
        if missing.is_empty() {
            // Fully voted but not finalized yet; the finalize path picks it up.
            let outcome = self.finalize.execute(&decision.id, Some(votes)).await?;
            return Ok(SweepItem::Finalized(outcome));
        }

        let deadlock = DeadlockDetector::check(
            &tally(&votes),
            decision.success_criteria,
            required_count(&roster),
        );
        Ok(SweepItem::Reminder(Reminder {
            decision_id: decision.id.clone(),
            name: decision.name.clone(),
            deadline: decision.deadline,
            missing_voters: missing,
            deadlocked: deadlock.deadlocked,
        }))
    }
}
