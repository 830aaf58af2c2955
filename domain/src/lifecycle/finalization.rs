//! Finalization state machine
//!
//! The only place a decision's status changes. Every transition checks the
//! current status first and refuses when the decision is no longer active,
//! so replaying a transition against an already-moved decision is a no-op.
//!
//! ```text
//!            finalize (passed)
//!          ┌──────────────────► approved
//!          │ finalize (failed)
//! active ──┼──────────────────► rejected
//!          │ cancel (creator or voter)
//!          ├──────────────────► cancelled
//!          │ delete (creator only)
//!          └──────────────────► deleted
//! ```

use crate::decision::{Decision, DecisionStatus, UserId, Voter};
use crate::quorum::DecisionResult;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

/// Why a transition was not applied
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionRefusal {
    #[error("This decision has already been finalized (status: {0})")]
    AlreadyFinalized(DecisionStatus),

    #[error("This decision is no longer active (status: {0})")]
    NotActive(DecisionStatus),

    #[error("Only the creator of this decision can delete it")]
    NotCreator,

    #[error("Only the creator or a required voter can cancel this decision")]
    NotEligible,
}

impl TransitionRefusal {
    /// Whether the refusal comes from a stale status rather than permissions
    pub fn is_stale(&self) -> bool {
        matches!(
            self,
            TransitionRefusal::AlreadyFinalized(_) | TransitionRefusal::NotActive(_)
        )
    }
}

/// Status transitions for decisions
pub struct FinalizationStateMachine;

impl FinalizationStateMachine {
    /// A deadline has passed once the whole deadline day (UTC) is over
    pub fn deadline_passed(deadline: NaiveDate, now: DateTime<Utc>) -> bool {
        now.date_naive() > deadline
    }

    /// Should a decision in `status` be finalized now?
    ///
    /// True for an active decision whose deadline passed or whose roster
    /// has fully voted.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::{NaiveDate, TimeZone, Utc};
    /// use decision_domain::decision::DecisionStatus;
    /// use decision_domain::lifecycle::FinalizationStateMachine;
    ///
    /// let deadline = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
    /// let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
    ///
    /// assert!(!FinalizationStateMachine::should_finalize(DecisionStatus::Active, deadline, now, 2, 3));
    /// assert!(FinalizationStateMachine::should_finalize(DecisionStatus::Active, deadline, now, 3, 3));
    /// assert!(!FinalizationStateMachine::should_finalize(DecisionStatus::Approved, deadline, now, 3, 3));
    /// ```
    pub fn should_finalize(
        status: DecisionStatus,
        deadline: NaiveDate,
        now: DateTime<Utc>,
        votes_cast: usize,
        required_voters: usize,
    ) -> bool {
        match status {
            DecisionStatus::Active => {
                Self::deadline_passed(deadline, now) || votes_cast >= required_voters
            }
            DecisionStatus::Approved
            | DecisionStatus::Rejected
            | DecisionStatus::Cancelled
            | DecisionStatus::Deleted => false,
        }
    }

    /// Terminal status implied by an evaluation
    pub fn outcome_status(result: &DecisionResult) -> DecisionStatus {
        if result.passed && !result.error {
            DecisionStatus::Approved
        } else {
            DecisionStatus::Rejected
        }
    }

    /// Move an active decision to approved or rejected
    pub fn finalize(
        decision: &mut Decision,
        result: &DecisionResult,
        now: DateTime<Utc>,
    ) -> Result<DecisionStatus, TransitionRefusal> {
        let current = decision.status();
        if !current.is_active() {
            return Err(TransitionRefusal::AlreadyFinalized(current));
        }
        Self::apply(decision, Self::outcome_status(result), now)
    }

    /// Cancel an active decision on behalf of its creator or a roster voter
    pub fn cancel(
        decision: &mut Decision,
        actor: &UserId,
        roster: &[Voter],
        now: DateTime<Utc>,
    ) -> Result<DecisionStatus, TransitionRefusal> {
        let current = decision.status();
        if !current.is_active() {
            return Err(TransitionRefusal::NotActive(current));
        }
        let on_roster = roster.iter().any(|v| &v.user_id == actor);
        if !decision.is_creator(actor) && !on_roster {
            return Err(TransitionRefusal::NotEligible);
        }
        Self::apply(decision, DecisionStatus::Cancelled, now)
    }

    /// Delete an active decision; only its creator may do this
    pub fn delete(
        decision: &mut Decision,
        requester: &UserId,
        now: DateTime<Utc>,
    ) -> Result<DecisionStatus, TransitionRefusal> {
        let current = decision.status();
        if !current.is_active() {
            return Err(TransitionRefusal::NotActive(current));
        }
        if !decision.is_creator(requester) {
            return Err(TransitionRefusal::NotCreator);
        }
        Self::apply(decision, DecisionStatus::Deleted, now)
    }

    fn apply(
        decision: &mut Decision,
        next: DecisionStatus,
        now: DateTime<Utc>,
    ) -> Result<DecisionStatus, TransitionRefusal> {
        let current = decision.status();
        if !current.can_transition_to(next) {
            return Err(TransitionRefusal::NotActive(current));
        }
        decision.set_status(next, now);
        Ok(next)
    }
}
