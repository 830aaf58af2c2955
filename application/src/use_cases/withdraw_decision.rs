//! Withdraw Decision use case
//!
//! Cancel and delete both take an active decision out of circulation.
//! Neither produces a record. Votes already stored are left in place.

use crate::ports::decision_store::StoreError;
use crate::ports::event_logger::DecisionEvent;
use crate::services::DecisionServices;
use decision_domain::{Decision, DecisionId, FinalizationStateMachine, TransitionRefusal, UserId};
use serde_json::json;
use tracing::{debug, info};

/// Result of a cancel or delete request
#[derive(Debug, Clone)]
pub enum WithdrawOutcome {
    Cancelled(Decision),
    Deleted(Decision),
    NotFound(DecisionId),
    Refused(TransitionRefusal),
}

impl WithdrawOutcome {
    /// User-facing message
    pub fn message(&self) -> String {
        match self {
            WithdrawOutcome::Cancelled(d) => format!("Decision \"{}\" has been cancelled", d.name),
            WithdrawOutcome::Deleted(d) => format!("Decision \"{}\" has been deleted", d.name),
            WithdrawOutcome::NotFound(id) => format!("Decision {} not found", id),
            WithdrawOutcome::Refused(refusal) => refusal.to_string(),
        }
    }
}

/// Use case for cancelling or deleting a decision
pub struct WithdrawDecisionUseCase {
    services: DecisionServices,
}

impl WithdrawDecisionUseCase {
    pub fn new(services: DecisionServices) -> Self {
        Self { services }
    }

    /// Cancel on behalf of the creator or a roster voter
    pub async fn cancel(
        &self,
        decision_id: &DecisionId,
        actor: &UserId,
    ) -> Result<WithdrawOutcome, StoreError> {
        let roster = self.services.roster.voters(decision_id).await?;

        // Re-read the status immediately before acting; a finalization may
        // have committed while the roster was loading.
        let Some(mut decision) = self.services.decisions.get_decision(decision_id).await? else {
            return Ok(WithdrawOutcome::NotFound(decision_id.clone()));
        };
        let now = self.services.clock.now();

        if let Err(refusal) = FinalizationStateMachine::cancel(&mut decision, actor, &roster, now)
        {
            debug!("Cancel of {} by {} refused: {}", decision_id, actor, refusal);
            return Ok(WithdrawOutcome::Refused(refusal));
        }
        self.services.decisions.put_decision(&decision).await?;

        info!("Decision {} cancelled by {}", decision_id, actor);
        self.services.logger.log(DecisionEvent::new(
            "decision_cancelled",
            json!({ "decision_id": decision_id, "actor": actor }),
        ));
        Ok(WithdrawOutcome::Cancelled(decision))
    }

    /// Delete on behalf of the creator
    pub async fn delete(
        &self,
        decision_id: &DecisionId,
        requester: &UserId,
    ) -> Result<WithdrawOutcome, StoreError> {
        let Some(mut decision) = self.services.decisions.get_decision(decision_id).await? else {
            return Ok(WithdrawOutcome::NotFound(decision_id.clone()));
        };
        let now = self.services.clock.now();

        if let Err(refusal) = FinalizationStateMachine::delete(&mut decision, requester, now) {
            debug!(
                "Delete of {} by {} refused: {}",
                decision_id, requester, refusal
            );
            return Ok(WithdrawOutcome::Refused(refusal));
        }
        self.services.decisions.put_decision(&decision).await?;

        info!("Decision {} deleted by {}", decision_id, requester);
        self.services.logger.log(DecisionEvent::new(
            "decision_deleted",
            json!({ "decision_id": decision_id, "requester": requester }),
        ));
        Ok(WithdrawOutcome::Deleted(decision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::FixedClock;
    use crate::ports::decision_store::{DecisionRepository, RosterRepository};
    use crate::use_cases::test_support::MockStore;
    use chrono::{NaiveDate, TimeZone, Utc};
    use decision_domain::{
        DecisionStatus, OutcomeEvaluator, SuccessCriteria, VoteCounts, build_roster,
    };
    use std::sync::Arc;

    fn id() -> DecisionId {
        DecisionId::new("1792314000.000002")
    }

    async fn setup() -> (Arc<MockStore>, WithdrawDecisionUseCase) {
        let store = Arc::new(MockStore::default());
        let decision = Decision::new(
            id(),
            "Switch CI provider",
            "Move builds to the new runners",
            SuccessCriteria::SuperMajority,
            NaiveDate::from_ymd_opt(2026, 10, 30).unwrap(),
            UserId::new("UCREATOR"),
            Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap(),
        );
        store.put_decision(&decision).await.unwrap();
        store
            .put_voters(&id(), &build_roster(&id(), &["U1".into(), "U2".into()]))
            .await
            .unwrap();
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap(),
        ));
        let services = DecisionServices::from_store(store.clone(), clock);
        (store, WithdrawDecisionUseCase::new(services))
    }

    #[tokio::test]
    async fn test_voter_can_cancel() {
        let (store, use_case) = setup().await;
        let outcome = use_case.cancel(&id(), &UserId::new("U2")).await.unwrap();
        assert!(matches!(outcome, WithdrawOutcome::Cancelled(_)));
        let stored = store.get_decision(&id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), DecisionStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_outsider_cannot_cancel() {
        let (_, use_case) = setup().await;
        let outcome = use_case.cancel(&id(), &UserId::new("U9")).await.unwrap();
        assert!(matches!(
            outcome,
            WithdrawOutcome::Refused(TransitionRefusal::NotEligible)
        ));
    }

    #[tokio::test]
    async fn test_only_creator_can_delete() {
        let (store, use_case) = setup().await;
        let outcome = use_case.delete(&id(), &UserId::new("U1")).await.unwrap();
        assert!(outcome.message().contains("Only the creator"));
        assert_eq!(store.writes(), 1);

        let outcome = use_case.delete(&id(), &UserId::new("UCREATOR")).await.unwrap();
        assert!(matches!(outcome, WithdrawOutcome::Deleted(_)));
        assert_eq!(store.writes(), 2);
    }

    #[tokio::test]
    async fn test_cancel_after_delete_refused() {
        let (_, use_case) = setup().await;
        use_case.delete(&id(), &UserId::new("UCREATOR")).await.unwrap();
        let outcome = use_case.cancel(&id(), &UserId::new("UCREATOR")).await.unwrap();
        assert!(matches!(
            outcome,
            WithdrawOutcome::Refused(TransitionRefusal::NotActive(DecisionStatus::Deleted))
        ));
    }

    #[tokio::test]
    async fn test_cancel_does_not_overwrite_concurrent_finalization() {
        let (store, use_case) = setup().await;
        let mut approved = store.get_decision(&id()).await.unwrap().unwrap();
        let result = OutcomeEvaluator::super_majority(&VoteCounts::new(2, 0, 0), 2);
        FinalizationStateMachine::finalize(
            &mut approved,
            &result,
            Utc.with_ymd_and_hms(2026, 10, 18, 11, 0, 0).unwrap(),
        )
        .unwrap();
        store.commit_on_roster_read(approved);

        let outcome = use_case.cancel(&id(), &UserId::new("U1")).await.unwrap();
        assert!(matches!(
            outcome,
            WithdrawOutcome::Refused(TransitionRefusal::NotActive(DecisionStatus::Approved))
        ));
        let stored = store.get_decision(&id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), DecisionStatus::Approved);
    }

    #[tokio::test]
    async fn test_unknown_decision() {
        let (_, use_case) = setup().await;
        let outcome = use_case
            .cancel(&DecisionId::new("nope"), &UserId::new("U1"))
            .await
            .unwrap();
        assert!(matches!(outcome, WithdrawOutcome::NotFound(_)));
    }
}
