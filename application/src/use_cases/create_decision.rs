//! Create Decision use case
//!
//! Validates a draft, writes the roster and then the decision itself.
//! The roster goes first so that a visible decision always has voters.

use crate::ports::decision_store::StoreError;
use crate::ports::event_logger::DecisionEvent;
use crate::services::DecisionServices;
use decision_domain::{Decision, DecisionDraft, DecisionId, DomainError, Voter};
use serde_json::json;
use tracing::info;

/// Result of a create request
#[derive(Debug)]
pub enum CreateDecisionOutcome {
    Created { decision: Decision, roster: Vec<Voter> },
    /// The draft failed validation
    Invalid(DomainError),
    /// A decision with the same ID already exists
    AlreadyExists(DecisionId),
}

impl CreateDecisionOutcome {
    /// User-facing message
    pub fn message(&self) -> String {
        match self {
            CreateDecisionOutcome::Created { decision, roster } => format!(
                "Decision \"{}\" created with {} voter(s), deadline {}",
                decision.name,
                roster.len(),
                decision.deadline
            ),
            CreateDecisionOutcome::Invalid(error) => error.to_string(),
            CreateDecisionOutcome::AlreadyExists(id) => {
                format!("A decision with ID {} already exists", id)
            }
        }
    }
}

/// Use case for opening a new decision
pub struct CreateDecisionUseCase {
    services: DecisionServices,
}

impl CreateDecisionUseCase {
    pub fn new(services: DecisionServices) -> Self {
        Self { services }
    }

    /// Create a decision from a draft
    ///
    /// The ID is taken from `id` when given, then from the origin thread
    /// timestamp, and finally from the clock.
    pub async fn execute(
        &self,
        draft: DecisionDraft,
        id: Option<DecisionId>,
    ) -> Result<CreateDecisionOutcome, StoreError> {
        let now = self.services.clock.now();
        let id = id
            .or_else(|| {
                draft
                    .origin
                    .as_ref()
                    .and_then(|o| o.thread_ts.as_deref())
                    .map(DecisionId::new)
            })
            .unwrap_or_else(|| DecisionId::from_timestamp(now));

        if self.services.decisions.get_decision(&id).await?.is_some() {
            return Ok(CreateDecisionOutcome::AlreadyExists(id));
        }

        let (decision, roster) = match draft.build(id, now) {
            Ok(built) => built,
            Err(error) => return Ok(CreateDecisionOutcome::Invalid(error)),
        };

        self.services.roster.put_voters(&decision.id, &roster).await?;
        self.services.decisions.put_decision(&decision).await?;

        info!(
            "Created decision {} ({}) with {} voters",
            decision.id,
            decision.success_criteria.as_str(),
            roster.len()
        );
        self.services.logger.log(DecisionEvent::new(
            "decision_created",
            json!({
                "decision_id": decision.id,
                "name": decision.name,
                "success_criteria": decision.success_criteria,
                "deadline": decision.deadline,
                "creator_id": decision.creator_id,
                "voters": roster.iter().map(|v| &v.user_id).collect::<Vec<_>>(),
            }),
        ));

        Ok(CreateDecisionOutcome::Created { decision, roster })
    }
}
