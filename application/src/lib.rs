//! Application layer for decision-quorum
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod services;
pub mod use_cases;

// Re-export commonly used types
pub use config::EngineConfig;
pub use ports::{
    clock::{Clock, FixedClock},
    decision_store::{DecisionRepository, RosterRepository, StoreError, VoteRepository},
    event_logger::{DecisionEvent, DecisionEventLogger, NoDecisionLogger},
    record_publisher::{NoRecordPublisher, PublishError, RecordPublisher},
    user_directory::{NoUserDirectory, UserDirectory},
};
pub use services::DecisionServices;
pub use use_cases::cast_vote::{CastVoteInput, CastVoteOutcome, CastVoteUseCase, VoteReceipt};
pub use use_cases::check_deadlines::{
    CheckDeadlinesUseCase, Reminder, SweepFailure, SweepReport,
};
pub use use_cases::create_decision::{CreateDecisionOutcome, CreateDecisionUseCase};
pub use use_cases::decision_status::{DecisionStatusUseCase, DecisionStatusView};
pub use use_cases::finalize_decision::{
    FinalizationReport, FinalizeDecisionUseCase, FinalizeOutcome, RecordStatus,
};
pub use use_cases::withdraw_decision::{WithdrawDecisionUseCase, WithdrawOutcome};
