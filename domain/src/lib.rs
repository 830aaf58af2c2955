//! Domain layer for decision-quorum
//!
//! This crate contains the decision consensus engine. It has no
//! dependencies on storage, transport or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Decision
//!
//! A proposal put to a fixed roster of voters. Each voter casts
//! yes, no or abstain; a newer vote replaces the older one.
//!
//! ## Success criteria
//!
//! - **Simple majority**: more than half of the votes cast
//! - **Supermajority**: at least 66% of the whole roster
//! - **Unanimous**: quorum reached, nobody against, at least one in favour
//!
//! ## Finalization
//!
//! A decision leaves `active` exactly once, either through an
//! approve/reject verdict or an explicit cancel/delete. See
//! [`lifecycle::FinalizationStateMachine`].

pub mod config;
pub mod core;
pub mod decision;
pub mod lifecycle;
pub mod quorum;
pub mod record;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::error::DomainError;
pub use decision::{
    Decision, DecisionDraft, DecisionId, DecisionStatus, MessageOrigin, SuccessCriteria, UserId,
    Voter, build_roster, required_count,
};
pub use lifecycle::{FinalizationStateMachine, TransitionRefusal};
pub use record::{DecisionRecord, RecordError, RecordGenerator};

// Re-export quorum types
pub use quorum::{
    DeadlockDetector, DeadlockResult, DecisionResult, OutcomeEvaluator, Vote, VoteCounts,
    VoteType, check_deadlock, evaluate, merge_known_write, tally,
};
