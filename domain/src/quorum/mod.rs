//! Voting and outcome evaluation
//!
//! # Flow
//!
//! ```text
//! votes ──► tally ──► VoteCounts ──► OutcomeEvaluator ──► DecisionResult
//!   ▲                     │
//!   │                     └────────► DeadlockDetector ──► DeadlockResult (advisory)
//!   │
//! merge_known_write (corrects stale vote queries after a write)
//! ```

pub mod deadlock;
pub mod evaluator;
pub mod merge;
pub mod tally;
pub mod vote;

pub use deadlock::{DeadlockDetector, DeadlockResult, check_deadlock};
pub use evaluator::{DecisionResult, OutcomeEvaluator, evaluate};
pub use merge::merge_known_write;
pub use tally::{VoteCounts, percentage, tally};
pub use vote::{Vote, VoteType};
