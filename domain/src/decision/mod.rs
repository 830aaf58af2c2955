//! Decisions and their voter rosters

pub mod criteria;
pub mod draft;
pub mod entities;
pub mod status;

pub use criteria::{SIMPLE_MAJORITY_PERCENT, SUPERMAJORITY_PERCENT, SuccessCriteria};
pub use draft::DecisionDraft;
pub use entities::{
    Decision, DecisionId, MessageOrigin, UserId, Voter, build_roster, required_count, voter_key,
};
pub use status::DecisionStatus;
