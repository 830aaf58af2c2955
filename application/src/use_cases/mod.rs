//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod cast_vote;
pub mod check_deadlines;
pub mod create_decision;
pub mod decision_status;
pub mod finalize_decision;
pub mod withdraw_decision;
pub(crate) mod shared;

#[cfg(test)]
pub(crate) mod test_support;
