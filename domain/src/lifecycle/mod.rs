//! Decision lifecycle

pub mod finalization;

pub use finalization::{FinalizationStateMachine, TransitionRefusal};
