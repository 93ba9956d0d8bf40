//! Authentication outcomes

mod outcome;

pub use outcome::{LoginOutcome, OutcomeKind, ProfileOutcome, RegisterOutcome};
