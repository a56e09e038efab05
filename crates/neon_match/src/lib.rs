//! Neon Guess match logic.
//!
//! A match is a duel of hidden numbers between the human player and a
//! computer opponent. Each round the player hides a number for the CPU to
//! guess, then the CPU hides one for the player. The distance between a
//! secret and the guess made against it is damage; an exact guess is a
//! knockout.
//!
//! # Architecture
//!
//! - **Number**: validated entries in `0..=100`
//! - **Scoring**: pure damage and knockout rules
//! - **Phase**: the eight steps a match moves through
//! - **State**: [`MatchState`] and its atomic transitions
//! - **Invariants / Contracts**: properties checked after every transition
//!
//! This crate does no I/O. Asking the opponent for values, pacing and
//! persistence live in the application crate.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod contracts;
mod invariants;
mod number;
mod phase;
mod scoring;
mod state;

pub use contracts::{Contract, Step, TransitionContract};
pub use invariants::{
    HealthBounded, Invariant, InvariantSet, InvariantViolation, MatchInvariants,
    PendingGuessInReveal, SecretsMatchPhase, TerminalConsistent, check_invariants,
};
pub use number::{MAX_NUMBER, MIN_NUMBER, Number, ValidationError};
pub use phase::{MatchOutcome, Phase, Side};
pub use scoring::{INITIAL_HEALTH, Strike, apply_damage, damage, is_knockout, score_reveal};
pub use state::{MatchState, Resolution, TransitionError};
