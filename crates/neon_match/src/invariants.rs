//! First-class invariants for a match.
//!
//! Invariants are logical properties that must hold after every transition.
//! They are testable independently and double as documentation of what a
//! well-formed [`MatchState`] looks like.

use crate::scoring::INITIAL_HEALTH;
use crate::state::MatchState;
use crate::{Phase, Side};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let checks = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
            (I4::holds(state), I4::description()),
        ];

        let violations: Vec<_> = checks
            .into_iter()
            .filter(|(holds, _)| !holds)
            .map(|(_, description)| InvariantViolation::new(description))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Health pools stay within `0..=INITIAL_HEALTH`.
pub struct HealthBounded;

impl Invariant<MatchState> for HealthBounded {
    fn holds(state: &MatchState) -> bool {
        state.player_health() <= INITIAL_HEALTH && state.computer_health() <= INITIAL_HEALTH
    }

    fn description() -> &'static str {
        "Health stays between 0 and the starting pool"
    }
}

/// A winner exists exactly in `GameOver`, the loser is at zero, and the
/// winner is still standing unless the CPU won by knockout (which zeroes
/// both pools). Outside `GameOver` both sides are alive.
pub struct TerminalConsistent;

impl Invariant<MatchState> for TerminalConsistent {
    fn holds(state: &MatchState) -> bool {
        match (state.phase(), state.winner()) {
            (Phase::GameOver, Some(Side::Player)) => {
                state.computer_health() == 0 && state.player_health() > 0
            }
            (Phase::GameOver, Some(Side::Computer)) => {
                state.player_health() == 0
                    && (state.computer_health() > 0 || state.is_knockout())
            }
            (Phase::GameOver, None) => false,
            (_, Some(_)) => false,
            (_, None) => {
                state.player_health() > 0
                    && state.computer_health() > 0
                    && !state.is_knockout()
            }
        }
    }

    fn description() -> &'static str {
        "Winner is set only at game over, with the loser at zero health"
    }
}

/// A guess is pending only while it is being revealed (and is kept on the
/// game-over screen that the reveal led to).
pub struct PendingGuessInReveal;

impl Invariant<MatchState> for PendingGuessInReveal {
    fn holds(state: &MatchState) -> bool {
        match state.phase() {
            Phase::RevealAiGuess | Phase::RevealPlayerGuess => state.last_guess().is_some(),
            Phase::GameOver => true,
            _ => state.last_guess().is_none(),
        }
    }

    fn description() -> &'static str {
        "Last guess is present exactly during its reveal"
    }
}

/// Secrets are present exactly in the phases that rely on them.
pub struct SecretsMatchPhase;

impl Invariant<MatchState> for SecretsMatchPhase {
    fn holds(state: &MatchState) -> bool {
        let player = state.player_secret().is_some();
        let computer = state.computer_secret().is_some();

        match state.phase() {
            Phase::Menu | Phase::PlayerSetSecret => !player && !computer,
            Phase::AiThinkingGuess | Phase::RevealAiGuess | Phase::AiSettingSecret => {
                player && !computer
            }
            Phase::PlayerGuessing | Phase::RevealPlayerGuess => player && computer,
            Phase::GameOver => true,
        }
    }

    fn description() -> &'static str {
        "Secrets are set only in the phases that use them"
    }
}

/// Every invariant a match must satisfy.
pub type MatchInvariants = (
    HealthBounded,
    TerminalConsistent,
    PendingGuessInReveal,
    SecretsMatchPhase,
);

/// Checks all [`MatchInvariants`] against a state.
pub fn check_invariants(state: &MatchState) -> Result<(), Vec<InvariantViolation>> {
    MatchInvariants::check_all(state)
}
