//! Contract-based validation for match transitions.
//!
//! Contracts formalize Hoare-style reasoning around each step:
//! `{pre(state, step)} step {post(before, after)}`.

use crate::invariants::check_invariants;
use crate::state::{MatchState, TransitionError};
use crate::Phase;
use strum::Display;
use tracing::instrument;

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), TransitionError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), TransitionError>;
}

/// The eight edges of the match state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Step {
    /// Leave the title screen.
    Start,
    /// Player hides a number.
    SubmitSecret,
    /// CPU guess arrives.
    RecordOpponentGuess,
    /// Score the CPU guess.
    ResolveOpponentGuess,
    /// CPU secret arrives.
    RecordOpponentSecret,
    /// Player guesses.
    SubmitGuess,
    /// Score the player guess.
    ResolvePlayerGuess,
    /// Leave the game-over screen.
    PlayAgain,
}

impl Step {
    /// Phase the step departs from.
    pub fn from_phase(self) -> Phase {
        match self {
            Step::Start => Phase::Menu,
            Step::SubmitSecret => Phase::PlayerSetSecret,
            Step::RecordOpponentGuess => Phase::AiThinkingGuess,
            Step::ResolveOpponentGuess => Phase::RevealAiGuess,
            Step::RecordOpponentSecret => Phase::AiSettingSecret,
            Step::SubmitGuess => Phase::PlayerGuessing,
            Step::ResolvePlayerGuess => Phase::RevealPlayerGuess,
            Step::PlayAgain => Phase::GameOver,
        }
    }
}

/// Contract shared by every step.
///
/// Preconditions:
/// - The match is in the step's departure phase
///
/// Postconditions:
/// - All [`MatchInvariants`](crate::MatchInvariants) hold
/// - Health never rises within a match
/// - The round counter only moves on the round loop (+1) or a reset (=1)
pub struct TransitionContract;

impl Contract<MatchState, Step> for TransitionContract {
    #[instrument(skip(state))]
    fn pre(state: &MatchState, step: &Step) -> Result<(), TransitionError> {
        if state.phase() == step.from_phase() {
            Ok(())
        } else {
            Err(TransitionError::WrongPhase {
                step: *step,
                phase: state.phase(),
            })
        }
    }

    #[instrument(skip_all)]
    fn post(before: &MatchState, after: &MatchState) -> Result<(), TransitionError> {
        let mut violations: Vec<String> = match check_invariants(after) {
            Ok(()) => Vec::new(),
            Err(found) => found.into_iter().map(|v| v.description).collect(),
        };

        let reset = matches!(before.phase(), Phase::Menu | Phase::GameOver)
            && after.phase() == Phase::PlayerSetSecret;

        if !reset
            && (after.player_health() > before.player_health()
                || after.computer_health() > before.computer_health())
        {
            violations.push("Health never increases within a match".to_string());
        }

        let looped =
            before.phase() == Phase::RevealPlayerGuess && after.phase() == Phase::PlayerSetSecret;
        let expected_round = if reset {
            1
        } else if looped {
            before.round() + 1
        } else {
            before.round()
        };
        if after.round() != expected_round {
            violations.push(format!(
                "Round moves only on the round loop (expected {}, got {})",
                expected_round,
                after.round()
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(TransitionError::InvariantViolation {
                description: violations.join("; "),
            })
        }
    }
}
