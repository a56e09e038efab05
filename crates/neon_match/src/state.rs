//! The match aggregate and its phase transitions.
//!
//! Every transition is atomic. The precondition is checked first, the
//! change is applied, and the postcondition contract is verified against
//! the state from before the call. If anything fails the state is put back
//! exactly as it was and the error is returned, so a spurious command can
//! never leave health or phase half-updated.

use crate::contracts::{Contract, Step, TransitionContract};
use crate::scoring::{INITIAL_HEALTH, Strike, score_reveal};
use crate::{MatchOutcome, Number, Phase, Side};
use derive_more::{Display, Error};
use tracing::{debug, info, instrument, warn};

/// Everything the controller tracks about one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    phase: Phase,
    player_health: u32,
    computer_health: u32,
    player_secret: Option<Number>,
    computer_secret: Option<Number>,
    last_guess: Option<Number>,
    round: u32,
    winner: Option<Side>,
    is_knockout: bool,
    message: String,
}

/// Result of scoring a reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Damage was dealt and the match goes on.
    Damaged {
        /// Damage dealt.
        damage: u32,
    },
    /// The reveal ended the match.
    Finished {
        /// Damage dealt (zero for a knockout).
        damage: u32,
        /// How the match ended.
        outcome: MatchOutcome,
    },
}

/// A transition that could not be applied. The state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum TransitionError {
    /// The command does not belong to the current phase.
    #[display("{step} is not allowed during {phase}")]
    WrongPhase {
        /// Attempted step.
        step: Step,
        /// Phase the match was in.
        phase: Phase,
    },

    /// A value the step depends on was never recorded.
    #[display("{what} is missing during {phase}")]
    MissingValue {
        /// Name of the missing value.
        what: &'static str,
        /// Phase the match was in.
        phase: Phase,
    },

    /// Applying the step would have broken a match invariant.
    #[display("invariant violated: {description}")]
    InvariantViolation {
        /// Violated properties, joined.
        description: String,
    },
}

impl MatchState {
    /// Creates a match sitting on the title screen.
    #[instrument]
    pub fn new() -> Self {
        Self {
            phase: Phase::Menu,
            player_health: INITIAL_HEALTH,
            computer_health: INITIAL_HEALTH,
            player_secret: None,
            computer_secret: None,
            last_guess: None,
            round: 0,
            winner: None,
            is_knockout: false,
            message: "WELCOME TO NEON GUESS 1985".to_string(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Human health.
    pub fn player_health(&self) -> u32 {
        self.player_health
    }

    /// Computer health.
    pub fn computer_health(&self) -> u32 {
        self.computer_health
    }

    /// Health of either side.
    pub fn health(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_health,
            Side::Computer => self.computer_health,
        }
    }

    /// Secret the player hid this round.
    pub fn player_secret(&self) -> Option<Number> {
        self.player_secret
    }

    /// Secret the computer hid this round.
    pub fn computer_secret(&self) -> Option<Number> {
        self.computer_secret
    }

    /// Guess awaiting (or just past) its reveal.
    pub fn last_guess(&self) -> Option<Number> {
        self.last_guess
    }

    /// Round counter, starting at 1. Zero on the title screen.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Winner, once the match is over.
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// True iff the match ended on an exact guess.
    pub fn is_knockout(&self) -> bool {
        self.is_knockout
    }

    /// Announcer line for the current step.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Outcome, once the match is over.
    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.winner
            .map(|winner| MatchOutcome::new(winner, self.is_knockout))
    }

    /// Difference between the secret and the guess on display, during a
    /// reveal phase.
    pub fn pending_damage(&self) -> Option<u32> {
        let secret = match self.phase {
            Phase::RevealAiGuess => self.player_secret?,
            Phase::RevealPlayerGuess => self.computer_secret?,
            _ => return None,
        };
        Some(crate::damage(secret, self.last_guess?))
    }

    /// MENU → PLAYER_SET_SECRET.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<(), TransitionError> {
        self.transition(Step::Start, |state| {
            state.reset();
            Ok(())
        })
    }

    /// GAME_OVER → PLAYER_SET_SECRET, with everything reset.
    #[instrument(skip(self))]
    pub fn play_again(&mut self) -> Result<(), TransitionError> {
        self.transition(Step::PlayAgain, |state| {
            state.reset();
            Ok(())
        })
    }

    /// PLAYER_SET_SECRET → AI_THINKING_GUESS.
    #[instrument(skip(self))]
    pub fn submit_secret(&mut self, secret: Number) -> Result<(), TransitionError> {
        self.transition(Step::SubmitSecret, |state| {
            state.player_secret = Some(secret);
            state.phase = Phase::AiThinkingGuess;
            state.message = "CPU IS CALCULATING PROBABILITY...".to_string();
            Ok(())
        })
    }

    /// AI_THINKING_GUESS → REVEAL_AI_GUESS.
    #[instrument(skip(self))]
    pub fn record_opponent_guess(&mut self, guess: Number) -> Result<(), TransitionError> {
        self.transition(Step::RecordOpponentGuess, |state| {
            state.last_guess = Some(guess);
            state.phase = Phase::RevealAiGuess;
            state.message = format!("CPU GUESSED: {}", guess);
            Ok(())
        })
    }

    /// REVEAL_AI_GUESS → GAME_OVER or AI_SETTING_SECRET.
    ///
    /// A miss damages the computer by the distance. An exact hit is a
    /// computer knockout and zeroes both health pools.
    #[instrument(skip(self))]
    pub fn resolve_opponent_guess(&mut self) -> Result<Resolution, TransitionError> {
        self.transition(Step::ResolveOpponentGuess, |state| {
            let secret = state.require(state.player_secret, "player secret")?;
            let guess = state.require(state.last_guess, "CPU guess")?;

            let resolution = match score_reveal(secret, guess, state.computer_health) {
                Strike::Knockout => {
                    state.player_health = 0;
                    state.computer_health = 0;
                    state.message = "PERFECT GUESS! CRITICAL SYSTEM FAILURE!".to_string();
                    state.finish(Side::Computer, true, 0)
                }
                Strike::Finishing { damage } => {
                    state.computer_health = 0;
                    state.message = format!("CPU CRITICAL FAILURE! SCORE: -{}", damage);
                    state.finish(Side::Player, false, damage)
                }
                Strike::Hit { damage, remaining } => {
                    state.computer_health = remaining;
                    state.last_guess = None;
                    state.phase = Phase::AiSettingSecret;
                    state.message =
                        format!("CPU DAMAGED BY {}. CPU IS NOW HIDING A NUMBER...", damage);
                    Resolution::Damaged { damage }
                }
            };
            Ok(resolution)
        })
    }

    /// AI_SETTING_SECRET → PLAYER_GUESSING.
    #[instrument(skip(self))]
    pub fn record_opponent_secret(&mut self, secret: Number) -> Result<(), TransitionError> {
        self.transition(Step::RecordOpponentSecret, |state| {
            state.computer_secret = Some(secret);
            state.phase = Phase::PlayerGuessing;
            state.message = "CPU HIDDEN. ENTER YOUR PREDICTION.".to_string();
            Ok(())
        })
    }

    /// PLAYER_GUESSING → REVEAL_PLAYER_GUESS.
    #[instrument(skip(self))]
    pub fn submit_guess(&mut self, guess: Number) -> Result<(), TransitionError> {
        self.transition(Step::SubmitGuess, |state| {
            state.last_guess = Some(guess);
            state.phase = Phase::RevealPlayerGuess;
            state.message = format!("CONFIRMING TARGET: {}...", guess);
            Ok(())
        })
    }

    /// REVEAL_PLAYER_GUESS → GAME_OVER or the next round.
    #[instrument(skip(self))]
    pub fn resolve_player_guess(&mut self) -> Result<Resolution, TransitionError> {
        self.transition(Step::ResolvePlayerGuess, |state| {
            let secret = state.require(state.computer_secret, "CPU secret")?;
            let guess = state.require(state.last_guess, "player guess")?;

            let resolution = match score_reveal(secret, guess, state.player_health) {
                Strike::Knockout => {
                    state.computer_health = 0;
                    state.message = "PERFECT GUESS! INSTANT KNOCKOUT!".to_string();
                    state.finish(Side::Player, true, 0)
                }
                Strike::Finishing { damage } => {
                    state.player_health = 0;
                    state.message = format!("PLAYER SIGNAL LOST. DAMAGE: {}", damage);
                    state.finish(Side::Computer, false, damage)
                }
                Strike::Hit { damage, remaining } => {
                    state.player_health = remaining;
                    state.round += 1;
                    state.last_guess = None;
                    state.player_secret = None;
                    state.computer_secret = None;
                    state.phase = Phase::PlayerSetSecret;
                    state.message = format!(
                        "YOU TOOK {} DAMAGE. ROUND {} BEGINS.",
                        damage, state.round
                    );
                    Resolution::Damaged { damage }
                }
            };
            Ok(resolution)
        })
    }

    /// Runs `apply` under the step's contract, rolling back on any error.
    fn transition<T>(
        &mut self,
        step: Step,
        apply: impl FnOnce(&mut Self) -> Result<T, TransitionError>,
    ) -> Result<T, TransitionError> {
        let before = self.clone();

        let result = TransitionContract::pre(&before, &step)
            .and_then(|()| apply(self))
            .and_then(|value| TransitionContract::post(&before, self).map(|()| value));

        match result {
            Ok(value) => {
                debug!(%step, from = %before.phase, to = %self.phase, "Transition applied");
                Ok(value)
            }
            Err(e) => {
                warn!(%step, phase = %before.phase, error = %e, "Transition rejected");
                *self = before;
                Err(e)
            }
        }
    }

    fn require(&self, value: Option<Number>, what: &'static str) -> Result<Number, TransitionError> {
        value.ok_or(TransitionError::MissingValue {
            what,
            phase: self.phase,
        })
    }

    fn reset(&mut self) {
        *self = Self {
            phase: Phase::PlayerSetSecret,
            round: 1,
            message: "ROUND 1: ENTER YOUR SECRET NUMBER (0-100)".to_string(),
            ..Self::new()
        };
    }

    fn finish(&mut self, winner: Side, knockout: bool, damage: u32) -> Resolution {
        self.phase = Phase::GameOver;
        self.winner = Some(winner);
        self.is_knockout = knockout;

        let outcome = MatchOutcome::new(winner, knockout);
        info!(%outcome, round = self.round, "Match finished");
        Resolution::Finished { damage, outcome }
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}
