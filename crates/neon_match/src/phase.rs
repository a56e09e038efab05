//! Phases of a match and who can win it.

use strum::{Display, EnumIter};

/// Step a match is in.
///
/// A round runs `PlayerSetSecret → AiThinkingGuess → RevealAiGuess →
/// AiSettingSecret → PlayerGuessing → RevealPlayerGuess` and then either
/// loops to `PlayerSetSecret` or ends in `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Title screen, no match running.
    Menu,
    /// Player is choosing a secret for the CPU to guess.
    PlayerSetSecret,
    /// CPU is producing its guess.
    AiThinkingGuess,
    /// CPU guess is shown and waits to be scored.
    RevealAiGuess,
    /// CPU is choosing its secret.
    AiSettingSecret,
    /// Player is entering a guess at the CPU secret.
    PlayerGuessing,
    /// Player guess is shown and waits to be scored.
    RevealPlayerGuess,
    /// Match finished.
    GameOver,
}

impl Phase {
    /// Phases in which an opponent request is outstanding and no user
    /// input may be accepted.
    pub fn awaits_opponent(self) -> bool {
        matches!(self, Phase::AiThinkingGuess | Phase::AiSettingSecret)
    }

    /// Phases in which the player types a number.
    pub fn accepts_number(self) -> bool {
        matches!(self, Phase::PlayerSetSecret | Phase::PlayerGuessing)
    }

    /// Phases showing a guess that has not been scored yet.
    pub fn is_reveal(self) -> bool {
        matches!(self, Phase::RevealAiGuess | Phase::RevealPlayerGuess)
    }
}

/// One of the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    /// The human.
    Player,
    /// The computer opponent.
    Computer,
}

/// How a finished match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchOutcome {
    /// Side that won.
    pub winner: Side,
    /// True when the final reveal was an exact guess.
    pub knockout: bool,
}

impl MatchOutcome {
    /// Creates an outcome.
    pub fn new(winner: Side, knockout: bool) -> Self {
        Self { winner, knockout }
    }

    /// A human win earns one star, however it was won.
    pub fn earns_star(&self) -> bool {
        self.winner == Side::Player
    }
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let how = if self.knockout { "knockout" } else { "attrition" };
        write!(f, "{} wins by {}", self.winner, how)
    }
}
