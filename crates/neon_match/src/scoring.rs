//! Scoring engine: damage, knockouts and health updates.

use crate::Number;
use tracing::instrument;

/// Health each side starts a match with.
pub const INITIAL_HEALTH: u32 = 1000;

/// Distance between a secret and the guess made against it.
pub fn damage(secret: Number, guess: Number) -> u32 {
    u32::from(secret.value().abs_diff(guess.value()))
}

/// An exact guess is a knockout.
pub fn is_knockout(damage: u32) -> bool {
    damage == 0
}

/// Subtracts damage from health, flooring at zero.
pub fn apply_damage(health: u32, damage: u32) -> u32 {
    health.saturating_sub(damage)
}

/// What a revealed guess does to the side that hid the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strike {
    /// The guess matched the secret exactly.
    Knockout,
    /// Damage dealt, defender still standing.
    Hit {
        /// Damage dealt.
        damage: u32,
        /// Defender health after the hit.
        remaining: u32,
    },
    /// Damage dealt took the defender to zero.
    Finishing {
        /// Damage dealt.
        damage: u32,
    },
}

impl Strike {
    /// Damage carried by this strike (zero for a knockout).
    pub fn damage(self) -> u32 {
        match self {
            Strike::Knockout => 0,
            Strike::Hit { damage, .. } | Strike::Finishing { damage } => damage,
        }
    }
}

/// Scores a reveal against the health of the side whose secret was guessed.
#[instrument]
pub fn score_reveal(secret: Number, guess: Number, defender_health: u32) -> Strike {
    let damage = damage(secret, guess);
    if is_knockout(damage) {
        return Strike::Knockout;
    }

    match apply_damage(defender_health, damage) {
        0 => Strike::Finishing { damage },
        remaining => Strike::Hit { damage, remaining },
    }
}
