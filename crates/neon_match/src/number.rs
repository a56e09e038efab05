//! Validated secrets and guesses.

use derive_more::{Display, Error};
use std::str::FromStr;
use tracing::instrument;

/// Smallest value a secret or guess may take.
pub const MIN_NUMBER: u8 = 0;

/// Largest value a secret or guess may take.
pub const MAX_NUMBER: u8 = 100;

/// A secret or guess, always within `MIN_NUMBER..=MAX_NUMBER`.
///
/// The only ways to obtain one are [`Number::new`], `TryFrom<i64>` and
/// `FromStr`, so a `Number` held anywhere in a match is already in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("{_0}")]
pub struct Number(u8);

impl Number {
    /// Validates a raw integer.
    #[instrument]
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if (i64::from(MIN_NUMBER)..=i64::from(MAX_NUMBER)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::OutOfRange { value })
        }
    }

    /// Clamps a raw integer into range.
    pub fn saturating(value: i64) -> Self {
        Self(value.clamp(i64::from(MIN_NUMBER), i64::from(MAX_NUMBER)) as u8)
    }

    /// Returns the numeric value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Number {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Number {
    type Err = ValidationError;

    /// Parses user entry. Surrounding whitespace is ignored; anything that
    /// is not a whole decimal number is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| ValidationError::NotANumber {
                input: trimmed.to_string(),
            })?;
        Self::new(value)
    }
}

impl From<Number> for u8 {
    fn from(number: Number) -> Self {
        number.0
    }
}

/// Rejected secret or guess entry.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ValidationError {
    /// Entry was not a whole number.
    #[display("INVALID INPUT '{input}'. ENTER 0-100.")]
    NotANumber {
        /// The trimmed text that failed to parse.
        input: String,
    },

    /// Entry was a number outside `0..=100`.
    #[display("INVALID INPUT {value}. ENTER 0-100.")]
    OutOfRange {
        /// The offending value.
        value: i64,
    },
}
