//! Computer opponents.
//!
//! An opponent only proposes raw numbers. Range checking and the random
//! fallback belong to the controller, so an opponent is free to return
//! garbage or fail outright.

use crate::llm_client::LlmClient;
use anyhow::{Result, anyhow};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

/// Something that can hide numbers and guess the player's.
#[async_trait::async_trait]
pub trait Opponent: Send {
    /// Picks a number for the player to guess.
    async fn generate_secret(&mut self) -> Result<i64>;

    /// Guesses the player's hidden number.
    ///
    /// `context` describes the match so far. It is flavor for the
    /// opponent and never affects scoring.
    async fn generate_guess(&mut self, context: &str) -> Result<i64>;

    /// Returns the opponent's display name.
    fn name(&self) -> &str;
}

const GUESS_SYSTEM_PROMPT: &str = "You are an 80s arcade supercomputer villain. \
You are playing a number guessing game (0-100). \
Your goal is to guess the number the human player has chosen.";

const SECRET_SYSTEM_PROMPT: &str = "You are an 80s arcade supercomputer villain \
hiding a number from a human player.";

/// Opponent backed by an LLM.
pub struct LlmOpponent {
    client: LlmClient,
    name: String,
}

impl LlmOpponent {
    /// Creates an opponent that asks `client` for every number.
    #[instrument(skip(client), fields(provider = ?client.config().provider()))]
    pub fn new(client: LlmClient) -> Self {
        let name = format!("CPU ({})", client.config().model());
        info!(opponent = %name, "Creating LLM opponent");
        Self { client, name }
    }

    #[instrument(skip(self, system_prompt, prompt))]
    async fn ask(&self, system_prompt: &str, prompt: &str) -> Result<i64> {
        let reply = self.client.generate(system_prompt, prompt).await?;
        debug!(reply = %reply.trim(), "Opponent replied");
        parse_reply(&reply).ok_or_else(|| anyhow!("No integer in reply: {:?}", reply.trim()))
    }
}

#[async_trait::async_trait]
impl Opponent for LlmOpponent {
    async fn generate_secret(&mut self) -> Result<i64> {
        self.ask(
            SECRET_SYSTEM_PROMPT,
            "Pick a random integer between 0 and 100. Return ONLY the number, no text.",
        )
        .await
    }

    async fn generate_guess(&mut self, context: &str) -> Result<i64> {
        let prompt = format!(
            "Game History (if any): {}\n\n\
             Pick an integer between 0 and 100 that you think the player chose.\n\
             Return ONLY the integer. Do not add punctuation or text.",
            context
        );
        self.ask(GUESS_SYSTEM_PROMPT, &prompt).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Offline opponent drawing uniformly from `0..=100`.
pub struct RandomOpponent {
    name: String,
    rng: StdRng,
}

impl RandomOpponent {
    /// Creates an opponent seeded from the OS.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a reproducible opponent.
    pub fn seeded(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn roll(&mut self) -> i64 {
        self.rng.random_range(0..=100)
    }
}

#[async_trait::async_trait]
impl Opponent for RandomOpponent {
    async fn generate_secret(&mut self) -> Result<i64> {
        let secret = self.roll();
        debug!(opponent = %self.name, "Random secret chosen");
        Ok(secret)
    }

    async fn generate_guess(&mut self, _context: &str) -> Result<i64> {
        let guess = self.roll();
        debug!(opponent = %self.name, guess, "Random guess chosen");
        Ok(guess)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Reads the integer a reply starts with.
///
/// Leading whitespace and a single sign are allowed and anything after the
/// digits is ignored, so `"42."` and `"17 is my guess"` both parse.
pub fn parse_reply(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_bare_and_decorated_numbers() {
        assert_eq!(parse_reply("42"), Some(42));
        assert_eq!(parse_reply("  7\n"), Some(7));
        assert_eq!(parse_reply("42."), Some(42));
        assert_eq!(parse_reply("17 is my guess"), Some(17));
        assert_eq!(parse_reply("-5"), Some(-5));
        assert_eq!(parse_reply("+9"), Some(9));
        assert_eq!(parse_reply("150"), Some(150));
    }

    #[test]
    fn test_rejects_replies_without_a_leading_number() {
        assert_eq!(parse_reply(""), None);
        assert_eq!(parse_reply("I choose 42"), None);
        assert_eq!(parse_reply("-"), None);
        assert_eq!(parse_reply("99999999999999999999"), None);
    }

    #[tokio::test]
    async fn test_random_opponent_stays_in_range() {
        let mut cpu = RandomOpponent::seeded("CPU", 7);
        for _ in 0..500 {
            let secret = cpu.generate_secret().await.expect("infallible");
            let guess = cpu.generate_guess("Turn: 1").await.expect("infallible");
            assert!((0..=100).contains(&secret));
            assert!((0..=100).contains(&guess));
        }
    }
}
