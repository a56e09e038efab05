//! Neon Guess 1985 - a retro number duel against an LLM opponent.
//!
//! # Architecture
//!
//! - **Controller**: runs player commands against a `neon_match` match and
//!   drives the computer's turns
//! - **Opponent**: LLM-backed (OpenAI, Anthropic, Gemini) or offline random
//! - **Profile**: pilot name and lifetime stars in a key-value store
//! - **Session / TUI**: command loop and terminal front end
//!
//! # Example
//!
//! ```no_run
//! use neon_guess::{MatchController, MemoryStore, Pacing, RandomOpponent};
//!
//! # async fn example() {
//! let mut controller = MatchController::new(
//!     Box::new(RandomOpponent::new("CPU")),
//!     Box::new(MemoryStore::new()),
//!     Pacing::instant(),
//! );
//! controller.start_game().await;
//! controller.submit_secret("42").await.expect("valid entry");
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod llm_client;
mod opponent;
mod profile;
mod session;
mod store;

/// Terminal front end.
pub mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Match control
pub use controller::{MatchController, MatchEvent, MatchView, Pacing};
pub use session::{Command, run_session};

// Crate-level exports - Opponents
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider};
pub use opponent::{LlmOpponent, Opponent, RandomOpponent, parse_reply};

// Crate-level exports - Persistence
pub use profile::{
    DEFAULT_NAME, MAX_NAME_LEN, NAME_KEY, Profile, STARS_KEY, normalize_name, rank_for,
};
pub use store::{MemoryStore, NewProfileEntry, ProfileEntry, ProfileStore, SqliteStore, StoreError};

// Re-export the match core
pub use neon_match;
