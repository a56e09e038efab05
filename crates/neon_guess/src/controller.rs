//! Match controller: runs commands against a [`MatchState`] and drives the
//! computer's turns.
//!
//! Entering `AI_THINKING_GUESS` or `AI_SETTING_SECRET` triggers the
//! opponent call as part of the same command, so one awaited command
//! always leaves the match waiting on the human again (or over).

use std::time::Duration;

use derive_getters::Getters;
use derive_new::new;
use neon_match::{MatchState, Number, Phase, Resolution, TransitionError, ValidationError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::config::GameConfig;
use crate::opponent::Opponent;
use crate::profile::Profile;
use crate::store::ProfileStore;

/// Dramatic pauses before each computer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct Pacing {
    /// Pause before the CPU guesses.
    guess_delay: Duration,
    /// Pause before the CPU hides its number.
    secret_delay: Duration,
}

impl Pacing {
    /// No pauses at all.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Pauses taken from configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.guess_delay(), config.secret_delay())
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// Snapshot of everything a screen needs to draw.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MatchView {
    state: MatchState,
    player_name: String,
    stars: u32,
    rank: String,
    opponent_name: String,
}

/// Notifications published by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    /// The match or profile changed.
    Updated(MatchView),
    /// A typed number was refused. The match is unchanged.
    Rejected(ValidationError),
}

/// Owns one match and everything it talks to.
pub struct MatchController {
    state: MatchState,
    opponent: Box<dyn Opponent>,
    profile: Profile,
    pacing: Pacing,
    rng: StdRng,
    events: Option<mpsc::UnboundedSender<MatchEvent>>,
}

impl MatchController {
    /// Creates a controller on the title screen.
    #[instrument(skip(opponent, store), fields(opponent_name = %opponent.name()))]
    pub fn new(opponent: Box<dyn Opponent>, store: Box<dyn ProfileStore>, pacing: Pacing) -> Self {
        info!("Creating match controller");
        Self {
            state: MatchState::new(),
            opponent,
            profile: Profile::load(store),
            pacing,
            rng: StdRng::from_os_rng(),
            events: None,
        }
    }

    /// Uses a seeded generator for fallback values.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Publishes every change on `events`.
    pub fn with_events(mut self, events: mpsc::UnboundedSender<MatchEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Current match.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Pilot profile.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Snapshot for presentation.
    pub fn view(&self) -> MatchView {
        MatchView {
            state: self.state.clone(),
            player_name: self.profile.name().to_string(),
            stars: self.profile.stars(),
            rank: self.profile.rank(),
            opponent_name: self.opponent.name().to_string(),
        }
    }

    /// Sends an event to the observer, if any.
    pub fn emit(&self, event: MatchEvent) {
        if let Some(events) = &self.events {
            if events.send(event).is_err() {
                debug!("Event receiver dropped");
            }
        }
    }

    fn publish(&self) {
        self.emit(MatchEvent::Updated(self.view()));
    }

    /// Changes the pilot name. Only allowed on the title and game-over
    /// screens.
    #[instrument(skip(self))]
    pub fn rename_player(&mut self, name: &str) {
        match self.state.phase() {
            Phase::Menu | Phase::GameOver => {
                self.profile.rename(name);
                self.publish();
            }
            phase => warn!(%phase, "Ignoring rename during a match"),
        }
    }

    /// MENU → PLAYER_SET_SECRET. Saves the pilot name.
    #[instrument(skip(self))]
    pub async fn start_game(&mut self) {
        if self.apply(MatchState::start).is_some() {
            self.profile.remember_name();
            self.publish();
        }
    }

    /// GAME_OVER → PLAYER_SET_SECRET. Saves the pilot name.
    #[instrument(skip(self))]
    pub async fn play_again(&mut self) {
        if self.apply(MatchState::play_again).is_some() {
            self.profile.remember_name();
            self.publish();
        }
    }

    /// Hides the player's number, then lets the CPU guess it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for entries that are not whole numbers
    /// in `0..=100`. The match is left untouched.
    #[instrument(skip(self))]
    pub async fn submit_secret(&mut self, input: &str) -> Result<(), ValidationError> {
        if !self.expect_phase(Phase::PlayerSetSecret) {
            return Ok(());
        }
        let secret: Number = input.parse()?;

        if self.apply(|state| state.submit_secret(secret)).is_some() {
            self.publish();
            self.run_opponent_turn().await;
        }
        Ok(())
    }

    /// Submits the player's guess at the CPU's number.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for entries that are not whole numbers
    /// in `0..=100`. The match is left untouched.
    #[instrument(skip(self))]
    pub async fn submit_guess(&mut self, input: &str) -> Result<(), ValidationError> {
        if !self.expect_phase(Phase::PlayerGuessing) {
            return Ok(());
        }
        let guess: Number = input.parse()?;

        if self.apply(|state| state.submit_guess(guess)).is_some() {
            self.publish();
        }
        Ok(())
    }

    /// Scores the CPU's guess. On a miss the CPU goes on to hide its own
    /// number.
    #[instrument(skip(self))]
    pub async fn confirm_ai_guess_reveal(&mut self) {
        if let Some(resolution) = self.apply(MatchState::resolve_opponent_guess) {
            self.settle(resolution);
            self.run_opponent_turn().await;
        }
    }

    /// Scores the player's guess.
    #[instrument(skip(self))]
    pub async fn confirm_player_guess_reveal(&mut self) {
        if let Some(resolution) = self.apply(MatchState::resolve_player_guess) {
            self.settle(resolution);
        }
    }

    /// Runs phase-entry actions until the match waits on the human again.
    async fn run_opponent_turn(&mut self) {
        loop {
            match self.state.phase() {
                Phase::AiThinkingGuess => {
                    tokio::time::sleep(self.pacing.guess_delay).await;
                    let context = format!(
                        "Turn: {}, Player Score: {}",
                        self.state.round(),
                        self.state.player_health()
                    );
                    let raw = self.opponent.generate_guess(&context).await;
                    let guess = self.accept_or_fallback(raw, "guess");
                    if self.apply(|state| state.record_opponent_guess(guess)).is_none() {
                        return;
                    }
                }
                Phase::AiSettingSecret => {
                    tokio::time::sleep(self.pacing.secret_delay).await;
                    let raw = self.opponent.generate_secret().await;
                    let secret = self.accept_or_fallback(raw, "secret");
                    if self.apply(|state| state.record_opponent_secret(secret)).is_none() {
                        return;
                    }
                }
                _ => return,
            }
            self.publish();
        }
    }

    /// Validates an opponent value, substituting a random one on failure.
    #[instrument(skip(self, raw))]
    fn accept_or_fallback(&mut self, raw: anyhow::Result<i64>, what: &'static str) -> Number {
        let problem = match raw {
            Ok(value) => match Number::new(value) {
                Ok(number) => {
                    debug!(%number, "Opponent value accepted");
                    return number;
                }
                Err(e) => e.to_string(),
            },
            Err(e) => e.to_string(),
        };

        let fallback = Number::saturating(self.rng.random_range(0..=100));
        warn!(problem = %problem, %fallback, "Opponent failed, using random value");
        fallback
    }

    /// Awards a star for a human win and publishes the result.
    fn settle(&mut self, resolution: Resolution) {
        if let Resolution::Finished { outcome, .. } = resolution {
            if outcome.earns_star() {
                self.profile.award_star();
            }
        }
        self.publish();
    }

    fn expect_phase(&self, phase: Phase) -> bool {
        if self.state.phase() == phase {
            true
        } else {
            warn!(expected = %phase, actual = %self.state.phase(), "Ignoring command in wrong phase");
            false
        }
    }

    /// Applies a transition, logging and swallowing refusals.
    fn apply<T>(
        &mut self,
        transition: impl FnOnce(&mut MatchState) -> Result<T, TransitionError>,
    ) -> Option<T> {
        match transition(&mut self.state) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, "Ignoring command");
                None
            }
        }
    }
}

impl std::fmt::Debug for MatchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchController")
            .field("state", &self.state)
            .field("opponent", &self.opponent.name())
            .field("profile", &self.profile)
            .field("pacing", &self.pacing)
            .finish_non_exhaustive()
    }
}
