//! The pilot profile: display name and lifetime star tally.

use crate::store::ProfileStore;
use tracing::{debug, info, instrument, warn};

/// Store key for the display name.
pub const NAME_KEY: &str = "neon_player_name";

/// Store key for the star tally.
pub const STARS_KEY: &str = "neon_stars";

/// Name used until the player picks one.
pub const DEFAULT_NAME: &str = "PLAYER 1";

/// Longest name the scoreboard shows.
pub const MAX_NAME_LEN: usize = 10;

/// Player name and stars, backed by a [`ProfileStore`].
///
/// Store failures are logged and otherwise ignored. Losing a star write is
/// better than interrupting a match.
pub struct Profile {
    store: Box<dyn ProfileStore>,
    name: String,
    stars: u32,
}

impl Profile {
    /// Reads the saved name and stars. Missing or unreadable values fall
    /// back to [`DEFAULT_NAME`] and zero stars.
    #[instrument(skip(store))]
    pub fn load(store: Box<dyn ProfileStore>) -> Self {
        let name = match store.get(NAME_KEY) {
            Ok(Some(saved)) => normalize_name(&saved),
            Ok(None) => DEFAULT_NAME.to_string(),
            Err(e) => {
                warn!(error = %e, "Could not read player name");
                DEFAULT_NAME.to_string()
            }
        };

        let stars = match store.get(STARS_KEY) {
            Ok(Some(saved)) => saved.trim().parse().unwrap_or_else(|_| {
                warn!(value = %saved, "Ignoring corrupt star count");
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                warn!(error = %e, "Could not read star count");
                0
            }
        };

        info!(name = %name, stars, "Profile loaded");
        Self { store, name, stars }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lifetime wins.
    pub fn stars(&self) -> u32 {
        self.stars
    }

    /// Title shown on the menu.
    pub fn rank(&self) -> String {
        rank_for(self.stars)
    }

    /// Changes the display name without saving it.
    #[instrument(skip(self))]
    pub fn rename(&mut self, raw: &str) {
        self.name = normalize_name(raw);
        debug!(name = %self.name, "Player renamed");
    }

    /// Saves the current display name.
    #[instrument(skip(self), fields(name = %self.name))]
    pub fn remember_name(&mut self) {
        if let Err(e) = self.store.set(NAME_KEY, &self.name) {
            warn!(error = %e, "Could not save player name");
        }
    }

    /// Adds one star and saves the new tally. Returns the tally.
    #[instrument(skip(self))]
    pub fn award_star(&mut self) -> u32 {
        self.stars = self.stars.saturating_add(1);
        if let Err(e) = self.store.set(STARS_KEY, &self.stars.to_string()) {
            warn!(error = %e, "Could not save star count");
        }
        info!(stars = self.stars, "Star awarded");
        self.stars
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name)
            .field("stars", &self.stars)
            .finish_non_exhaustive()
    }
}

/// Cleans up a typed name: uppercase, trimmed, at most
/// [`MAX_NAME_LEN`] characters. Blank input becomes [`DEFAULT_NAME`].
pub fn normalize_name(raw: &str) -> String {
    let name: String = raw
        .trim()
        .to_uppercase()
        .chars()
        .take(MAX_NAME_LEN)
        .collect();
    let name = name.trim_end();

    if name.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        name.to_string()
    }
}

/// "ROOKIE" until the first win, then "N STAR GENERAL".
pub fn rank_for(stars: u32) -> String {
    if stars == 0 {
        "ROOKIE".to_string()
    } else {
        format!("{} STAR GENERAL", stars)
    }
}
