//! Game configuration.

use crate::llm_client::{LlmConfig, LlmProvider};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Settings for a Neon Guess installation.
///
/// Every field has a default, so an empty TOML file (or no file at all)
/// is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// LLM provider (openai, anthropic or gemini).
    #[serde(default = "default_provider")]
    llm_provider: LlmProvider,

    /// LLM model name (e.g., "gemini-2.5-flash", "gpt-4o-mini").
    #[serde(default = "default_model")]
    llm_model: String,

    /// Maximum tokens for LLM responses.
    #[serde(default = "default_max_tokens")]
    llm_max_tokens: u32,

    /// Pause before the CPU guesses, in milliseconds.
    #[serde(default = "default_guess_delay_ms")]
    guess_delay_ms: u64,

    /// Pause before the CPU hides its number, in milliseconds.
    #[serde(default = "default_secret_delay_ms")]
    secret_delay_ms: u64,

    /// SQLite database holding the pilot profile.
    #[serde(default = "default_db_path")]
    db_path: String,
}

fn default_provider() -> LlmProvider {
    LlmProvider::Gemini
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_max_tokens() -> u32 {
    16
}

fn default_guess_delay_ms() -> u64 {
    1500
}

fn default_secret_delay_ms() -> u64 {
    2000
}

fn default_db_path() -> String {
    "neon_guess.db".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            llm_provider: default_provider(),
            llm_model: default_model(),
            llm_max_tokens: default_max_tokens(),
            guess_delay_ms: default_guess_delay_ms(),
            secret_delay_ms: default_secret_delay_ms(),
            db_path: default_db_path(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(provider = ?config.llm_provider, model = %config.llm_model, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads the file if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the database path.
    pub fn with_db_path(mut self, db_path: impl Into<String>) -> Self {
        self.db_path = db_path.into();
        self
    }

    /// Replaces both pacing delays.
    pub fn with_delays(mut self, guess_delay_ms: u64, secret_delay_ms: u64) -> Self {
        self.guess_delay_ms = guess_delay_ms;
        self.secret_delay_ms = secret_delay_ms;
        self
    }

    /// Pause before the CPU guesses.
    pub fn guess_delay(&self) -> Duration {
        Duration::from_millis(self.guess_delay_ms)
    }

    /// Pause before the CPU hides its number.
    pub fn secret_delay(&self) -> Duration {
        Duration::from_millis(self.secret_delay_ms)
    }

    /// Creates LLM configuration from this game config.
    /// Requires the provider's API key environment variable.
    #[instrument(skip(self), fields(provider = ?self.llm_provider, model = %self.llm_model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        let var = self.llm_provider.api_key_var();
        let api_key = std::env::var(var)
            .map_err(|_| ConfigError::new(format!("{} environment variable not set", var)))?;

        Ok(LlmConfig::new(
            self.llm_provider,
            api_key,
            self.llm_model.clone(),
            self.llm_max_tokens,
        ))
    }

    /// Like [`create_llm_config`](Self::create_llm_config), but treats a
    /// missing key as "play offline".
    #[instrument(skip(self))]
    pub fn llm_config_if_available(&self) -> Option<LlmConfig> {
        match self.create_llm_config() {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(error = %e, "No LLM credentials, the CPU will play offline");
                None
            }
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
