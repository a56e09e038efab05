//! Command-line interface for neon_guess.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Neon Guess 1985 - hide a number, guess the CPU's, don't get knocked out
#[derive(Parser, Debug)]
#[command(name = "neon_guess")]
#[command(about = "Retro number duel against an LLM opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Path to the game config (defaults are used if it doesn't exist)
        #[arg(short, long, default_value = "neon_guess.toml")]
        config: PathBuf,

        /// Override the profile database path
        #[arg(long)]
        db_path: Option<String>,

        /// Play against the offline random CPU even if an API key is set
        #[arg(long)]
        offline: bool,
    },

    /// Show or change the saved pilot profile
    Profile {
        /// Path to the game config (defaults are used if it doesn't exist)
        #[arg(short, long, default_value = "neon_guess.toml")]
        config: PathBuf,

        /// Override the profile database path
        #[arg(long)]
        db_path: Option<String>,

        /// Save a new pilot name
        #[arg(long)]
        rename: Option<String>,
    },
}
