//! Neon Guess 1985 - CLI entry point.

#![warn(missing_docs)]

mod cli;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use neon_guess::{
    GameConfig, LlmClient, LlmOpponent, MatchController, MemoryStore, Opponent, Pacing, Profile,
    ProfileStore, RandomOpponent, SqliteStore,
};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            db_path,
            offline,
        } => run_play(&config, db_path, offline).await,
        Command::Profile {
            config,
            db_path,
            rename,
        } => run_profile(&config, db_path, rename),
    }
}

fn load_config(path: &Path, db_path: Option<String>) -> Result<GameConfig> {
    let config = GameConfig::load_or_default(path)?;
    Ok(match db_path {
        Some(db_path) => config.with_db_path(db_path),
        None => config,
    })
}

/// Play a match in the terminal
async fn run_play(config_path: &Path, db_path: Option<String>, offline: bool) -> Result<()> {
    neon_guess::tui::init_file_logging()?;
    let config = load_config(config_path, db_path)?;

    let llm = if offline {
        None
    } else {
        config.llm_config_if_available()
    };
    let opponent: Box<dyn Opponent> = match llm {
        Some(llm) => Box::new(LlmOpponent::new(LlmClient::new(llm))),
        None => Box::new(RandomOpponent::new("CPU")),
    };
    info!(opponent = %opponent.name(), "Opponent ready");

    let store: Box<dyn ProfileStore> = match SqliteStore::open(config.db_path().clone()) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "Profile database unavailable, stars won't be saved");
            Box::new(MemoryStore::new())
        }
    };

    let controller = MatchController::new(opponent, store, Pacing::from_config(&config));
    neon_guess::tui::run_tui(controller).await
}

/// Show or update the saved profile
#[instrument(skip(config_path))]
fn run_profile(config_path: &Path, db_path: Option<String>, rename: Option<String>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(config_path, db_path)?;
    let store = SqliteStore::open(config.db_path().clone())?;
    let mut profile = Profile::load(Box::new(store));

    if let Some(name) = rename {
        profile.rename(&name);
        profile.remember_name();
        info!(name = %profile.name(), "Pilot renamed");
    }

    println!("PILOT: {}", profile.name());
    println!("STARS: {}", profile.stars());
    println!("RANK:  {}", profile.rank());
    Ok(())
}
