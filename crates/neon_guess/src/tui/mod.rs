//! Terminal UI for Neon Guess.

mod app;
mod ui;

pub use app::{App, KeyOutcome};

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

use crate::controller::{MatchController, MatchEvent};
use crate::session::{Command, run_session};

/// Log file used while the terminal is in raw mode.
pub const LOG_FILE: &str = "neon_guess.log";

/// Sends logs to [`LOG_FILE`] so they never draw over the screen.
pub fn init_file_logging() -> Result<()> {
    let log_file = std::fs::File::create(LOG_FILE)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Runs the game in the terminal until the player quits.
pub async fn run_tui(controller: MatchController) -> Result<()> {
    info!("Starting Neon Guess TUI");

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let session = tokio::spawn(run_session(controller.with_events(event_tx), command_rx));

    let mut terminal = ratatui::init();
    let result = run_loop(&mut terminal, event_rx, command_tx).await;
    ratatui::restore();

    if let Err(e) = session.await {
        error!(error = %e, "Session task failed");
    }
    if let Err(e) = &result {
        error!(error = ?e, "Game loop error");
    }
    result
}

#[instrument(skip_all)]
async fn run_loop(
    terminal: &mut DefaultTerminal,
    mut events: mpsc::UnboundedReceiver<MatchEvent>,
    commands: mpsc::UnboundedSender<Command>,
) -> Result<()> {
    let mut app = App::new();

    loop {
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|frame| ui::draw(frame, &app))?;

        // crossterm polling blocks, so keep it off the runtime threads
        let key = tokio::task::spawn_blocking(|| -> std::io::Result<Option<Event>> {
            if event::poll(Duration::from_millis(50))? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        })
        .await??;

        let Some(Event::Key(key)) = key else {
            continue;
        };

        match app.handle_key(key) {
            KeyOutcome::Ignored => {}
            KeyOutcome::Quit => {
                info!("Player quit");
                return Ok(());
            }
            KeyOutcome::Send(batch) => {
                for command in batch {
                    commands.send(command)?;
                }
            }
        }
    }
}
