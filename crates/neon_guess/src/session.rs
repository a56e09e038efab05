//! Command loop between a front end and the [`MatchController`].

use strum::Display;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::controller::{MatchController, MatchEvent};

/// Everything a player can ask for.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Command {
    /// Set the pilot name (title and game-over screens only).
    Rename(String),
    /// Leave the title screen.
    StartGame,
    /// Hide a number for the CPU to guess.
    SubmitSecret(String),
    /// Guess the CPU's number.
    SubmitGuess(String),
    /// Score the CPU's guess.
    ConfirmAiGuessReveal,
    /// Score the player's guess.
    ConfirmPlayerGuessReveal,
    /// Start over after a match.
    PlayAgain,
}

/// Runs commands one at a time until the sender hangs up, then hands the
/// controller back.
///
/// The current view is published once up front. Refused entries are
/// reported as [`MatchEvent::Rejected`].
#[instrument(skip_all)]
pub async fn run_session(
    mut controller: MatchController,
    mut commands: mpsc::UnboundedReceiver<Command>,
) -> MatchController {
    info!("Session started");
    controller.emit(MatchEvent::Updated(controller.view()));

    while let Some(command) = commands.recv().await {
        debug!(%command, "Handling command");
        let result = match command {
            Command::Rename(name) => {
                controller.rename_player(&name);
                Ok(())
            }
            Command::StartGame => {
                controller.start_game().await;
                Ok(())
            }
            Command::SubmitSecret(input) => controller.submit_secret(&input).await,
            Command::SubmitGuess(input) => controller.submit_guess(&input).await,
            Command::ConfirmAiGuessReveal => {
                controller.confirm_ai_guess_reveal().await;
                Ok(())
            }
            Command::ConfirmPlayerGuessReveal => {
                controller.confirm_player_guess_reveal().await;
                Ok(())
            }
            Command::PlayAgain => {
                controller.play_again().await;
                Ok(())
            }
        };

        if let Err(e) = result {
            debug!(error = %e, "Entry rejected");
            controller.emit(MatchEvent::Rejected(e));
        }
    }

    info!("Session ended");
    controller
}
