//! Tests for the command loop.

use neon_guess::neon_match::{Phase, ValidationError};
use neon_guess::{
    Command, MatchController, MatchEvent, MemoryStore, Pacing, RandomOpponent, run_session,
};
use tokio::sync::mpsc;

fn controller(events: mpsc::UnboundedSender<MatchEvent>) -> MatchController {
    MatchController::new(
        Box::new(RandomOpponent::seeded("CPU", 42)),
        Box::new(MemoryStore::new()),
        Pacing::instant(),
    )
    .with_seed(42)
    .with_events(events)
}

#[tokio::test]
async fn test_session_runs_commands_in_order() {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    command_tx
        .send(Command::Rename("ace".to_string()))
        .expect("Send failed");
    command_tx.send(Command::StartGame).expect("Send failed");
    command_tx
        .send(Command::SubmitSecret("150".to_string()))
        .expect("Send failed");
    command_tx
        .send(Command::SubmitSecret("40".to_string()))
        .expect("Send failed");
    drop(command_tx);

    let controller = run_session(controller(event_tx), command_rx).await;
    assert_eq!(controller.state().phase(), Phase::RevealAiGuess);
    assert_eq!(controller.profile().name(), "ACE");

    let mut events = Vec::new();
    while let Ok(event) = event_rx.try_recv() {
        events.push(event);
    }

    match events.first() {
        Some(MatchEvent::Updated(view)) => assert_eq!(view.state().phase(), Phase::Menu),
        other => panic!("Expected initial view, got {:?}", other),
    }
    assert!(events.contains(&MatchEvent::Rejected(ValidationError::OutOfRange {
        value: 150
    })));
    assert!(events.iter().any(|event| matches!(
        event,
        MatchEvent::Updated(view) if view.state().phase() == Phase::AiThinkingGuess
    )));
}

#[tokio::test]
async fn test_session_ends_when_sender_drops() {
    let (event_tx, _event_rx) = mpsc::unbounded_channel();
    let (command_tx, command_rx) = mpsc::unbounded_channel::<Command>();
    drop(command_tx);

    let controller = run_session(controller(event_tx), command_rx).await;
    assert_eq!(controller.state().phase(), Phase::Menu);
}
