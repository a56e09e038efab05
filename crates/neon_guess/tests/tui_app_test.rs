//! Tests for terminal key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use neon_guess::neon_match::{Phase, ValidationError};
use neon_guess::tui::{App, KeyOutcome};
use neon_guess::{
    Command, MatchController, MatchEvent, MatchView, MemoryStore, Pacing, RandomOpponent,
};
use tokio::sync::mpsc;

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Views published while starting a match and hiding a number.
async fn views() -> Vec<MatchView> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut controller = MatchController::new(
        Box::new(RandomOpponent::seeded("CPU", 3)),
        Box::new(MemoryStore::new()),
        Pacing::instant(),
    )
    .with_events(tx);
    controller.emit(MatchEvent::Updated(controller.view()));
    controller.start_game().await;
    controller.submit_secret("50").await.expect("Valid secret");

    let mut views = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let MatchEvent::Updated(view) = event {
            views.push(view);
        }
    }
    views
}

fn view_in(views: &[MatchView], phase: Phase) -> MatchView {
    views
        .iter()
        .find(|view| view.state().phase() == phase)
        .cloned()
        .expect("Phase was published")
}

#[test]
fn test_keys_ignored_before_first_view() {
    let mut app = App::new();
    assert!(app.input_locked());
    assert_eq!(app.handle_key(press(KeyCode::Enter)), KeyOutcome::Ignored);
    assert_eq!(app.handle_key(press(KeyCode::Esc)), KeyOutcome::Quit);
}

#[tokio::test]
async fn test_menu_name_entry_starts_game() {
    let views = views().await;
    let mut app = App::new();
    app.handle_event(MatchEvent::Updated(view_in(&views, Phase::Menu)));
    assert_eq!(app.name_entry(), "PLAYER 1");

    for _ in 0..8 {
        app.handle_key(press(KeyCode::Backspace));
    }
    for c in "ace".chars() {
        app.handle_key(press(KeyCode::Char(c)));
    }
    assert_eq!(app.name_entry(), "ACE");

    assert_eq!(
        app.handle_key(press(KeyCode::Enter)),
        KeyOutcome::Send(vec![Command::Rename("ACE".to_string()), Command::StartGame])
    );
}

#[tokio::test]
async fn test_number_entry_submits_secret() {
    let views = views().await;
    let mut app = App::new();
    app.handle_event(MatchEvent::Updated(view_in(&views, Phase::PlayerSetSecret)));

    assert_eq!(app.handle_key(press(KeyCode::Enter)), KeyOutcome::Ignored);
    app.handle_key(press(KeyCode::Char('4')));
    app.handle_key(press(KeyCode::Char('2')));
    assert_eq!(app.entry(), "42");

    assert_eq!(
        app.handle_key(press(KeyCode::Enter)),
        KeyOutcome::Send(vec![Command::SubmitSecret("42".to_string())])
    );
    assert_eq!(app.entry(), "");
}

#[tokio::test]
async fn test_rejection_is_shown_until_next_phase() {
    let views = views().await;
    let mut app = App::new();
    app.handle_event(MatchEvent::Updated(view_in(&views, Phase::PlayerSetSecret)));
    app.handle_event(MatchEvent::Rejected(ValidationError::OutOfRange { value: 150 }));
    assert_eq!(app.error(), Some("INVALID INPUT 150. ENTER 0-100."));

    app.handle_event(MatchEvent::Updated(view_in(&views, Phase::AiThinkingGuess)));
    assert_eq!(app.error(), None);
}

#[tokio::test]
async fn test_input_locked_while_cpu_thinks() {
    let views = views().await;
    let mut app = App::new();
    app.handle_event(MatchEvent::Updated(view_in(&views, Phase::AiThinkingGuess)));

    assert!(app.input_locked());
    assert_eq!(app.handle_key(press(KeyCode::Char('7'))), KeyOutcome::Ignored);
    assert_eq!(app.handle_key(press(KeyCode::Enter)), KeyOutcome::Ignored);
    assert_eq!(app.entry(), "");
}

#[tokio::test]
async fn test_reveal_confirms_on_enter() {
    let views = views().await;
    let mut app = App::new();
    app.handle_event(MatchEvent::Updated(view_in(&views, Phase::RevealAiGuess)));

    assert!(!app.input_locked());
    assert_eq!(
        app.handle_key(KeyEvent::new_with_kind(
            KeyCode::Enter,
            KeyModifiers::NONE,
            KeyEventKind::Release
        )),
        KeyOutcome::Ignored
    );
    assert_eq!(
        app.handle_key(press(KeyCode::Enter)),
        KeyOutcome::Send(vec![Command::ConfirmAiGuessReveal])
    );
}
