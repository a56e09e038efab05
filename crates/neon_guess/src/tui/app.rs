//! Application state and key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use neon_match::Phase;
use tracing::debug;

use crate::controller::{MatchEvent, MatchView};
use crate::profile::MAX_NAME_LEN;
use crate::session::Command;

/// Longest entry the number box accepts.
const MAX_ENTRY_LEN: usize = 5;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Nothing to send.
    Ignored,
    /// Forward these commands to the session, in order.
    Send(Vec<Command>),
    /// Leave the game.
    Quit,
}

/// Main application state.
#[derive(Debug, Default)]
pub struct App {
    view: Option<MatchView>,
    entry: String,
    name_entry: Option<String>,
    error: Option<String>,
}

impl App {
    /// Creates an app waiting for the first view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest view from the controller.
    pub fn view(&self) -> Option<&MatchView> {
        self.view.as_ref()
    }

    /// Current phase, once known.
    pub fn phase(&self) -> Option<Phase> {
        self.view.as_ref().map(|view| view.state().phase())
    }

    /// Text typed into the number box.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Name being typed on the title screen.
    pub fn name_entry(&self) -> &str {
        self.name_entry.as_deref().unwrap_or_default()
    }

    /// Last refused entry, shown until the match moves on.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while the CPU is working and keys are ignored.
    pub fn input_locked(&self) -> bool {
        self.phase().is_none_or(Phase::awaits_opponent)
    }

    /// Handles an event from the session.
    pub fn handle_event(&mut self, event: MatchEvent) {
        debug!(?event, "Handling match event");

        match event {
            MatchEvent::Updated(view) => {
                let phase = view.state().phase();
                if self.phase() != Some(phase) {
                    self.entry.clear();
                    self.error = None;
                }
                if self.name_entry.is_none() {
                    self.name_entry = Some(view.player_name().clone());
                }
                self.view = Some(view);
            }
            MatchEvent::Rejected(e) => {
                self.entry.clear();
                self.error = Some(e.to_string());
            }
        }
    }

    /// Turns a key press into commands for the session.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.kind != KeyEventKind::Press {
            return KeyOutcome::Ignored;
        }
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            return KeyOutcome::Quit;
        }

        let Some(phase) = self.phase() else {
            return KeyOutcome::Ignored;
        };

        match phase {
            Phase::Menu => self.menu_key(key.code),
            Phase::PlayerSetSecret => self.entry_key(key.code, Command::SubmitSecret),
            Phase::PlayerGuessing => self.entry_key(key.code, Command::SubmitGuess),
            Phase::RevealAiGuess => confirm_key(key.code, Command::ConfirmAiGuessReveal),
            Phase::RevealPlayerGuess => confirm_key(key.code, Command::ConfirmPlayerGuessReveal),
            Phase::GameOver => match key.code {
                KeyCode::Enter | KeyCode::Char('r') => KeyOutcome::Send(vec![Command::PlayAgain]),
                KeyCode::Char('q') => KeyOutcome::Quit,
                _ => KeyOutcome::Ignored,
            },
            Phase::AiThinkingGuess | Phase::AiSettingSecret => KeyOutcome::Ignored,
        }
    }

    fn menu_key(&mut self, code: KeyCode) -> KeyOutcome {
        let name = self.name_entry.get_or_insert_with(String::new);
        match code {
            KeyCode::Enter => KeyOutcome::Send(vec![
                Command::Rename(name.clone()),
                Command::StartGame,
            ]),
            KeyCode::Backspace => {
                name.pop();
                KeyOutcome::Ignored
            }
            KeyCode::Char(c) if !c.is_control() && name.chars().count() < MAX_NAME_LEN => {
                name.extend(c.to_uppercase());
                KeyOutcome::Ignored
            }
            _ => KeyOutcome::Ignored,
        }
    }

    fn entry_key(&mut self, code: KeyCode, submit: impl FnOnce(String) -> Command) -> KeyOutcome {
        match code {
            KeyCode::Enter if !self.entry.is_empty() => {
                KeyOutcome::Send(vec![submit(std::mem::take(&mut self.entry))])
            }
            KeyCode::Backspace => {
                self.entry.pop();
                KeyOutcome::Ignored
            }
            KeyCode::Char(c) if !c.is_control() && self.entry.len() < MAX_ENTRY_LEN => {
                self.entry.push(c);
                self.error = None;
                KeyOutcome::Ignored
            }
            _ => KeyOutcome::Ignored,
        }
    }
}

fn confirm_key(code: KeyCode, command: Command) -> KeyOutcome {
    match code {
        KeyCode::Enter | KeyCode::Char(' ') => KeyOutcome::Send(vec![command]),
        _ => KeyOutcome::Ignored,
    }
}
