//! Tests for the match controller with a scripted opponent.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use neon_guess::neon_match::{Number, Phase, Side, ValidationError};
use neon_guess::{
    MatchController, MatchEvent, MemoryStore, NAME_KEY, Opponent, Pacing, ProfileStore,
    STARS_KEY, StoreError,
};
use tokio::sync::mpsc;

/// Opponent that replays canned answers and records what it was told.
struct ScriptedOpponent {
    guesses: VecDeque<Result<i64, String>>,
    secrets: VecDeque<Result<i64, String>>,
    contexts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedOpponent {
    fn new(guesses: Vec<Result<i64, String>>, secrets: Vec<Result<i64, String>>) -> Self {
        Self {
            guesses: guesses.into(),
            secrets: secrets.into(),
            contexts: Arc::default(),
        }
    }

    fn ok(guesses: &[i64], secrets: &[i64]) -> Self {
        Self::new(
            guesses.iter().copied().map(Ok).collect(),
            secrets.iter().copied().map(Ok).collect(),
        )
    }
}

#[async_trait::async_trait]
impl Opponent for ScriptedOpponent {
    async fn generate_secret(&mut self) -> anyhow::Result<i64> {
        match self.secrets.pop_front() {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => anyhow::bail!(message),
            None => anyhow::bail!("script exhausted"),
        }
    }

    async fn generate_guess(&mut self, context: &str) -> anyhow::Result<i64> {
        self.contexts
            .lock()
            .expect("Lock poisoned")
            .push(context.to_string());
        match self.guesses.pop_front() {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => anyhow::bail!(message),
            None => anyhow::bail!("script exhausted"),
        }
    }

    fn name(&self) -> &str {
        "SCRIPT"
    }
}

/// Store whose contents the test can still read after handing it over.
#[derive(Clone, Default)]
struct SharedStore(Arc<Mutex<MemoryStore>>);

impl SharedStore {
    fn read(&self, key: &str) -> Option<String> {
        self.0.lock().expect("Lock poisoned").get(key).expect("Memory get")
    }
}

impl ProfileStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.0.lock().expect("Lock poisoned").get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0.lock().expect("Lock poisoned").set(key, value)
    }
}

fn controller(opponent: ScriptedOpponent) -> MatchController {
    MatchController::new(
        Box::new(opponent),
        Box::new(MemoryStore::new()),
        Pacing::instant(),
    )
    .with_seed(1985)
}

fn n(value: i64) -> Number {
    Number::new(value).expect("Valid number")
}

#[tokio::test]
async fn test_cpu_exact_guess_is_knockout() {
    let mut c = controller(ScriptedOpponent::ok(&[37], &[]));
    c.start_game().await;
    c.submit_secret("37").await.expect("Valid secret");

    assert_eq!(c.state().phase(), Phase::RevealAiGuess);
    assert_eq!(c.state().last_guess(), Some(n(37)));

    c.confirm_ai_guess_reveal().await;
    let state = c.state();
    assert_eq!(state.phase(), Phase::GameOver);
    assert_eq!(state.winner(), Some(Side::Computer));
    assert!(state.is_knockout());
    assert_eq!(state.player_health(), 0);
    assert_eq!(state.computer_health(), 0);
    assert_eq!(c.profile().stars(), 0);
}

#[tokio::test]
async fn test_cpu_miss_damages_cpu_then_cpu_hides_number() {
    let mut c = controller(ScriptedOpponent::ok(&[10], &[70]));
    c.start_game().await;
    c.submit_secret("50").await.expect("Valid secret");
    c.confirm_ai_guess_reveal().await;

    let state = c.state();
    assert_eq!(state.computer_health(), 960);
    assert_eq!(state.player_health(), 1000);
    assert_eq!(state.phase(), Phase::PlayerGuessing);
    assert_eq!(state.computer_secret(), Some(n(70)));
    assert_eq!(state.message(), "CPU HIDDEN. ENTER YOUR PREDICTION.");
}

#[tokio::test]
async fn test_attrition_win_awards_one_star() {
    let mut guesses = vec![0; 9];
    guesses.extend([30, 0]);
    let store = SharedStore::default();
    let mut c = MatchController::new(
        Box::new(ScriptedOpponent::ok(&guesses, &[50; 10])),
        Box::new(store.clone()),
        Pacing::instant(),
    );
    c.start_game().await;

    for round in 1..=10 {
        assert_eq!(c.state().round(), round);
        c.submit_secret("100").await.expect("Valid secret");
        c.confirm_ai_guess_reveal().await;
        c.submit_guess("49").await.expect("Valid guess");
        c.confirm_player_guess_reveal().await;
    }
    assert_eq!(c.state().computer_health(), 30);
    assert_eq!(c.state().player_health(), 990);

    c.submit_secret("45").await.expect("Valid secret");
    c.confirm_ai_guess_reveal().await;

    let state = c.state();
    assert_eq!(state.phase(), Phase::GameOver);
    assert_eq!(state.computer_health(), 0);
    assert_eq!(state.winner(), Some(Side::Player));
    assert!(!state.is_knockout());
    assert_eq!(c.profile().stars(), 1);
    assert_eq!(store.read(STARS_KEY).as_deref(), Some("1"));
}

#[tokio::test]
async fn test_player_knockout_awards_one_star() {
    let mut c = controller(ScriptedOpponent::ok(&[80], &[64]));
    c.start_game().await;
    c.submit_secret("20").await.expect("Valid secret");
    c.confirm_ai_guess_reveal().await;
    c.submit_guess("64").await.expect("Valid guess");
    assert_eq!(c.state().pending_damage(), Some(0));

    c.confirm_player_guess_reveal().await;
    assert_eq!(c.state().winner(), Some(Side::Player));
    assert!(c.state().is_knockout());
    assert_eq!(c.profile().stars(), 1);
    assert_eq!(c.profile().rank(), "1 STAR GENERAL");
}

#[tokio::test]
async fn test_invalid_entries_are_rejected_without_change() {
    let mut c = controller(ScriptedOpponent::ok(&[], &[]));
    c.start_game().await;
    let before = c.state().clone();

    assert_eq!(
        c.submit_secret("150").await,
        Err(ValidationError::OutOfRange { value: 150 })
    );
    assert!(matches!(
        c.submit_secret("abc").await,
        Err(ValidationError::NotANumber { .. })
    ));
    assert!(matches!(
        c.submit_secret("50.5").await,
        Err(ValidationError::NotANumber { .. })
    ));
    assert_eq!(c.state(), &before);
}

#[tokio::test]
async fn test_failing_opponent_falls_back_to_random_guess() {
    let mut c = controller(ScriptedOpponent::new(
        vec![Err("network down".to_string())],
        vec![],
    ));
    c.start_game().await;
    c.submit_secret("50").await.expect("Valid secret");

    assert_eq!(c.state().phase(), Phase::RevealAiGuess);
    assert!(c.state().last_guess().is_some());
}

#[tokio::test]
async fn test_out_of_range_opponent_values_fall_back() {
    let mut c = controller(ScriptedOpponent::ok(&[250], &[]));
    c.start_game().await;
    c.submit_secret("100").await.expect("Valid secret");
    assert_eq!(c.state().phase(), Phase::RevealAiGuess);
    assert!(c.state().last_guess().is_some());

    let mut c = controller(ScriptedOpponent::ok(&[10], &[-3]));
    c.start_game().await;
    c.submit_secret("50").await.expect("Valid secret");
    c.confirm_ai_guess_reveal().await;
    assert_eq!(c.state().computer_health(), 960);
    assert_eq!(c.state().phase(), Phase::PlayerGuessing);
    assert!(c.state().computer_secret().is_some());
}

#[tokio::test]
async fn test_opponent_receives_round_context() {
    let opponent = ScriptedOpponent::ok(&[0], &[10]);
    let contexts = Arc::clone(&opponent.contexts);
    let mut c = controller(opponent);
    c.start_game().await;
    c.submit_secret("100").await.expect("Valid secret");

    let seen = contexts.lock().expect("Lock poisoned").clone();
    assert_eq!(seen, vec!["Turn: 1, Player Score: 1000".to_string()]);
}

#[tokio::test]
async fn test_wrong_phase_commands_are_ignored() {
    let mut c = controller(ScriptedOpponent::ok(&[], &[]));
    let menu = c.state().clone();

    c.confirm_ai_guess_reveal().await;
    c.confirm_player_guess_reveal().await;
    c.play_again().await;
    assert_eq!(c.submit_secret("10").await, Ok(()));
    assert_eq!(c.submit_guess("10").await, Ok(()));
    assert_eq!(c.state(), &menu);

    c.start_game().await;
    let started = c.state().clone();
    c.start_game().await;
    c.confirm_player_guess_reveal().await;
    assert_eq!(c.submit_guess("999").await, Ok(()));
    assert_eq!(c.state(), &started);
}

#[tokio::test]
async fn test_play_again_resets_match_but_keeps_stars() {
    let mut c = controller(ScriptedOpponent::ok(&[80], &[64]));
    c.start_game().await;
    c.submit_secret("20").await.expect("Valid secret");
    c.confirm_ai_guess_reveal().await;
    c.submit_guess("64").await.expect("Valid guess");
    c.confirm_player_guess_reveal().await;
    assert_eq!(c.state().phase(), Phase::GameOver);

    c.play_again().await;
    let state = c.state();
    assert_eq!(state.phase(), Phase::PlayerSetSecret);
    assert_eq!(state.round(), 1);
    assert_eq!(state.player_health(), 1000);
    assert_eq!(state.computer_health(), 1000);
    assert_eq!(state.winner(), None);
    assert_eq!(c.profile().stars(), 1);
}

#[tokio::test]
async fn test_start_remembers_player_name() {
    let store = SharedStore::default();
    let mut c = MatchController::new(
        Box::new(ScriptedOpponent::ok(&[], &[])),
        Box::new(store.clone()),
        Pacing::instant(),
    );

    c.rename_player("  neo ");
    assert_eq!(c.view().player_name(), "NEO");
    assert_eq!(store.read(NAME_KEY), None);

    c.start_game().await;
    assert_eq!(store.read(NAME_KEY).as_deref(), Some("NEO"));

    c.rename_player("TRINITY");
    assert_eq!(c.view().player_name(), "NEO");
}

#[tokio::test]
async fn test_events_expose_cpu_phases() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut c = controller(ScriptedOpponent::ok(&[10], &[70])).with_events(tx);
    c.start_game().await;
    c.submit_secret("50").await.expect("Valid secret");
    c.confirm_ai_guess_reveal().await;

    let mut phases = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let MatchEvent::Updated(view) = event {
            phases.push(view.state().phase());
        }
    }
    assert_eq!(
        phases,
        vec![
            Phase::PlayerSetSecret,
            Phase::AiThinkingGuess,
            Phase::RevealAiGuess,
            Phase::AiSettingSecret,
            Phase::PlayerGuessing,
        ]
    );
}

#[tokio::test]
async fn test_invalid_guesses_are_rejected_without_change() {
    let mut c = controller(ScriptedOpponent::ok(&[10], &[70]));
    c.start_game().await;
    c.submit_secret("50").await.expect("Valid secret");
    c.confirm_ai_guess_reveal().await;
    assert_eq!(c.state().phase(), Phase::PlayerGuessing);
    let before = c.state().clone();

    assert_eq!(
        c.submit_guess("101").await,
        Err(ValidationError::OutOfRange { value: 101 })
    );
    assert!(matches!(
        c.submit_guess("x").await,
        Err(ValidationError::NotANumber { .. })
    ));
    assert_eq!(c.state(), &before);
}

#[tokio::test]
async fn test_attrition_loss_awards_no_star() {
    let store = SharedStore::default();
    let mut c = MatchController::new(
        Box::new(ScriptedOpponent::ok(&[0; 10], &[0; 10])),
        Box::new(store.clone()),
        Pacing::instant(),
    )
    .with_seed(1985);
    c.start_game().await;

    for _ in 0..10 {
        c.submit_secret("1").await.expect("Valid secret");
        c.confirm_ai_guess_reveal().await;
        c.submit_guess("100").await.expect("Valid guess");
        c.confirm_player_guess_reveal().await;
    }

    let state = c.state();
    assert_eq!(state.phase(), Phase::GameOver);
    assert_eq!(state.winner(), Some(Side::Computer));
    assert!(!state.is_knockout());
    assert_eq!(state.player_health(), 0);
    assert_eq!(state.computer_health(), 990);
    assert_eq!(c.profile().stars(), 0);
    assert_eq!(store.read(STARS_KEY), None);
}
