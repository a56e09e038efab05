//! Stateless UI rendering.

use neon_match::{INITIAL_HEALTH, MatchState, Phase, Side};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use super::app::App;
use crate::controller::MatchView;

const NEON_PINK: Color = Color::Rgb(255, 0, 85);
const NEON_CYAN: Color = Color::Rgb(0, 243, 255);
const NEON_GREEN: Color = Color::Rgb(0, 255, 65);
const NEON_GOLD: Color = Color::Rgb(255, 204, 0);

/// Draws the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(5), // Scoreboard
            Constraint::Min(7),    // Phase panel
            Constraint::Length(3), // Announcer
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("NEON GUESS 1985")
        .style(Style::default().fg(NEON_PINK).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, chunks[0]);

    let Some(view) = app.view() else {
        frame.render_widget(
            Paragraph::new("BOOTING...").alignment(Alignment::Center),
            chunks[2],
        );
        return;
    };
    let state = view.state();

    if state.phase() != Phase::Menu {
        draw_scoreboard(frame, chunks[1], view);
    }

    match state.phase() {
        Phase::Menu => draw_menu(frame, chunks[2], app, view),
        Phase::PlayerSetSecret => draw_entry(frame, chunks[2], app, "HIDE YOUR NUMBER"),
        Phase::PlayerGuessing => draw_entry(frame, chunks[2], app, "GUESS THE CPU'S NUMBER"),
        Phase::AiThinkingGuess => draw_thinking(frame, chunks[2], "CPU IS GUESSING"),
        Phase::AiSettingSecret => draw_thinking(frame, chunks[2], "CPU IS HIDING A NUMBER"),
        Phase::RevealAiGuess | Phase::RevealPlayerGuess => draw_reveal(frame, chunks[2], state),
        Phase::GameOver => draw_game_over(frame, chunks[2], view),
    }

    let mut announcer = vec![Line::from(Span::styled(
        state.message().to_string(),
        Style::default().fg(NEON_GOLD),
    ))];
    if let Some(error) = app.error() {
        announcer.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(NEON_PINK).add_modifier(Modifier::BOLD),
        )));
    }
    frame.render_widget(
        Paragraph::new(announcer)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        chunks[3],
    );

    frame.render_widget(
        Paragraph::new(help_text(state.phase()))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        chunks[4],
    );
}

fn help_text(phase: Phase) -> &'static str {
    match phase {
        Phase::Menu => "TYPE YOUR NAME, ENTER TO START, ESC TO QUIT",
        Phase::GameOver => "ENTER TO PLAY AGAIN, Q TO QUIT",
        p if p.accepts_number() => "TYPE 0-100 AND PRESS ENTER",
        p if p.is_reveal() => "ENTER TO APPLY DAMAGE",
        _ => "PLEASE WAIT",
    }
}

fn draw_scoreboard(frame: &mut Frame, area: Rect, view: &MatchView) {
    let state = view.state();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(40),
        ])
        .split(area);

    frame.render_widget(
        health_gauge(view.player_name(), state.health(Side::Player), NEON_CYAN),
        columns[0],
    );

    let round = Paragraph::new(vec![
        Line::from(format!("ROUND {}", state.round())),
        Line::from(Span::styled(
            format!("★ {}", view.stars()),
            Style::default().fg(NEON_GOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(round, columns[1]);

    frame.render_widget(
        health_gauge(view.opponent_name(), state.health(Side::Computer), NEON_PINK),
        columns[2],
    );
}

fn health_gauge(name: &str, health: u32, color: Color) -> Gauge<'static> {
    Gauge::default()
        .block(
            Block::default()
                .title(name.to_string())
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(color))
        .ratio(f64::from(health) / f64::from(INITIAL_HEALTH))
        .label(format!("{} / {}", health, INITIAL_HEALTH))
}

fn draw_menu(frame: &mut Frame, area: Rect, app: &App, view: &MatchView) {
    let lines = vec![
        Line::from(Span::styled(
            "INSERT COIN TO START",
            Style::default().fg(NEON_GREEN).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("PILOT: {}_", app.name_entry())),
        Line::from(Span::styled(
            format!("RANK: {}", view.rank()),
            Style::default().fg(NEON_GOLD),
        )),
        Line::from(""),
        Line::from("MODE: 100 // DIFFERENCE SUBTRACTION"),
        Line::from("EXACT GUESS = INSTANT KNOCKOUT"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_entry(frame: &mut Frame, area: Rect, app: &App, prompt: &str) {
    let lines = vec![
        Line::from(prompt.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            format!("> {}_", app.entry()),
            Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_thinking(frame: &mut Frame, area: Rect, label: &str) {
    let text = Paragraph::new(format!("{}...", label))
        .style(
            Style::default()
                .fg(NEON_PINK)
                .add_modifier(Modifier::SLOW_BLINK),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(text, area);
}

fn draw_reveal(frame: &mut Frame, area: Rect, state: &MatchState) {
    let (secret, guess, color) = match state.phase() {
        Phase::RevealAiGuess => (state.player_secret(), state.last_guess(), NEON_PINK),
        _ => (state.computer_secret(), state.last_guess(), NEON_CYAN),
    };
    let show = |n: Option<neon_match::Number>| n.map_or_else(|| "?".to_string(), |n| n.to_string());

    let mut lines = vec![
        Line::from(format!("SECRET: {}   GUESS: {}", show(secret), show(guess))),
        Line::from(""),
    ];
    if let Some(difference) = state.pending_damage() {
        lines.push(Line::from(Span::styled(
            format!("DIFFERENCE: {}", difference),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        if difference == 0 {
            lines.push(Line::from(Span::styled(
                "CRITICAL HIT!",
                Style::default().fg(NEON_PINK).add_modifier(Modifier::SLOW_BLINK),
            )));
        }
    }
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_game_over(frame: &mut Frame, area: Rect, view: &MatchView) {
    let state = view.state();
    let mut lines = vec![Line::from("GAME OVER"), Line::from("")];

    match state.winner() {
        Some(Side::Player) => {
            lines.push(Line::from(Span::styled(
                "YOU WIN!",
                Style::default().fg(NEON_GREEN).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                "+1 STAR EARNED",
                Style::default().fg(NEON_GOLD),
            )));
        }
        _ => lines.push(Line::from(Span::styled(
            "YOU LOSE",
            Style::default().fg(NEON_PINK).add_modifier(Modifier::BOLD),
        ))),
    }
    if state.is_knockout() {
        lines.push(Line::from("BY KNOCKOUT"));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}
