//! TUI (Terminal User Interface) module for Mastermind
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `Screen`: everything shown on screen plus key handling, free of any terminal
//! - `TuiInterface`: owns the terminal, draws the `Screen` and feeds it key events
//!
//! # State Machine
//! The UI follows these state transitions:
//! - `ChoosingMode` → `EnteringCode` (secret or guess) → back to `EnteringCode` until the game ends
//! - Computer games pause in `WaitingForNext` between guesses
//! - Terminal state: `GameOver` (N starts a new game)

use crate::code::{Color as Peg, Sequence};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{Mode, View};
use crate::scorer::Feedback;
use crate::session::{GameInterface, ModeChoice, UserAction, outcome_message};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const EXACT_PEG: &str = "●";
const COLOR_PEG: &str = "○";

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const EMPTY_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodePurpose {
    Secret,
    Guess,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    ChoosingMode,
    EnteringCode { purpose: CodePurpose },
    WaitingForNext,
    GameOver,
}

/// What a key press resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Answer {
    Mode(ModeChoice),
    Action(UserAction),
    Proceed,
}

/// Background and foreground for a peg.
fn peg_colors(peg: Peg) -> (Color, Color) {
    match peg {
        Peg::Blue => (Color::Blue, Color::White),
        Peg::Green => (Color::Green, Color::Black),
        Peg::Orange => (Color::Rgb(255, 165, 0), Color::Black),
        Peg::Pink => (Color::Rgb(255, 105, 180), Color::Black),
        Peg::Red => (Color::Red, Color::White),
        Peg::Yellow => (Color::Yellow, Color::Black),
        Peg::Cyan => (Color::Cyan, Color::Black),
        Peg::White => (Color::White, Color::Black),
        Peg::Magenta => (Color::Magenta, Color::White),
        Peg::Violet => (Color::Rgb(138, 43, 226), Color::White),
    }
}

fn key_pegs(feedback: Feedback) -> String {
    format!(
        "{}{}",
        EXACT_PEG.repeat(feedback.exact),
        COLOR_PEG.repeat(feedback.color_only)
    )
}

fn has_modifier_keys(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Screen contents and input handling.
#[derive(Debug)]
struct Screen {
    state: TuiState,
    config: GameConfig,
    view: Option<View>,
    input: Vec<Peg>,
    message: String,
    error_message: String,
    status: String,
}

impl Screen {
    fn new() -> Self {
        Self {
            state: TuiState::ChoosingMode,
            config: GameConfig::default(),
            view: None,
            input: Vec::new(),
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Answer> {
        match self.state {
            TuiState::ChoosingMode => Self::handle_mode_input(key),
            TuiState::EnteringCode { .. } => self.handle_code_input(key),
            TuiState::WaitingForNext => Self::handle_waiting_input(key),
            TuiState::GameOver => Self::handle_game_over_input(key),
        }
    }

    fn handle_mode_input(key: KeyEvent) -> Option<Answer> {
        match key.code {
            KeyCode::Char('h' | 'H') => Some(Answer::Mode(ModeChoice::Play(Mode::HumanGuesser))),
            KeyCode::Char('c' | 'C') => {
                Some(Answer::Mode(ModeChoice::Play(Mode::AutomatedGuesser)))
            }
            KeyCode::Esc => Some(Answer::Mode(ModeChoice::Exit)),
            _ => None,
        }
    }

    fn handle_code_input(&mut self, key: KeyEvent) -> Option<Answer> {
        self.error_message.clear();
        if has_modifier_keys(&key) {
            debug_log!(
                "handle_code_input() - Ignoring key with modifier: {:?}",
                key.modifiers
            );
            return None;
        }
        let length = self.config.sequence_length;

        match key.code {
            KeyCode::Char(c) => match Peg::from_symbol(c) {
                Some(peg) if self.config.palette().contains(peg) => {
                    if self.input.len() < length {
                        self.input.push(peg);
                        debug_log!("handle_code_input() - Added '{}'", peg);
                    }
                }
                _ => {
                    self.error_message = format!("'{c}' is not one of the colors in play");
                }
            },
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter if self.input.len() == length => {
                let code = Sequence::new(std::mem::take(&mut self.input));
                info_log!("handle_code_input() - Enter pressed with code '{}'", code);
                return Some(Answer::Action(UserAction::Guess(code)));
            }
            KeyCode::Enter => {
                self.error_message = format!("The code must be exactly {length} colors!");
            }
            KeyCode::Esc => {
                info_log!("handle_code_input() - ESC pressed, returning Exit");
                return Some(Answer::Action(UserAction::Exit));
            }
            _ => {}
        }
        None
    }

    fn handle_waiting_input(key: KeyEvent) -> Option<Answer> {
        match key.code {
            KeyCode::Esc => Some(Answer::Action(UserAction::Exit)),
            _ => Some(Answer::Proceed),
        }
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<Answer> {
        match key.code {
            KeyCode::Char('n' | 'N') => Some(Answer::Action(UserAction::NewGame)),
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(Answer::Action(UserAction::Exit)),
            _ => None,
        }
    }

    fn instructions(&self) -> &'static str {
        match self.state {
            TuiState::ChoosingMode => "H: You guess | C: Computer guesses | ESC: Quit",
            TuiState::EnteringCode { .. } => {
                "Type color letters | BACKSPACE: Delete | ENTER: Submit | ESC: Quit"
            }
            TuiState::WaitingForNext => "Any key: Next guess | ESC: Quit",
            TuiState::GameOver => "N: New Game | ESC: Quit",
        }
    }

    fn render(&self, f: &mut Frame) {
        let board_height = u16::try_from(self.config.max_rounds)
            .unwrap_or(u16::MAX)
            .saturating_add(5);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),            // Title
                Constraint::Length(board_height), // Board
                Constraint::Min(6),               // Info panel
                Constraint::Length(3),            // Status line
                Constraint::Length(3),            // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        self.render_board(f, chunks[1]);
        self.render_info(f, chunks[2]);
        Self::render_text_box(f, chunks[3], &self.status, HEADER_STYLE, Some("Status"));
        Self::render_text_box(
            f,
            chunks[4],
            self.instructions(),
            Style::default().fg(Color::Gray),
            None,
        );
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("MASTERMIND")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn peg_spans(pegs: &[Peg], length: usize) -> Vec<Span<'static>> {
        let mut spans = vec![Span::raw("  ")];
        for i in 0..length {
            match pegs.get(i) {
                Some(peg) => {
                    let (bg, fg) = peg_colors(*peg);
                    spans.push(Span::styled(
                        format!(" {} ", peg.symbol()),
                        Style::default().fg(fg).bg(bg),
                    ));
                }
                None => spans.push(Span::styled(" · ", EMPTY_STYLE)),
            }
            spans.push(Span::raw(" "));
        }
        spans
    }

    fn render_board(&self, f: &mut Frame, area: Rect) {
        let length = self.config.sequence_length;
        let mut lines = Vec::new();

        // Secret row, masked until the game ends
        let mut secret_row = match self.view.as_ref().and_then(|v| v.secret.as_ref()) {
            Some(secret) => Self::peg_spans(secret.colors(), length),
            None => {
                let mut spans = vec![Span::raw("  ")];
                spans.extend((0..length).map(|_| Span::styled(" X ", EMPTY_STYLE)));
                spans
            }
        };
        secret_row.push(Span::styled("  secret", MESSAGE_STYLE));
        lines.push(Line::from(secret_row));
        lines.push(Line::from(format!("  {}", "-".repeat(length * 4))));

        let rounds = self.view.as_ref().map(|v| v.rounds.as_slice()).unwrap_or(&[]);
        let entering_guess = matches!(
            self.state,
            TuiState::EnteringCode {
                purpose: CodePurpose::Guess
            }
        );
        for slot in 0..self.config.max_rounds {
            let mut spans = match rounds.get(slot) {
                Some(round) => {
                    let mut spans = Self::peg_spans(round.guess.colors(), length);
                    spans.push(Span::styled(format!(" {}", key_pegs(round.feedback)), SUCCESS_STYLE));
                    spans
                }
                None if entering_guess && slot == rounds.len() => {
                    let mut spans = Self::peg_spans(&self.input, length);
                    spans.push(Span::raw(" <-"));
                    spans
                }
                None => Self::peg_spans(&[], length),
            };
            spans.insert(0, Span::raw(format!("{:>2}", slot + 1)));
            lines.push(Line::from(spans));
        }

        if let TuiState::EnteringCode {
            purpose: CodePurpose::Secret,
        } = self.state
        {
            lines.push(Line::from(""));
            let mut spans = Self::peg_spans(&self.input, length);
            spans.push(Span::raw(" <- your secret"));
            lines.push(Line::from(spans));
        }

        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Board").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(&self, f: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from(vec![Span::styled("Colors:", HEADER_STYLE)])];
        let mut legend = vec![Span::raw("  ")];
        for peg in self.config.palette().colors() {
            let (bg, fg) = peg_colors(*peg);
            legend.push(Span::styled(
                format!(" {} ", peg.symbol()),
                Style::default().fg(fg).bg(bg),
            ));
            legend.push(Span::raw(format!(" {} ", peg.name())));
        }
        lines.push(Line::from(legend));
        lines.push(Line::from(format!(
            "  {EXACT_PEG} right color, right place   {COLOR_PEG} right color, wrong place"
        )));
        lines.push(Line::from(""));

        if !self.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                self.message.as_str(),
                MESSAGE_STYLE,
            )]));
        }
        if !self.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                self.error_message.as_str(),
                ERROR_STYLE,
            )]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_text_box(f: &mut Frame, area: Rect, text: &str, style: Style, title: Option<&str>) {
        let mut block = Block::default().borders(Borders::ALL);
        if let Some(title) = title {
            block = block.title(title.to_string());
        }
        let paragraph = Paragraph::new(text.to_string()).style(style).block(block);
        f.render_widget(paragraph, area);
    }
}

/// Main TUI interface component.
///
/// Manages terminal rendering and input, and implements [`GameInterface`].
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    screen: Screen,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            screen: Screen::new(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let screen = &self.screen;
        self.terminal.draw(|f| screen.render(f))?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Next key press, filtering out everything else.
    fn next_key(&mut self) -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };
        // Only Press events, so key repeat/release do not double up
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }
        // Garbage from escape sequences when alt-tabbing
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            debug_log!("next_key() - Ignoring invalid character: {:?}", c);
            return Ok(None);
        }
        Ok(Some(key))
    }

    /// Redraw and read keys until the screen produces an answer. Terminal
    /// errors count as quitting.
    fn wait_for_answer(&mut self) -> Answer {
        loop {
            if self.draw().is_err() {
                info_log!("wait_for_answer() - Draw failed, returning Exit");
                return Answer::Action(UserAction::Exit);
            }
            match self.next_key() {
                Ok(Some(key)) => {
                    if let Some(answer) = self.screen.handle_key(key) {
                        debug_log!("wait_for_answer() - {:?}", answer);
                        return answer;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("wait_for_answer() - Input error: {}", e);
                    return Answer::Action(UserAction::Exit);
                }
            }
        }
    }

    fn read_code(&mut self, purpose: CodePurpose) -> Option<UserAction> {
        self.screen.state = TuiState::EnteringCode { purpose };
        self.screen.input.clear();
        match self.wait_for_answer() {
            Answer::Action(action) => Some(action),
            Answer::Mode(_) | Answer::Proceed => None,
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_intro(&mut self, config: &GameConfig) {
        self.screen.config = *config;
        self.screen.message = format!(
            "Crack a code of {} colors in {} guesses.",
            config.sequence_length, config.max_rounds
        );
        self.screen.status = "Choose who guesses".to_string();
        self.draw_or_log();
    }

    fn read_mode(&mut self) -> Option<ModeChoice> {
        self.screen.state = TuiState::ChoosingMode;
        match self.wait_for_answer() {
            Answer::Mode(choice) => Some(choice),
            Answer::Action(UserAction::Exit) => Some(ModeChoice::Exit),
            _ => None,
        }
    }

    fn read_secret(&mut self, config: &GameConfig) -> Option<UserAction> {
        self.screen.config = *config;
        self.screen.status = "Pick the secret code for the computer to crack".to_string();
        self.read_code(CodePurpose::Secret)
    }

    fn read_guess(&mut self, view: &View) -> Option<UserAction> {
        self.screen.view = Some(view.clone());
        self.screen.status = format!("Enter guess #{}", view.rounds.len() + 1);
        self.read_code(CodePurpose::Guess)
    }

    fn display_computer_guess(&mut self, round: usize, guess: &Sequence) {
        self.screen.message = format!("Computer guess #{}: {guess}", round + 1);
        self.draw_or_log();
    }

    fn continue_watching(&mut self, view: &View) -> bool {
        self.screen.view = Some(view.clone());
        self.screen.state = TuiState::WaitingForNext;
        !matches!(self.wait_for_answer(), Answer::Action(UserAction::Exit))
    }

    fn display_board(&mut self, view: &View) {
        self.screen.view = Some(view.clone());
        self.screen.status = view.phase.to_string();
        self.draw_or_log();
    }

    fn display_error(&mut self, error: &GameError) {
        self.screen.error_message = error.to_string();
        self.draw_or_log();
    }

    fn display_outcome(&mut self, view: &View) {
        self.screen.view = Some(view.clone());
        self.screen.state = TuiState::GameOver;
        self.screen.message = outcome_message(view).to_string();
        self.screen.status = format!("Game Over - {}", view.phase);
        self.draw_or_log();
    }

    fn read_play_again(&mut self) -> UserAction {
        self.screen.state = TuiState::GameOver;
        match self.wait_for_answer() {
            Answer::Action(UserAction::NewGame) => UserAction::NewGame,
            _ => UserAction::Exit,
        }
    }

    fn display_new_game_message(&mut self, config: &GameConfig) {
        self.screen.config = *config;
        self.screen.view = None;
        self.screen.input.clear();
        self.screen.error_message.clear();
        self.screen.message = "New game started.".to_string();
        self.screen.status = "New game".to_string();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.screen.message = "Exiting...".to_string();
        self.screen.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn entering(purpose: CodePurpose) -> Screen {
        let mut screen = Screen::new();
        screen.state = TuiState::EnteringCode { purpose };
        screen
    }

    #[test]
    fn test_mode_keys() {
        let mut screen = Screen::new();
        assert_eq!(
            screen.handle_key(press(KeyCode::Char('h'))),
            Some(Answer::Mode(ModeChoice::Play(Mode::HumanGuesser)))
        );
        assert_eq!(
            screen.handle_key(press(KeyCode::Char('C'))),
            Some(Answer::Mode(ModeChoice::Play(Mode::AutomatedGuesser)))
        );
        assert_eq!(
            screen.handle_key(press(KeyCode::Esc)),
            Some(Answer::Mode(ModeChoice::Exit))
        );
        assert_eq!(screen.handle_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_typing_a_guess() {
        let mut screen = entering(CodePurpose::Guess);
        for c in "bgop".chars() {
            assert_eq!(screen.handle_key(press(KeyCode::Char(c))), None);
        }
        assert_eq!(
            screen.handle_key(press(KeyCode::Enter)),
            Some(Answer::Action(UserAction::Guess(
                Sequence::parse("bgop").unwrap()
            )))
        );
        assert!(screen.input.is_empty());
    }

    #[test]
    fn test_input_is_capped_at_sequence_length() {
        let mut screen = entering(CodePurpose::Guess);
        for c in "bgopry".chars() {
            screen.handle_key(press(KeyCode::Char(c)));
        }
        assert_eq!(screen.input.len(), 4);
    }

    #[test]
    fn test_colors_outside_palette_are_rejected() {
        let mut screen = entering(CodePurpose::Secret);
        screen.handle_key(press(KeyCode::Char('c')));
        assert!(screen.input.is_empty());
        assert!(!screen.error_message.is_empty());
        screen.handle_key(press(KeyCode::Char('z')));
        assert!(screen.input.is_empty());
    }

    #[test]
    fn test_enter_with_short_code_shows_error() {
        let mut screen = entering(CodePurpose::Guess);
        screen.handle_key(press(KeyCode::Char('b')));
        assert_eq!(screen.handle_key(press(KeyCode::Enter)), None);
        assert_eq!(screen.error_message, "The code must be exactly 4 colors!");
    }

    #[test]
    fn test_backspace_removes_last_peg() {
        let mut screen = entering(CodePurpose::Guess);
        screen.handle_key(press(KeyCode::Char('b')));
        screen.handle_key(press(KeyCode::Char('g')));
        screen.handle_key(press(KeyCode::Backspace));
        assert_eq!(screen.input, vec![Peg::Blue]);
    }

    #[test]
    fn test_modifier_keys_are_ignored() {
        let mut screen = entering(CodePurpose::Guess);
        screen.handle_key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::CONTROL));
        assert!(screen.input.is_empty());
    }

    #[test]
    fn test_escape_exits_while_entering() {
        let mut screen = entering(CodePurpose::Guess);
        assert_eq!(
            screen.handle_key(press(KeyCode::Esc)),
            Some(Answer::Action(UserAction::Exit))
        );
    }

    #[test]
    fn test_waiting_proceeds_on_any_key() {
        let mut screen = Screen::new();
        screen.state = TuiState::WaitingForNext;
        assert_eq!(
            screen.handle_key(press(KeyCode::Char('z'))),
            Some(Answer::Proceed)
        );
        assert_eq!(screen.handle_key(press(KeyCode::Enter)), Some(Answer::Proceed));
    }

    #[test]
    fn test_escape_exits_while_watching_computer() {
        let mut screen = Screen::new();
        screen.state = TuiState::WaitingForNext;
        assert_eq!(
            screen.handle_key(press(KeyCode::Esc)),
            Some(Answer::Action(UserAction::Exit))
        );
    }

    #[test]
    fn test_game_over_keys() {
        let mut screen = Screen::new();
        screen.state = TuiState::GameOver;
        assert_eq!(
            screen.handle_key(press(KeyCode::Char('n'))),
            Some(Answer::Action(UserAction::NewGame))
        );
        assert_eq!(
            screen.handle_key(press(KeyCode::Esc)),
            Some(Answer::Action(UserAction::Exit))
        );
        assert_eq!(screen.handle_key(press(KeyCode::Enter)), None);
    }

    #[test]
    fn test_key_pegs() {
        assert_eq!(key_pegs(Feedback::new(2, 1)), "●●○");
        assert_eq!(key_pegs(Feedback::new(0, 0)), "");
    }

    #[test]
    fn test_every_peg_has_distinct_background() {
        for (i, a) in Peg::ALL.iter().enumerate() {
            for b in &Peg::ALL[i + 1..] {
                assert_ne!(peg_colors(*a).0, peg_colors(*b).0);
            }
        }
    }
}
