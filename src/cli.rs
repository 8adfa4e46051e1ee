use crate::code::{Color, Sequence};
use crate::config::{DEFAULT_MAX_ROUNDS, DEFAULT_PALETTE_SIZE, DEFAULT_SEQUENCE_LENGTH, GameConfig};
use crate::error::GameError;
use crate::game::{Mode, View};
use crate::session::{GameInterface, ModeChoice, UserAction, outcome_message};
use clap::{Parser, ValueEnum};
use std::io::BufRead;

/// Mastermind CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of pegs in the code
    #[arg(short = 'l', long = "length", default_value_t = DEFAULT_SEQUENCE_LENGTH)]
    pub sequence_length: usize,

    /// Number of colors in play (at most 10)
    #[arg(short = 'c', long = "colors", default_value_t = DEFAULT_PALETTE_SIZE)]
    pub palette_size: usize,

    /// Number of guesses allowed
    #[arg(short = 'r', long = "rounds", default_value_t = DEFAULT_MAX_ROUNDS)]
    pub max_rounds: usize,

    /// Who guesses; asked at startup when omitted
    #[arg(short = 'm', long = "mode", value_enum)]
    pub mode: Option<ModeArg>,

    /// Seed for reproducible secrets and computer guesses
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Log debug output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// You guess the computer's code
    Human,
    /// The computer guesses your code
    Computer,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Human => Mode::HumanGuesser,
            ModeArg::Computer => Mode::AutomatedGuesser,
        }
    }
}

impl Cli {
    pub fn game_config(&self) -> GameConfig {
        GameConfig::new(self.sequence_length, self.palette_size, self.max_rounds)
    }

    pub fn game_mode(&self) -> Option<Mode> {
        self.mode.map(Mode::from)
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

pub enum CodeInput {
    Valid(Sequence),
    Invalid,
    Exit,
    NewGame,
}

/// Pre-check before handing a code to the game.
fn is_valid_code(input: &str, config: &GameConfig) -> bool {
    let palette = config.palette();
    input.chars().count() == config.sequence_length
        && input
            .chars()
            .all(|c| Color::from_symbol(c).is_some_and(|color| palette.contains(color)))
}

/// A sample code cycling through the palette, e.g. `bgop`.
pub fn example_code(config: &GameConfig) -> String {
    config
        .palette()
        .colors()
        .iter()
        .cycle()
        .take(config.sequence_length)
        .map(|c| c.symbol())
        .collect()
}

/// Palette listing in the form `blue(b) green(g) ...`.
pub fn palette_legend(config: &GameConfig) -> String {
    config
        .palette()
        .colors()
        .iter()
        .map(|c| format!("{}({})", c.name(), c.symbol()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Board as text: the secret (masked until the game ends), a rule, then one
/// line per round from the last slot down to the first.
pub fn format_board(view: &View) -> String {
    let length = view.config.sequence_length;
    let mut lines = Vec::with_capacity(view.config.max_rounds + 2);
    lines.push(match &view.secret {
        Some(secret) => secret.to_string(),
        None => "X".repeat(length),
    });
    lines.push("-".repeat(length));
    for round in (0..view.config.max_rounds).rev() {
        lines.push(match view.rounds.get(round) {
            Some(r) => format!("{} {}", r.guess, r.feedback),
            None => ".".repeat(length),
        });
    }
    lines.join("\n")
}

/// Reads one line; `None` at end of input or on a read error.
fn read_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_lowercase()),
    }
}

pub fn display_intro(config: &GameConfig) {
    println!("Welcome to Mastermind.");
    println!("---------------------");
    println!("Codes are {} colors long. Choose between:", config.sequence_length);
    println!("{}", palette_legend(config));
    println!("O = correct color in correct position; o = correct color.");
}

pub fn read_mode<R: BufRead>(reader: &mut R) -> Option<ModeChoice> {
    println!("\nType 'human' if you want to guess the secret code.");
    println!("Type 'computer' if you want the computer to do it.");
    let Some(input) = read_line(reader) else {
        return Some(ModeChoice::Exit);
    };
    match input.as_str() {
        "human" => Some(ModeChoice::Play(Mode::HumanGuesser)),
        "computer" => Some(ModeChoice::Play(Mode::AutomatedGuesser)),
        "exit" => Some(ModeChoice::Exit),
        _ => {
            println!("Invalid input. Type 'human' or 'computer'.");
            None
        }
    }
}

pub fn read_code<R: BufRead>(reader: &mut R, config: &GameConfig, prompt: &str) -> CodeInput {
    println!(
        "\n{prompt} ({} colors, or 'exit' to quit, or 'next' to start a new game):",
        config.sequence_length
    );
    let Some(input) = read_line(reader) else {
        return CodeInput::Exit;
    };

    match input.as_str() {
        "exit" => CodeInput::Exit,
        "next" => CodeInput::NewGame,
        _ if is_valid_code(&input, config) => match Sequence::parse(&input) {
            Ok(code) => CodeInput::Valid(code),
            Err(_) => CodeInput::Invalid,
        },
        _ => {
            display_invalid_code(config);
            CodeInput::Invalid
        }
    }
}

pub fn display_invalid_code(config: &GameConfig) {
    println!(
        "Invalid input. Pick {} colors, e.g.: '{}'.",
        config.sequence_length,
        example_code(config)
    );
}

pub fn display_board(view: &View) {
    println!();
    println!("{}", format_board(view));
}

pub fn display_computer_guess(round: usize, guess: &Sequence) {
    println!("Computer guess #{}: {guess}", round + 1);
}

pub fn display_error(error: &GameError) {
    println!("Error: {error}");
}

pub fn display_outcome(view: &View) {
    if let Some(secret) = &view.secret {
        println!("The code was {secret}.");
    }
    println!("{}", outcome_message(view));
}

pub fn read_play_again<R: BufRead>(reader: &mut R) -> UserAction {
    println!("\nType 'next' to play again or anything else to quit:");
    match read_line(reader).as_deref() {
        Some("next") => UserAction::NewGame,
        _ => UserAction::Exit,
    }
}

pub fn display_exit_message() {
    println!("Exiting.");
}

pub fn display_new_game_message(config: &GameConfig) {
    println!(
        "New game started. {} colors, {} rounds.",
        config.sequence_length, config.max_rounds
    );
}

fn into_action(input: CodeInput) -> Option<UserAction> {
    match input {
        CodeInput::Valid(code) => Some(UserAction::Guess(code)),
        CodeInput::Exit => Some(UserAction::Exit),
        CodeInput::NewGame => Some(UserAction::NewGame),
        CodeInput::Invalid => None,
    }
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_intro(&mut self, config: &GameConfig) {
        display_intro(config);
    }

    fn read_mode(&mut self) -> Option<ModeChoice> {
        read_mode(&mut self.reader)
    }

    fn read_secret(&mut self, config: &GameConfig) -> Option<UserAction> {
        into_action(read_code(&mut self.reader, config, "Pick the secret code"))
    }

    fn read_guess(&mut self, view: &View) -> Option<UserAction> {
        into_action(read_code(&mut self.reader, &view.config, "Enter your guess"))
    }

    fn display_computer_guess(&mut self, round: usize, guess: &Sequence) {
        display_computer_guess(round, guess);
    }

    fn continue_watching(&mut self, _view: &View) -> bool {
        true
    }

    fn display_board(&mut self, view: &View) {
        display_board(view);
    }

    fn display_error(&mut self, error: &GameError) {
        display_error(error);
    }

    fn display_outcome(&mut self, view: &View) {
        display_outcome(view);
    }

    fn read_play_again(&mut self) -> UserAction {
        read_play_again(&mut self.reader)
    }

    fn display_new_game_message(&mut self, config: &GameConfig) {
        display_new_game_message(config);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use std::io::Cursor;

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["mastermind"]).unwrap();
        assert_eq!(cli.game_config(), GameConfig::default());
        assert_eq!(cli.game_mode(), None);
        assert!(!cli.tui);
    }

    #[test]
    fn test_parse_cli_with_options() {
        let cli = Cli::try_parse_from([
            "mastermind", "-l", "5", "-c", "8", "-r", "8", "--mode", "computer", "--seed", "42",
        ])
        .unwrap();
        assert_eq!(cli.game_config(), GameConfig::new(5, 8, 8));
        assert_eq!(cli.game_mode(), Some(Mode::AutomatedGuesser));
        assert_eq!(cli.seed, Some(42));
    }

    #[test]
    fn test_parse_cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["mastermind", "--mode", "robot"]).is_err());
    }

    #[test]
    fn test_is_valid_code() {
        let config = GameConfig::default();
        assert!(is_valid_code("bgop", &config));
        assert!(is_valid_code("BGOP", &config));
        assert!(is_valid_code("rrrr", &config));
        assert!(!is_valid_code("bgo", &config)); // Too short
        assert!(!is_valid_code("bgopr", &config)); // Too long
        assert!(!is_valid_code("bgoc", &config)); // Outside the palette
        assert!(!is_valid_code("bg1p", &config)); // Not a color
        assert!(!is_valid_code("", &config)); // Empty
    }

    #[test]
    fn test_example_code_cycles_palette() {
        assert_eq!(example_code(&GameConfig::default()), "bgop");
        assert_eq!(example_code(&GameConfig::new(5, 2, 12)), "bgbgb");
    }

    #[test]
    fn test_palette_legend() {
        assert_eq!(
            palette_legend(&GameConfig::default()),
            "blue(b) green(g) orange(o) pink(p) red(r) yellow(y)"
        );
    }

    #[test]
    fn test_read_code_valid() {
        let mut reader = Cursor::new("  BGOP \n");
        match read_code(&mut reader, &GameConfig::default(), "Enter your guess") {
            CodeInput::Valid(code) => assert_eq!(code.to_string(), "bgop"),
            _ => panic!("Expected Valid code"),
        }
    }

    #[test]
    fn test_read_code_commands() {
        let config = GameConfig::default();
        let mut reader = Cursor::new("exit\nNEXT\n");
        assert!(matches!(read_code(&mut reader, &config, "Guess"), CodeInput::Exit));
        assert!(matches!(read_code(&mut reader, &config, "Guess"), CodeInput::NewGame));
    }

    #[test]
    fn test_read_code_invalid() {
        let config = GameConfig::default();
        let mut reader = Cursor::new("bgo\nbgoz\n");
        assert!(matches!(read_code(&mut reader, &config, "Guess"), CodeInput::Invalid));
        assert!(matches!(read_code(&mut reader, &config, "Guess"), CodeInput::Invalid));
    }

    #[test]
    fn test_read_code_end_of_input_exits() {
        let mut reader = Cursor::new("");
        assert!(matches!(
            read_code(&mut reader, &GameConfig::default(), "Guess"),
            CodeInput::Exit
        ));
    }

    #[test]
    fn test_read_mode() {
        let mut reader = Cursor::new("Human\ncomputer\nrobot\n");
        assert_eq!(read_mode(&mut reader), Some(ModeChoice::Play(Mode::HumanGuesser)));
        assert_eq!(read_mode(&mut reader), Some(ModeChoice::Play(Mode::AutomatedGuesser)));
        assert_eq!(read_mode(&mut reader), None);
        assert_eq!(read_mode(&mut reader), Some(ModeChoice::Exit));
    }

    #[test]
    fn test_read_play_again() {
        let mut reader = Cursor::new("next\nno\n");
        assert_eq!(read_play_again(&mut reader), UserAction::NewGame);
        assert_eq!(read_play_again(&mut reader), UserAction::Exit);
        assert_eq!(read_play_again(&mut reader), UserAction::Exit);
    }

    #[test]
    fn test_format_board_masks_secret_and_fills_placeholders() {
        let mut game = Game::new(GameConfig::new(4, 6, 3), Mode::HumanGuesser).unwrap();
        game.set_secret(Sequence::parse("bgop").unwrap()).unwrap();
        game.submit_guess(&Sequence::parse("bboo").unwrap()).unwrap();
        let board = format_board(&game.render_view());
        assert_eq!(board, "XXXX\n----\n....\n....\nbboo OO");
    }

    #[test]
    fn test_format_board_reveals_secret_at_end() {
        let mut game = Game::new(GameConfig::new(4, 6, 2), Mode::HumanGuesser).unwrap();
        game.set_secret(Sequence::parse("bgop").unwrap()).unwrap();
        game.submit_guess(&Sequence::parse("gopb").unwrap()).unwrap();
        game.submit_guess(&Sequence::parse("bgop").unwrap()).unwrap();
        let board = format_board(&game.render_view());
        assert_eq!(board, "bgop\n----\nbgop OOOO\ngopb oooo");
    }

    #[test]
    fn test_cli_interface_maps_inputs() {
        let mut ui = CliInterface::new(Cursor::new("rrrr\nxx\n"));
        let config = GameConfig::default();
        assert_eq!(
            ui.read_secret(&config),
            Some(UserAction::Guess(Sequence::parse("rrrr").unwrap()))
        );
        assert_eq!(ui.read_secret(&config), None);
        assert_eq!(ui.read_secret(&config), Some(UserAction::Exit));
    }
}
