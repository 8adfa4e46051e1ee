//! Drives whole games against a [`GameInterface`].

use crate::code::Sequence;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{Game, Mode, Phase, View};
use crate::random::RandomSource;
use crate::{debug_log, info_log};

/// What the player asked for at a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(Sequence),
    Exit,
    NewGame,
}

/// Mode prompt answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChoice {
    Play(Mode),
    Exit,
}

/// The I/O side of a session. `read_*` methods return `None` for input that
/// should simply be asked for again.
pub trait GameInterface {
    fn display_intro(&mut self, config: &GameConfig);
    fn read_mode(&mut self) -> Option<ModeChoice>;
    /// Computer-guesser mode: the human picks the code.
    fn read_secret(&mut self, config: &GameConfig) -> Option<UserAction>;
    fn read_guess(&mut self, view: &View) -> Option<UserAction>;
    fn display_computer_guess(&mut self, round: usize, guess: &Sequence);
    /// Computer-guesser mode, before each guess. `false` ends the session.
    fn continue_watching(&mut self, view: &View) -> bool;
    fn display_board(&mut self, view: &View);
    fn display_error(&mut self, error: &GameError);
    fn display_outcome(&mut self, view: &View);
    /// Asked after a game ends; only `NewGame` starts another.
    fn read_play_again(&mut self) -> UserAction;
    fn display_new_game_message(&mut self, config: &GameConfig);
    fn display_exit_message(&mut self);
}

/// Result line from the human's side of the table.
pub fn outcome_message(view: &View) -> &'static str {
    let cracked = matches!(view.phase, Phase::Won { .. });
    if cracked == (view.mode == Mode::HumanGuesser) {
        "You won."
    } else {
        "Computer won."
    }
}

enum RoundResult {
    Continue,
    NewGame,
    Exit,
}

/// Play games until the user leaves. Returns the final phase of every game
/// that reached an end.
pub fn game_loop<I: GameInterface + ?Sized>(
    config: &GameConfig,
    mode: Option<Mode>,
    interface: &mut I,
    source: &mut dyn RandomSource,
) -> Result<Vec<Phase>, GameError> {
    config.validate()?;
    interface.display_intro(config);

    let mut outcomes = Vec::new();
    let mode = match mode {
        Some(mode) => Some(mode),
        None => read_mode(interface),
    };
    let Some(mode) = mode else {
        interface.display_exit_message();
        return Ok(outcomes);
    };
    info_log!("game_loop() - starting session in {:?} mode", mode);

    'games: loop {
        let mut game = Game::new(*config, mode)?;
        if !choose_secret(&mut game, interface, source)? {
            interface.display_exit_message();
            break;
        }
        interface.display_board(&game.render_view());

        while !game.is_terminal() {
            match play_round(&mut game, interface, source)? {
                RoundResult::Continue => {}
                RoundResult::NewGame => {
                    interface.display_new_game_message(config);
                    continue 'games;
                }
                RoundResult::Exit => {
                    interface.display_exit_message();
                    break 'games;
                }
            }
        }

        let view = game.render_view();
        info_log!("game_loop() - game over: {}", view.phase);
        outcomes.push(view.phase);
        interface.display_outcome(&view);

        match interface.read_play_again() {
            UserAction::NewGame => interface.display_new_game_message(config),
            _ => {
                interface.display_exit_message();
                break;
            }
        }
    }
    Ok(outcomes)
}

fn read_mode<I: GameInterface + ?Sized>(interface: &mut I) -> Option<Mode> {
    loop {
        match interface.read_mode() {
            Some(ModeChoice::Play(mode)) => return Some(mode),
            Some(ModeChoice::Exit) => return None,
            None => {}
        }
    }
}

/// Returns `false` if the user quit instead.
fn choose_secret<I: GameInterface + ?Sized>(
    game: &mut Game,
    interface: &mut I,
    source: &mut dyn RandomSource,
) -> Result<bool, GameError> {
    if game.mode() == Mode::HumanGuesser {
        game.generate_secret(source)?;
        return Ok(true);
    }
    loop {
        match interface.read_secret(game.config()) {
            Some(UserAction::Guess(secret)) => match game.set_secret(secret) {
                Ok(()) => return Ok(true),
                Err(e) if e.is_user_facing() => interface.display_error(&e),
                Err(e) => return Err(e),
            },
            Some(UserAction::Exit) => return Ok(false),
            Some(UserAction::NewGame) | None => {}
        }
    }
}

fn play_round<I: GameInterface + ?Sized>(
    game: &mut Game,
    interface: &mut I,
    source: &mut dyn RandomSource,
) -> Result<RoundResult, GameError> {
    let guess = match game.mode() {
        Mode::AutomatedGuesser => {
            if !interface.continue_watching(&game.render_view()) {
                return Ok(RoundResult::Exit);
            }
            let guess = game.auto_guess(source)?;
            interface.display_computer_guess(game.ledger().len(), &guess);
            guess
        }
        Mode::HumanGuesser => match interface.read_guess(&game.render_view()) {
            Some(UserAction::Guess(guess)) => guess,
            Some(UserAction::NewGame) => return Ok(RoundResult::NewGame),
            Some(UserAction::Exit) => return Ok(RoundResult::Exit),
            None => return Ok(RoundResult::Continue),
        },
    };

    match game.submit_guess(&guess) {
        Ok(feedback) => {
            debug_log!("play_round() - {} scored {:?}", guess, feedback);
            interface.display_board(&game.render_view());
            Ok(RoundResult::Continue)
        }
        Err(e) if e.is_user_facing() => {
            interface.display_error(&e);
            Ok(RoundResult::Continue)
        }
        Err(e) => Err(e),
    }
}
