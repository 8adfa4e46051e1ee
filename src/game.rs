//! Game state machine: `AwaitingSecret -> Playing -> {Won, Lost}`.

use crate::code::{Palette, Sequence};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::guesser::AutoGuesser;
use crate::ledger::Ledger;
use crate::random::RandomSource;
use crate::scorer::{Feedback, mark};
use crate::{debug_log, info_log};
use std::fmt;

/// Who is breaking the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The human guesses a code picked at random.
    HumanGuesser,
    /// The human picks the code and the computer guesses.
    AutomatedGuesser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingSecret,
    /// Waiting for the guess of `round` (zero-based).
    Playing { round: usize },
    /// Cracked on `round`.
    Won { round: usize },
    Lost,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won { .. } | Self::Lost)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingSecret => write!(f, "awaiting secret"),
            Self::Playing { round } => write!(f, "round {}", round + 1),
            Self::Won { round } => write!(f, "won in round {}", round + 1),
            Self::Lost => write!(f, "lost"),
        }
    }
}

/// One completed round as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundView {
    pub guess: Sequence,
    pub feedback: Feedback,
}

/// Read-only snapshot of a game for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub config: GameConfig,
    pub mode: Mode,
    pub phase: Phase,
    pub rounds: Vec<RoundView>,
    /// Only revealed once the game is over.
    pub secret: Option<Sequence>,
}

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    mode: Mode,
    secret: Option<Sequence>,
    ledger: Ledger,
    phase: Phase,
}

impl Game {
    pub fn new(config: GameConfig, mode: Mode) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Game {
            config,
            mode,
            secret: None,
            ledger: Ledger::new(config.max_rounds, config.sequence_length),
            phase: Phase::AwaitingSecret,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The secret, once the game is over.
    pub fn revealed_secret(&self) -> Option<&Sequence> {
        self.secret.as_ref().filter(|_| self.is_terminal())
    }

    fn palette(&self) -> Palette {
        self.config.palette()
    }

    fn validate_sequence(&self, sequence: &Sequence) -> Result<(), GameError> {
        if sequence.len() != self.config.sequence_length {
            return Err(GameError::WrongLength {
                expected: self.config.sequence_length,
                actual: sequence.len(),
            });
        }
        if let Some(color) = sequence.first_outside(&self.palette()) {
            return Err(GameError::UnknownColor {
                symbol: color.symbol(),
            });
        }
        Ok(())
    }

    /// Fix the secret and move to round 0.
    pub fn set_secret(&mut self, secret: Sequence) -> Result<(), GameError> {
        if self.phase != Phase::AwaitingSecret {
            return Err(GameError::SecretAlreadySet);
        }
        self.validate_sequence(&secret)?;
        self.secret = Some(secret);
        self.phase = Phase::Playing { round: 0 };
        info_log!("Game::set_secret() - secret fixed, round 0 begins");
        Ok(())
    }

    /// Draw a uniform secret from `source`.
    pub fn generate_secret(&mut self, source: &mut dyn RandomSource) -> Result<(), GameError> {
        let palette = self.palette();
        let secret = (0..self.config.sequence_length)
            .map(|_| source.next_color(&palette))
            .collect();
        self.set_secret(secret)
    }

    /// Score `guess`, record it, and advance the phase. On error nothing
    /// changes.
    pub fn submit_guess(&mut self, guess: &Sequence) -> Result<Feedback, GameError> {
        let round = match self.phase {
            Phase::AwaitingSecret => return Err(GameError::SecretNotSet),
            Phase::Won { .. } | Phase::Lost => return Err(GameError::GameAlreadyTerminal),
            Phase::Playing { round } => round,
        };
        self.validate_sequence(guess)?;
        let secret = self.secret.as_ref().ok_or(GameError::SecretNotSet)?;

        let marking = mark(secret, guess);
        let feedback = marking.feedback;
        self.ledger.insert(round, guess.clone(), marking)?;

        // Win is checked first so the last round can still be won
        self.phase = if self.ledger.is_won(round) {
            Phase::Won { round }
        } else if self.ledger.is_exhausted(round + 1) {
            Phase::Lost
        } else {
            Phase::Playing { round: round + 1 }
        };
        debug_log!(
            "Game::submit_guess() - round {}: {} -> {} ({})",
            round,
            guess,
            feedback,
            self.phase
        );
        Ok(feedback)
    }

    /// The computer's guess for the current round.
    pub fn auto_guess(&self, source: &mut dyn RandomSource) -> Result<Sequence, GameError> {
        let round = match self.phase {
            Phase::AwaitingSecret => return Err(GameError::SecretNotSet),
            Phase::Won { .. } | Phase::Lost => return Err(GameError::GameAlreadyTerminal),
            Phase::Playing { round } => round,
        };
        let guesser = AutoGuesser::new(self.palette(), self.config.sequence_length);
        if round == 0 {
            Ok(guesser.first_guess(source))
        } else {
            guesser.next_guess(round, &self.ledger, source)
        }
    }

    /// Completed rounds in order plus the current phase.
    pub fn render_view(&self) -> View {
        View {
            config: self.config,
            mode: self.mode,
            phase: self.phase,
            rounds: self
                .ledger
                .records()
                .map(|r| RoundView {
                    guess: r.guess.clone(),
                    feedback: r.feedback(),
                })
                .collect(),
            secret: self.revealed_secret().cloned(),
        }
    }
}
