// Library interface for mastermind
// This allows integration tests to access internal modules

pub mod cli;
pub mod code;
pub mod config;
pub mod error;
pub mod game;
pub mod guesser;
pub mod ledger;
pub mod logging;
pub mod random;
pub mod scorer;
pub mod session;
pub mod tui;

// Re-export commonly used items for easier testing
pub use code::{Color, Palette, Sequence};
pub use config::GameConfig;
pub use error::{ConfigError, GameError};
pub use game::{Game, Mode, Phase, View};
pub use random::{RandomSource, RngSource};
pub use scorer::{Feedback, mark, score};
pub use session::game_loop;
