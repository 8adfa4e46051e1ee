/// Errors raised when validating a [`GameConfig`](crate::config::GameConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors surfaced by the game core.
///
/// `WrongLength` and `UnknownColor` come from user input and are worth a
/// re-prompt; the rest indicate a caller driving the game out of order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("expected {expected} colors, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("unknown color '{symbol}'")]
    UnknownColor { symbol: char },

    #[error("round {round} is out of sequence (ledger holds {max_rounds} rounds)")]
    InvalidRound { round: usize, max_rounds: usize },

    #[error("the game is already over")]
    GameAlreadyTerminal,

    #[error("no secret has been chosen yet")]
    SecretNotSet,

    #[error("the secret has already been chosen")]
    SecretAlreadySet,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl GameError {
    /// Whether an adapter should show the error and ask again.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::WrongLength { .. } | Self::UnknownColor { .. })
    }
}
