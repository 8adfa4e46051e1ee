use crate::code::{Color, Palette};
use crate::error::ConfigError;

pub const DEFAULT_SEQUENCE_LENGTH: usize = 4;
pub const DEFAULT_PALETTE_SIZE: usize = 6;
pub const DEFAULT_MAX_ROUNDS: usize = 12;
pub const MAX_SEQUENCE_LENGTH: usize = 10;
pub const MAX_ROUNDS: usize = 100;

/// Structural parameters of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub sequence_length: usize,
    pub palette_size: usize,
    pub max_rounds: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            sequence_length: DEFAULT_SEQUENCE_LENGTH,
            palette_size: DEFAULT_PALETTE_SIZE,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl GameConfig {
    pub fn new(sequence_length: usize, palette_size: usize, max_rounds: usize) -> Self {
        GameConfig {
            sequence_length,
            palette_size,
            max_rounds,
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.palette_size)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sequence_length == 0 || self.sequence_length > MAX_SEQUENCE_LENGTH {
            return Err(ConfigError::Validation(format!(
                "sequence_length must be in [1, {MAX_SEQUENCE_LENGTH}]"
            )));
        }
        if self.palette_size == 0 || self.palette_size > Color::ALL.len() {
            return Err(ConfigError::Validation(format!(
                "palette_size must be in [1, {}]",
                Color::ALL.len()
            )));
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::Validation(
                "max_rounds must be >= 1".into(),
            ));
        }
        if self.max_rounds > MAX_ROUNDS {
            return Err(ConfigError::Validation(format!(
                "max_rounds must be <= {MAX_ROUNDS}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config, GameConfig::new(4, 6, 12));
    }

    #[test]
    fn test_validation_rejects_zero_length() {
        let config = GameConfig::new(0, 6, 12);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_long_sequences() {
        let config = GameConfig::new(MAX_SEQUENCE_LENGTH + 1, 6, 12);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_palette_out_of_range() {
        assert!(GameConfig::new(4, 0, 12).validate().is_err());
        assert!(GameConfig::new(4, 11, 12).validate().is_err());
        assert!(GameConfig::new(4, 10, 12).validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_rounds() {
        let err = GameConfig::new(4, 6, 0).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "config validation error: max_rounds must be >= 1"
        );
    }

    #[test]
    fn test_validation_rejects_huge_round_budgets() {
        assert!(GameConfig::new(4, 6, MAX_ROUNDS).validate().is_ok());
        let err = GameConfig::new(4, 6, MAX_ROUNDS + 1).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "config validation error: max_rounds must be <= 100"
        );
        assert!(GameConfig::new(4, 6, usize::MAX).validate().is_err());
    }

    #[test]
    fn test_short_round_budgets_are_valid() {
        for rounds in [4, 8, 12] {
            assert!(GameConfig::new(4, 6, rounds).validate().is_ok());
        }
    }
}
