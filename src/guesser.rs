//! Computer code breaker.
//!
//! The guesser only looks at the round immediately before the one it is
//! guessing for. It keeps exact pegs in place, moves color-only pegs to a fresh
//! position, and fills the rest at random. Earlier rounds are ignored, so it
//! may retry a placement it already saw fail and is not guaranteed to win.

use crate::code::{Color, Palette, Sequence};
use crate::error::GameError;
use crate::ledger::Ledger;
use crate::random::RandomSource;
use crate::debug_log;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoGuesser {
    palette: Palette,
    sequence_length: usize,
}

impl AutoGuesser {
    pub fn new(palette: Palette, sequence_length: usize) -> Self {
        Self {
            palette,
            sequence_length,
        }
    }

    /// Uniform random code; nothing is known yet.
    pub fn first_guess(&self, source: &mut dyn RandomSource) -> Sequence {
        (0..self.sequence_length)
            .map(|_| source.next_color(&self.palette))
            .collect()
    }

    /// Guess for `round` using the feedback recorded at `round - 1`.
    pub fn next_guess(
        &self,
        round: usize,
        ledger: &Ledger,
        source: &mut dyn RandomSource,
    ) -> Result<Sequence, GameError> {
        let invalid = || GameError::InvalidRound {
            round,
            max_rounds: ledger.max_rounds(),
        };
        if round == 0 {
            return Err(invalid());
        }
        let previous = ledger.get(round - 1).ok_or_else(invalid)?;
        let mut slots: Vec<Option<Color>> = vec![None; self.sequence_length];

        for &i in &previous.marking.exact_positions {
            if let (Some(slot), Some(color)) = (slots.get_mut(i), previous.guess.get(i)) {
                *slot = Some(color);
            }
        }

        for &(tried_at, color) in &previous.marking.misplaced {
            let free: Vec<usize> = (0..slots.len()).filter(|&i| slots[i].is_none()).collect();
            let fresh: Vec<usize> = free.iter().copied().filter(|&i| i != tried_at).collect();
            let candidates = if fresh.is_empty() { free } else { fresh };
            if candidates.is_empty() {
                break;
            }
            let position = candidates[source.next_below(candidates.len())];
            slots[position] = Some(color);
        }

        debug_log!(
            "next_guess() - round {}: {} fixed, {} moved",
            round,
            previous.marking.exact_positions.len(),
            previous.marking.misplaced.len()
        );

        Ok(slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| source.next_color(&self.palette)))
            .collect())
    }
}
