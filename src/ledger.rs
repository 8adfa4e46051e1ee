use crate::code::Sequence;
use crate::error::GameError;
use crate::scorer::{Feedback, Marking};

/// One completed round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRecord {
    pub round: usize,
    pub guess: Sequence,
    pub marking: Marking,
}

impl RoundRecord {
    pub fn feedback(&self) -> Feedback {
        self.marking.feedback
    }
}

/// Fixed-capacity, append-only log of rounds. Slots start empty and are
/// written once, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    slots: Vec<Option<RoundRecord>>,
    sequence_length: usize,
}

impl Ledger {
    pub fn new(max_rounds: usize, sequence_length: usize) -> Self {
        Self {
            slots: vec![None; max_rounds],
            sequence_length,
        }
    }

    pub fn max_rounds(&self) -> usize {
        self.slots.len()
    }

    /// Number of rounds recorded so far.
    pub fn len(&self) -> usize {
        self.slots.iter().take_while(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record `guess` at `round`. Fails if the round is out of bounds, already
    /// written, or skips an earlier empty slot.
    pub fn insert(&mut self, round: usize, guess: Sequence, marking: Marking) -> Result<(), GameError> {
        let invalid = GameError::InvalidRound {
            round,
            max_rounds: self.max_rounds(),
        };
        let out_of_order = round > 0 && self.slots.get(round - 1).is_none_or(Option::is_none);
        let Some(slot) = self.slots.get_mut(round) else {
            return Err(invalid);
        };
        if slot.is_some() || out_of_order {
            return Err(invalid);
        }
        *slot = Some(RoundRecord {
            round,
            guess,
            marking,
        });
        Ok(())
    }

    pub fn get(&self, round: usize) -> Option<&RoundRecord> {
        self.slots.get(round).and_then(Option::as_ref)
    }

    /// Whether the guess recorded at `round` cracked the code.
    pub fn is_won(&self, round: usize) -> bool {
        self.get(round)
            .is_some_and(|r| r.feedback().is_solved(self.sequence_length))
    }

    pub fn is_exhausted(&self, round: usize) -> bool {
        round == self.max_rounds()
    }

    /// Completed rounds, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &RoundRecord> {
        self.slots.iter().map_while(Option::as_ref)
    }
}
