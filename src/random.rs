use crate::code::{Color, Palette};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of randomness for secrets and computer guesses.
///
/// Implementors only supply `next_below`; tests swap in a scripted source to
/// get exact sequences.
pub trait RandomSource {
    /// Uniform value in `0..bound`. `bound` is never zero.
    fn next_below(&mut self, bound: usize) -> usize;

    fn next_color(&mut self, palette: &Palette) -> Color {
        let index = self.next_below(palette.size());
        palette.colors()[index]
    }
}

/// `StdRng`-backed source, seeded from the OS or from a fixed seed.
pub struct RngSource {
    rng: StdRng,
}

impl RngSource {
    pub fn new() -> Self {
        RngSource {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RngSource {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RngSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for RngSource {
    fn next_below(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}
