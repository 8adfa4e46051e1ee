use crate::code::{Color, Sequence};
use std::fmt;

/// Key pegs for one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Feedback {
    /// Right color in the right position.
    pub exact: usize,
    /// Right color in the wrong position, after exact matches are removed.
    pub color_only: usize,
}

impl Feedback {
    pub fn new(exact: usize, color_only: usize) -> Self {
        Self { exact, color_only }
    }

    pub fn is_solved(&self, sequence_length: usize) -> bool {
        self.exact == sequence_length
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            "O".repeat(self.exact),
            "o".repeat(self.color_only)
        )
    }
}

/// Feedback plus the positions that earned it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Marking {
    pub feedback: Feedback,
    /// Guess positions holding the secret's color.
    pub exact_positions: Vec<usize>,
    /// Guess positions (with their color) credited as color-only matches.
    pub misplaced: Vec<(usize, Color)>,
}

/// Score `guess` against `secret`. Both must have the same length.
pub fn score(secret: &Sequence, guess: &Sequence) -> Feedback {
    mark(secret, guess).feedback
}

/// Two passes: exact positions first, then a multiset intersection of the
/// leftovers so a secret peg is never credited twice.
pub fn mark(secret: &Sequence, guess: &Sequence) -> Marking {
    let mut marking = Marking::default();
    let mut remaining = [0usize; Color::ALL.len()];

    // First pass: exact
    for (i, (s, g)) in secret.colors().iter().zip(guess.colors()).enumerate() {
        if s == g {
            marking.exact_positions.push(i);
        } else {
            remaining[s.index()] += 1;
        }
    }

    // Second pass: consume unmatched secret pegs color by color
    for (i, (s, g)) in secret.colors().iter().zip(guess.colors()).enumerate() {
        if s == g {
            continue;
        }
        let slot = &mut remaining[g.index()];
        if *slot > 0 {
            *slot -= 1;
            marking.misplaced.push((i, *g));
        }
    }

    marking.feedback = Feedback::new(marking.exact_positions.len(), marking.misplaced.len());
    marking
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(s: &str) -> Sequence {
        Sequence::parse(s).unwrap()
    }

    #[test]
    fn test_self_match_is_all_exact() {
        for s in ["bgop", "rrrr", "ybyb", "o"] {
            let code = seq(s);
            assert_eq!(score(&code, &code), Feedback::new(code.len(), 0));
        }
    }

    #[test]
    fn test_no_common_colors() {
        assert_eq!(score(&seq("bbgg"), &seq("rryy")), Feedback::new(0, 0));
    }

    #[test]
    fn test_derangement_is_all_color_only() {
        assert_eq!(score(&seq("bgop"), &seq("gopb")), Feedback::new(0, 4));
        assert_eq!(score(&seq("bgop"), &seq("pobg")), Feedback::new(0, 4));
    }

    #[test]
    fn test_swapped_pairs() {
        assert_eq!(score(&seq("rrgg"), &seq("ggrr")), Feedback::new(0, 4));
    }

    #[test]
    fn test_single_secret_peg_matches_once() {
        // Only one r exists in the secret
        assert_eq!(score(&seq("rrrr"), &seq("rggg")), Feedback::new(1, 0));
        assert_eq!(score(&seq("rgbb"), &seq("yrrr")), Feedback::new(0, 1));
    }

    #[test]
    fn test_duplicate_guess_against_single_secret_color() {
        // Second o in the guess has nothing left to match
        assert_eq!(score(&seq("bgop"), &seq("bboo")), Feedback::new(2, 0));
    }

    #[test]
    fn test_exact_consumes_before_color_pass() {
        // Position 0 is exact; the remaining b in the guess must not reuse it
        assert_eq!(score(&seq("bgyy"), &seq("bbgg")), Feedback::new(1, 1));
    }

    #[test]
    fn test_matches_multiset_intersection() {
        let codes = ["bgop", "bbgg", "rrrr", "rgrg", "pybo", "yyyb", "oopp"];
        for secret in codes.iter().map(|s| seq(s)) {
            for guess in codes.iter().map(|s| seq(s)) {
                let fb = score(&secret, &guess);
                let total: usize = Color::ALL
                    .iter()
                    .map(|c| {
                        let in_secret = secret.colors().iter().filter(|x| *x == c).count();
                        let in_guess = guess.colors().iter().filter(|x| *x == c).count();
                        in_secret.min(in_guess)
                    })
                    .sum();
                assert_eq!(fb.exact + fb.color_only, total, "{secret} vs {guess}");
                assert!(fb.exact + fb.color_only <= secret.len());
            }
        }
    }

    #[test]
    fn test_mark_reports_positions() {
        let marking = mark(&seq("bgop"), &seq("bopy"));
        assert_eq!(marking.exact_positions, vec![0]);
        assert_eq!(marking.misplaced, vec![(1, Color::Orange), (2, Color::Pink)]);
        assert_eq!(marking.feedback, Feedback::new(1, 2));
    }

    #[test]
    fn test_feedback_display_uses_key_pegs() {
        assert_eq!(Feedback::new(2, 1).to_string(), "OOo");
        assert_eq!(Feedback::new(0, 0).to_string(), "");
    }

    #[test]
    fn test_is_solved() {
        assert!(Feedback::new(4, 0).is_solved(4));
        assert!(!Feedback::new(3, 1).is_solved(4));
    }
}
