//! Colors, palettes and the sequences built from them.

use crate::error::GameError;
use std::fmt;

/// One peg color. A palette of size `n` uses the first `n` variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Blue,
    Green,
    Orange,
    Pink,
    Red,
    Yellow,
    Cyan,
    White,
    Magenta,
    Violet,
}

impl Color {
    pub const ALL: [Color; 10] = [
        Color::Blue,
        Color::Green,
        Color::Orange,
        Color::Pink,
        Color::Red,
        Color::Yellow,
        Color::Cyan,
        Color::White,
        Color::Magenta,
        Color::Violet,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Blue => 'b',
            Self::Green => 'g',
            Self::Orange => 'o',
            Self::Pink => 'p',
            Self::Red => 'r',
            Self::Yellow => 'y',
            Self::Cyan => 'c',
            Self::White => 'w',
            Self::Magenta => 'm',
            Self::Violet => 'v',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Pink => "pink",
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Magenta => "magenta",
            Self::Violet => "violet",
        }
    }

    /// Case-insensitive lookup by one-letter symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let lower = symbol.to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| c.symbol() == lower)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The colors in play for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    size: usize,
}

impl Palette {
    /// Sizes beyond the full color set are clamped.
    pub fn new(size: usize) -> Self {
        Self {
            size: size.min(Color::ALL.len()),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn colors(&self) -> &'static [Color] {
        &Color::ALL[..self.size]
    }

    pub fn contains(&self, color: Color) -> bool {
        color.index() < self.size
    }
}

/// An ordered run of colors, used for the secret and for every guess.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence(Vec<Color>);

impl Sequence {
    pub fn new(colors: Vec<Color>) -> Self {
        Self(colors)
    }

    /// Parses one symbol per character, ignoring case and surrounding
    /// whitespace. Length and palette membership are checked by the game.
    pub fn parse(input: &str) -> Result<Self, GameError> {
        input
            .trim()
            .chars()
            .map(|c| Color::from_symbol(c).ok_or(GameError::UnknownColor { symbol: c }))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    pub fn get(&self, position: usize) -> Option<Color> {
        self.0.get(position).copied()
    }

    /// First color of the sequence that falls outside `palette`.
    pub fn first_outside(&self, palette: &Palette) -> Option<Color> {
        self.0.iter().copied().find(|c| !palette.contains(*c))
    }
}

impl From<Vec<Color>> for Sequence {
    fn from(colors: Vec<Color>) -> Self {
        Self(colors)
    }
}

impl FromIterator<Color> for Sequence {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in &self.0 {
            write!(f, "{color}")?;
        }
        Ok(())
    }
}
