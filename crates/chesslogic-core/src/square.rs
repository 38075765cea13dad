//! Board square representation and edge geometry.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::Team;

/// Error returned for malformed algebraic coordinates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SquareError {
    #[error("invalid square '{0}': must be a lowercase file a-h followed by a rank 1-8")]
    InvalidSquare(String),
}

/// A file (column) on the chess board, from A to H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// Creates a file from its column (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(File::A),
            1 => Some(File::B),
            2 => Some(File::C),
            3 => Some(File::D),
            4 => Some(File::E),
            5 => Some(File::F),
            6 => Some(File::G),
            7 => Some(File::H),
            _ => None,
        }
    }

    /// Creates a file from a lowercase letter 'a'-'h'.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'a' => Some(File::A),
            'b' => Some(File::B),
            'c' => Some(File::C),
            'd' => Some(File::D),
            'e' => Some(File::E),
            'f' => Some(File::F),
            'g' => Some(File::G),
            'h' => Some(File::H),
            _ => None,
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row) on the chess board, from 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    /// Creates a rank from index (0 = rank 1).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Rank::R1),
            1 => Some(Rank::R2),
            2 => Some(Rank::R3),
            3 => Some(Rank::R4),
            4 => Some(Rank::R5),
            5 => Some(Rank::R6),
            6 => Some(Rank::R7),
            7 => Some(Rank::R8),
            _ => None,
        }
    }

    /// Creates a rank from a digit '1'-'8'.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Rank::R1),
            '2' => Some(Rank::R2),
            '3' => Some(Rank::R3),
            '4' => Some(Rank::R4),
            '5' => Some(Rank::R5),
            '6' => Some(Rank::R6),
            '7' => Some(Rank::R7),
            '8' => Some(Rank::R8),
            _ => None,
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A square on the chess board, indexed 0-63.
///
/// Squares are indexed rank-major from White's point of view, top-left first:
/// - a8 = 0, b8 = 1, ..., h8 = 7
/// - a7 = 8, ..., h1 = 63
///
/// The index doubles as the bit position in a board map, counted from the
/// least-significant bit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square((7 - rank.index()) * 8 + file.index())
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Result<Self, SquareError> {
        let mut chars = s.chars();
        let parsed = match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => File::from_char(f).zip(Rank::from_char(r)),
            _ => None,
        };
        parsed
            .map(|(file, rank)| Square::new(file, rank))
            .ok_or_else(|| SquareError::InvalidSquare(s.to_string()))
    }

    /// Iterates over all 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Row from the top of the board (0 = rank 8).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Column from the left of the board (0 = file a).
    #[inline]
    pub const fn column(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    pub const fn file(self) -> File {
        match File::from_index(self.column()) {
            Some(f) => f,
            None => unreachable!(),
        }
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        match Rank::from_index(7 - self.row()) {
            Some(r) => r,
            None => unreachable!(),
        }
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// Returns the square's shade as a team code: White for light squares,
    /// Black for dark ones.
    #[inline]
    pub const fn color(self) -> Team {
        if (self.row() + self.column()) % 2 == 0 {
            Team::White
        } else {
            Team::Black
        }
    }

    /// Returns the single-bit mask for this square.
    #[inline]
    pub const fn bit(self) -> u64 {
        1u64 << self.0
    }

    #[inline]
    pub const fn is_first_column(self) -> bool {
        self.column() == 0
    }

    #[inline]
    pub const fn is_second_column(self) -> bool {
        self.column() == 1
    }

    #[inline]
    pub const fn is_seventh_column(self) -> bool {
        self.column() == 6
    }

    #[inline]
    pub const fn is_last_column(self) -> bool {
        self.column() == 7
    }

    /// Column change produced by an index offset, for the offsets used by
    /// chess pieces (at most two columns sideways).
    pub const fn file_step(delta: i8) -> Option<i8> {
        match delta.rem_euclid(8) {
            0 => Some(0),
            1 => Some(1),
            2 => Some(2),
            6 => Some(-2),
            7 => Some(-1),
            _ => None,
        }
    }

    /// Applies an index offset, returning `None` if the result leaves the
    /// board or wraps around an edge column.
    pub fn offset(self, delta: i8) -> Option<Square> {
        let clears_edge = match Self::file_step(delta)? {
            -2 => !(self.is_first_column() || self.is_second_column()),
            -1 => !self.is_first_column(),
            1 => !self.is_last_column(),
            2 => !(self.is_seventh_column() || self.is_last_column()),
            _ => true,
        };
        if !clears_edge {
            return None;
        }
        let target = i16::from(self.0) + i16::from(delta);
        u8::try_from(target).ok().and_then(Square::from_index)
    }

    pub const A1: Square = Square(56);
    pub const H1: Square = Square(63);
    pub const A8: Square = Square(0);
    pub const H8: Square = Square(7);
    pub const E1: Square = Square(60);
    pub const E8: Square = Square(4);
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
