//! Side-to-move representation.

use std::fmt;

/// The two sides of a game.
///
/// The side to move is the "ally" team; its opponent is the "enemy" team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Team {
    White = 0,
    Black = 1,
}

impl Team {
    /// Both teams, White first.
    pub const ALL: [Team; 2] = [Team::White, Team::Black];

    /// Returns the opposing team.
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the single-letter FEN code ('w' or 'b').
    #[inline]
    pub const fn code(self) -> char {
        match self {
            Team::White => 'w',
            Team::Black => 'b',
        }
    }

    /// Parses a FEN team code.
    #[inline]
    pub const fn from_code(c: char) -> Option<Self> {
        match c {
            'w' => Some(Team::White),
            'b' => Some(Team::Black),
            _ => None,
        }
    }

    /// Index delta of a single forward pawn step.
    ///
    /// Index 0 is a8, so White advances toward lower indices.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Team::White => -8,
            Team::Black => 8,
        }
    }

    /// Row (0 = rank 8) on which this team's pawns start.
    #[inline]
    pub const fn pawn_home_row(self) -> u8 {
        match self {
            Team::White => 6,
            Team::Black => 1,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::White => write!(f, "White"),
            Team::Black => write!(f, "Black"),
        }
    }
}
