//! Piece kinds and their move geometry.
//!
//! Offsets are index deltas on the rank-major board where index 0 is a8 and
//! index 63 is h1. A delta of 8 is one rank toward White's side of the board.

use crate::Team;

/// How a piece kind moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    /// A single jump along each offset (knight, king).
    Step,
    /// Repeated steps along each offset until blocked (bishop, rook, queen).
    Slide,
    /// Team-relative pushes and diagonal captures.
    Pawn,
}

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

const KNIGHT_OFFSETS: [i8; 8] = [6, 10, 15, 17, -6, -10, -15, -17];
const BISHOP_OFFSETS: [i8; 4] = [7, 9, -7, -9];
const ROOK_OFFSETS: [i8; 4] = [1, 8, -1, -8];
const ROYAL_OFFSETS: [i8; 8] = [1, 7, 8, 9, -1, -7, -8, -9];

impl PieceKind {
    /// All piece kinds in lookup order.
    ///
    /// When resolving the kind on a square the first map that contains it
    /// wins, so this order is also the lookup priority.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// One-square pawn advance, as seen by Black.
    pub const PAWN_PUSH: [i8; 1] = [8];
    /// Pawn advances available from the starting square, as seen by Black.
    pub const PAWN_FIRST_MOVE: [i8; 2] = [8, 16];
    /// Diagonal pawn captures, as seen by Black.
    pub const PAWN_ATTACK: [i8; 2] = [7, 9];
    /// Squares beside a pawn probed for en passant.
    pub const EN_PASSANT: [i8; 2] = [-1, 1];
    /// Index span of a two-square pawn advance.
    pub const TWO_SQUARE_PAWN_MOVE: u8 = 16;

    /// Returns the index of this kind (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the movement class used for legality dispatch.
    #[inline]
    pub const fn motion(self) -> Motion {
        match self {
            PieceKind::Pawn => Motion::Pawn,
            PieceKind::Knight | PieceKind::King => Motion::Step,
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => Motion::Slide,
        }
    }

    /// Returns the full signed offset set for step and slide pieces.
    ///
    /// Pawns move relative to their team; see [`PieceKind::pawn_offsets`].
    pub const fn offsets(self) -> &'static [i8] {
        match self {
            PieceKind::Pawn => &Self::PAWN_PUSH,
            PieceKind::Knight => &KNIGHT_OFFSETS,
            PieceKind::Bishop => &BISHOP_OFFSETS,
            PieceKind::Rook => &ROOK_OFFSETS,
            PieceKind::Queen | PieceKind::King => &ROYAL_OFFSETS,
        }
    }

    /// Orients a Black-relative pawn offset table for `team`.
    pub fn pawn_offsets(base: &[i8], team: Team) -> Vec<i8> {
        match team {
            Team::Black => base.to_vec(),
            Team::White => base.iter().map(|offset| -offset).collect(),
        }
    }

    /// Returns the FEN letter for this kind, uppercase for White.
    pub const fn to_fen_char(self, team: Team) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match team {
            Team::White => c.to_ascii_uppercase(),
            Team::Black => c,
        }
    }

    /// Parses a FEN letter into a kind and team.
    pub const fn from_fen_char(c: char) -> Option<(PieceKind, Team)> {
        let team = if c.is_ascii_uppercase() {
            Team::White
        } else {
            Team::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, team))
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}
