//! FEN (Forsyth-Edwards Notation) field parsing and validation.

use thiserror::Error;

use crate::{PieceKind, Rank, Square, Team};

/// The standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPlacement(String),

    #[error("invalid side to move: expected 'w' or 'b', got '{0}'")]
    InvalidSideToMove(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastling(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassant(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// The six fields of a FEN record, validated and typed.
///
/// Placement is indexed like [`Square`]: entry 0 is a8, entry 63 is h1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenFields {
    pub placement: [Option<(PieceKind, Team)>; 64],
    pub side_to_move: Team,
    /// Castling letters in `KQkq` order, or empty when none remain.
    pub castling: String,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl FenFields {
    /// Parses and validates a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::InvalidFieldCount(fields.len()));
        }

        let placement = parse_placement(fields[0])?;

        let mut side = fields[1].chars();
        let side_to_move = match (side.next(), side.next()) {
            (Some(code), None) => Team::from_code(code),
            _ => None,
        }
        .ok_or_else(|| FenError::InvalidSideToMove(fields[1].to_string()))?;

        let castling = parse_castling(fields[2])?;
        let en_passant = parse_en_passant(fields[3])?;

        let halfmove_clock = fields[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(fields[4].to_string()))?;
        let fullmove_number = fields[5]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber(fields[5].to_string()))?;

        Ok(FenFields {
            placement,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }
}

fn parse_placement(field: &str) -> Result<[Option<(PieceKind, Team)>; 64], FenError> {
    let rows: Vec<&str> = field.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::InvalidPlacement(format!(
            "expected 8 ranks, got {}",
            rows.len()
        )));
    }

    let mut placement = [None; 64];
    for (row, text) in rows.iter().enumerate() {
        let rank = 8 - row;
        let mut column = 0usize;
        for c in text.chars() {
            if let Some(run) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                column += run as usize;
            } else if let Some(piece) = PieceKind::from_fen_char(c) {
                if column < 8 {
                    placement[row * 8 + column] = Some(piece);
                }
                column += 1;
            } else {
                return Err(FenError::InvalidPlacement(format!(
                    "invalid character '{}' in rank {}",
                    c, rank
                )));
            }
        }
        if column != 8 {
            return Err(FenError::InvalidPlacement(format!(
                "rank {} has {} squares, expected 8",
                rank, column
            )));
        }
    }
    Ok(placement)
}

fn parse_castling(field: &str) -> Result<String, FenError> {
    if field == "-" {
        return Ok(String::new());
    }
    let mut seen = String::new();
    for c in field.chars() {
        if !"KQkq".contains(c) || seen.contains(c) {
            return Err(FenError::InvalidCastling(format!(
                "unexpected character '{}' in '{}'",
                c, field
            )));
        }
        seen.push(c);
    }
    Ok("KQkq".chars().filter(|c| seen.contains(*c)).collect())
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    let square = Square::from_algebraic(field)
        .map_err(|_| FenError::InvalidEnPassant(field.to_string()))?;
    match square.rank() {
        Rank::R3 | Rank::R6 => Ok(Some(square)),
        _ => Err(FenError::InvalidEnPassant(field.to_string())),
    }
}
