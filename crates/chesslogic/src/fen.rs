//! FEN serialization of a [`Position`].

use serde::{Deserialize, Serialize};

use chesslogic_core::Square;

use crate::position::CastlingRights;
use crate::Position;

/// Controls which optional FEN fields reflect tracked state.
///
/// With tracking disabled the field is printed as a static placeholder:
/// `KQkq` for castling and `-` for the en-passant target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct FenOptions {
    #[serde(default = "default_true")]
    pub track_castling: bool,
    #[serde(default = "default_true")]
    pub track_en_passant: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FenOptions {
    fn default() -> Self {
        FenOptions {
            track_castling: true,
            track_en_passant: true,
        }
    }
}

/// Encodes the piece placement field, rank 8 first.
pub fn encode_placement(position: &Position) -> String {
    let mut placement = String::new();
    let mut empty_run = 0;

    for sq in Square::all() {
        match position.piece_at(sq) {
            Some((kind, team)) => {
                if empty_run > 0 {
                    placement.push_str(&empty_run.to_string());
                    empty_run = 0;
                }
                placement.push(kind.to_fen_char(team));
            }
            None => empty_run += 1,
        }
        if sq.is_last_column() {
            if empty_run > 0 {
                placement.push_str(&empty_run.to_string());
                empty_run = 0;
            }
            if sq.row() < 7 {
                placement.push('/');
            }
        }
    }
    placement
}

/// Encodes the full six-field FEN record.
pub fn encode(position: &Position, options: &FenOptions) -> String {
    let castling = if options.track_castling {
        position.castling().to_fen_field()
    } else {
        CastlingRights::PLACEHOLDER.to_string()
    };

    let en_passant = position
        .en_passant_target()
        .filter(|_| options.track_en_passant)
        .map_or_else(|| "-".to_string(), |sq| sq.to_algebraic());

    format!(
        "{} {} {} {} {} {}",
        encode_placement(position),
        position.ally().code(),
        castling,
        en_passant,
        position.halfmove_clock(),
        position.fullmove_number()
    )
}

impl Position {
    /// Converts the position to a FEN string with every field tracked.
    pub fn to_fen(&self) -> String {
        encode(self, &FenOptions::default())
    }
}
