//! Core types for the chesslogic engine.
//!
//! This crate provides the leaf types shared by the engine:
//! - [`Team`] for the two sides and their FEN codes
//! - [`PieceKind`] and [`Motion`] for piece behaviour and step offsets
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`FenFields`] for parsing and validating FEN text

mod fen;
mod piece;
mod square;
mod team;

pub use fen::{FenError, FenFields, STARTING_FEN};
pub use piece::{Motion, PieceKind};
pub use square::{File, Rank, Square, SquareError};
pub use team::Team;
