//! Bit-vector chess position engine.
//!
//! This crate provides:
//! - [`BitVector`] - fixed-length bit vectors with boolean algebra and shifts
//! - [`Position`] - the eleven named board maps plus turn and move counters
//! - [`validate_move`] and [`apply_move`] - pseudo-legal move checking and
//!   in-place board mutation
//! - [`ChessEngine`] - a game with FEN history, driven by algebraic squares
//! - [`EngineConfig`] - TOML configuration
//!
//! # Architecture
//!
//! Squares are indexed rank-major from a8 (0) to h1 (63), and bit `i` of
//! every map is square `i`. Move requests are validated against the
//! position without touching it; only validated moves are applied.
//!
//! Check, checkmate, and draw detection are not part of this crate.
//!
//! # Example
//!
//! ```
//! use chesslogic::ChessEngine;
//!
//! let mut engine = ChessEngine::new();
//! assert!(engine.make_move("e2", "e4").unwrap());
//! assert!(!engine.make_move("e2", "e4").unwrap());
//! println!("Position after 1.e4: {}", engine.fen());
//! ```

mod bitvector;
mod config;
mod engine;
mod error;
pub mod fen;
mod legality;
mod mutation;
mod position;

pub use bitvector::{BitVector, BitVectorError};
pub use config::{ConfigError, EngineConfig};
pub use engine::ChessEngine;
pub use error::EngineError;
pub use fen::FenOptions;
pub use legality::{pseudo_legal_targets, slide_targets, step_targets, validate_move, ValidatedMove};
pub use mutation::apply_move;
pub use position::{BoardMap, CastlingRights, Position};

pub use chesslogic_core::{
    FenError, FenFields, File, Motion, PieceKind, Rank, Square, SquareError, Team, STARTING_FEN,
};
