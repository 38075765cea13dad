//! Engine error type.

use chesslogic_core::{FenError, SquareError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by [`crate::ChessEngine`].
///
/// An illegal move is not an error: `make_move` reports it as `Ok(false)`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    InvalidSquare(#[from] SquareError),

    #[error(transparent)]
    InvalidFen(#[from] FenError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
