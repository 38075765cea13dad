//! Game management with FEN history.
//!
//! [`ChessEngine`] owns a [`Position`] and the list of FEN snapshots taken
//! after every applied move. It is the string-facing entry point: squares
//! are named algebraically and malformed names are reported as errors.

use chesslogic_core::{PieceKind, Square, Team};
use tracing::{debug, info, trace};

use crate::config::EngineConfig;
use crate::fen::encode;
use crate::legality::{pseudo_legal_targets, validate_move};
use crate::mutation::apply_move;
use crate::{EngineError, Position};

/// A chess game: the current position plus its FEN history.
///
/// All methods take `&self` or `&mut self`; sharing an engine between
/// threads requires an external lock around the whole value.
#[derive(Debug, Clone)]
pub struct ChessEngine {
    position: Position,
    /// FEN after each applied move, seeded with the starting FEN.
    history: Vec<String>,
    /// Position before each applied move. FEN snapshots may carry
    /// placeholder fields, so undo restores from here.
    undo_stack: Vec<Position>,
    /// Position restored by `reset_board`.
    start_pos: Position,
    config: EngineConfig,
}

impl Default for ChessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessEngine {
    /// Creates an engine at the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Position::startpos(), EngineConfig::default())
    }

    /// Creates an engine from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidFen`] if `start_fen` is set and invalid.
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        let start = match &config.start_fen {
            Some(fen) => Position::from_fen(fen)?,
            None => Position::startpos(),
        };
        Ok(Self::from_position(start, config))
    }

    /// Creates an engine from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        Self::with_config(EngineConfig {
            start_fen: Some(fen.to_string()),
            ..EngineConfig::default()
        })
    }

    fn from_position(position: Position, config: EngineConfig) -> Self {
        let mut engine = ChessEngine {
            position: position.clone(),
            history: Vec::new(),
            undo_stack: Vec::new(),
            start_pos: position,
            config,
        };
        engine.history.push(engine.fen());
        engine
    }

    /// Returns the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Moves the piece on `from` to `to` if the move is legal.
    ///
    /// Returns `Ok(false)` and leaves the game untouched when the move is
    /// illegal.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSquare`] if either name is malformed.
    pub fn make_move(&mut self, from: &str, to: &str) -> Result<bool, EngineError> {
        let from = Square::from_algebraic(from)?;
        let to = Square::from_algebraic(to)?;
        Ok(self.make_move_squares(from, to))
    }

    /// Square-typed form of [`ChessEngine::make_move`].
    pub fn make_move_squares(&mut self, from: Square, to: Square) -> bool {
        let Some(mv) = validate_move(&self.position, from, to) else {
            trace!(%from, %to, side = %self.position.ally(), "move rejected");
            return false;
        };

        self.undo_stack.push(self.position.clone());
        apply_move(&mut self.position, mv);
        let fen = self.fen();
        debug!(
            %from,
            %to,
            piece = %mv.kind,
            en_passant = mv.en_passant.is_some(),
            fen = %fen,
            "move applied"
        );
        self.history.push(fen);
        true
    }

    /// Returns the current position in FEN.
    pub fn fen(&self) -> String {
        encode(&self.position, &self.config.fen)
    }

    /// Returns every FEN snapshot, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Returns the side to move.
    pub fn whose_turn(&self) -> Team {
        self.position.ally()
    }

    /// Returns the shade of a square: [`Team::White`] for light squares,
    /// [`Team::Black`] for dark ones.
    pub fn square_color(&self, square: &str) -> Result<Team, EngineError> {
        Ok(Square::from_algebraic(square)?.color())
    }

    /// Returns the piece on a square, if any.
    pub fn piece_on_square(&self, square: &str) -> Result<Option<(PieceKind, Team)>, EngineError> {
        Ok(self.position.piece_at(Square::from_algebraic(square)?))
    }

    /// Returns every destination the piece on `square` may move to.
    ///
    /// The list is empty for empty squares and for pieces of the side not
    /// to move. Moves that leave the king in check are included.
    pub fn pseudo_legal_moves(&self, square: &str) -> Result<Vec<Square>, EngineError> {
        Ok(pseudo_legal_targets(
            &self.position,
            Square::from_algebraic(square)?,
        ))
    }

    /// Removes every piece and resets counters and history.
    pub fn clear_board(&mut self) {
        self.position = Position::empty();
        self.reset_history();
        info!("board cleared");
    }

    /// Restores the starting position and resets history.
    pub fn reset_board(&mut self) {
        self.position = self.start_pos.clone();
        self.reset_history();
        info!(fen = %self.fen(), "board reset");
    }

    /// Replaces the game with a position loaded from FEN.
    ///
    /// On error the current game is left unchanged.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), EngineError> {
        self.position = Position::from_fen(fen)?;
        self.reset_history();
        info!(%fen, "position loaded");
        Ok(())
    }

    /// Takes back the last applied move.
    ///
    /// Returns `false` when only the starting snapshot remains.
    pub fn undo_move(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        self.position = previous;
        self.history.pop();
        debug!(fen = %self.fen(), "move undone");
        true
    }

    fn reset_history(&mut self) {
        self.history.clear();
        self.undo_stack.clear();
        self.history.push(self.fen());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chesslogic_core::STARTING_FEN;

    #[test]
    fn new_engine() {
        let engine = ChessEngine::new();
        assert_eq!(engine.fen(), STARTING_FEN);
        assert_eq!(engine.history(), [STARTING_FEN.to_string()]);
        assert_eq!(engine.whose_turn(), Team::White);
    }

    #[test]
    fn history_grows_per_move() {
        let mut engine = ChessEngine::new();
        assert!(engine.make_move("e2", "e4").unwrap());
        assert!(engine.make_move("e7", "e5").unwrap());
        assert_eq!(engine.history().len(), 3);
        assert_eq!(
            engine.history()[1],
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 1 1"
        );
        assert_eq!(engine.history()[2], engine.fen());
    }

    #[test]
    fn rejected_move_changes_nothing() {
        let mut engine = ChessEngine::new();
        let before = engine.position().clone();
        assert!(!engine.make_move("e2", "e5").unwrap());
        assert_eq!(engine.position(), &before);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn invalid_square_is_an_error() {
        let mut engine = ChessEngine::new();
        assert!(matches!(
            engine.make_move("e9", "e4"),
            Err(EngineError::InvalidSquare(_))
        ));
        assert!(matches!(
            engine.square_color("z1"),
            Err(EngineError::InvalidSquare(_))
        ));
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn clear_and_reset() {
        let mut engine = ChessEngine::new();
        engine.make_move("e2", "e4").unwrap();
        engine.clear_board();
        assert_eq!(engine.fen(), "8/8/8/8/8/8/8/8 w - - 0 1");
        assert_eq!(engine.history().len(), 1);

        engine.reset_board();
        assert_eq!(engine.fen(), STARTING_FEN);
        assert_eq!(engine.history(), [STARTING_FEN.to_string()]);
    }

    #[test]
    fn undo_restores_previous_position() {
        let mut engine = ChessEngine::new();
        assert!(!engine.undo_move());
        engine.make_move("e2", "e4").unwrap();
        engine.make_move("d7", "d5").unwrap();
        assert!(engine.undo_move());
        assert_eq!(
            engine.fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 1 1"
        );
        assert_eq!(engine.whose_turn(), Team::Black);
        assert!(engine.undo_move());
        assert_eq!(engine.position(), &Position::startpos());
    }

    #[test]
    fn config_controls_start_and_placeholders() {
        let config = EngineConfig::from_toml_str(
            r#"
start_fen = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"

[fen]
track_castling = false
"#,
        )
        .unwrap();
        let mut engine = ChessEngine::with_config(config).unwrap();
        assert_eq!(engine.fen(), "4k3/8/8/8/8/8/4P3/4K3 w KQkq - 0 1");
        engine.make_move("e2", "e4").unwrap();
        engine.reset_board();
        assert_eq!(engine.fen(), "4k3/8/8/8/8/8/4P3/4K3 w KQkq - 0 1");
    }

    #[test]
    fn invalid_start_fen() {
        let config = EngineConfig {
            start_fen: Some("not a fen".to_string()),
            ..EngineConfig::default()
        };
        assert!(matches!(
            ChessEngine::with_config(config),
            Err(EngineError::InvalidFen(_))
        ));
    }

    #[test]
    fn load_fen_keeps_game_on_error() {
        let mut engine = ChessEngine::new();
        engine.make_move("e2", "e4").unwrap();
        let before = engine.fen();
        assert!(engine.load_fen("8/8/8 w - - 0 1").is_err());
        assert_eq!(engine.fen(), before);
        assert_eq!(engine.history().len(), 2);

        engine.load_fen("4k3/8/8/8/8/8/8/4K3 b - - 5 40").unwrap();
        assert_eq!(engine.whose_turn(), Team::Black);
        assert_eq!(engine.history(), ["4k3/8/8/8/8/8/8/4K3 b - - 5 40".to_string()]);
    }

    #[test]
    fn queries() {
        let engine = ChessEngine::new();
        assert_eq!(
            engine.piece_on_square("d1").unwrap(),
            Some((PieceKind::Queen, Team::White))
        );
        assert_eq!(engine.piece_on_square("d4").unwrap(), None);
        assert_eq!(engine.pseudo_legal_moves("b1").unwrap().len(), 2);
        assert!(engine.pseudo_legal_moves("b8").unwrap().is_empty());
    }

    fn engine_with_fen_options(track_castling: bool, track_en_passant: bool) -> ChessEngine {
        ChessEngine::with_config(EngineConfig {
            fen: crate::FenOptions {
                track_castling,
                track_en_passant,
            },
            ..EngineConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn undo_keeps_en_passant_with_placeholder_field() {
        let mut engine = engine_with_fen_options(true, false);
        for (from, to) in [
            ("a2", "a4"),
            ("h7", "h5"),
            ("a4", "a5"),
            ("b7", "b5"),
            ("g1", "f3"),
        ] {
            assert!(engine.make_move(from, to).unwrap());
        }
        assert!(engine.undo_move());
        assert!(engine.fen().contains(" - "));
        assert!(engine.make_move("a5", "b6").unwrap());
        assert_eq!(engine.piece_on_square("b5").unwrap(), None);
    }

    #[test]
    fn undo_keeps_lost_castling_rights_with_placeholder_field() {
        let mut engine = engine_with_fen_options(false, true);
        for (from, to) in [("e2", "e4"), ("e7", "e5"), ("e1", "e2"), ("a7", "a6")] {
            assert!(engine.make_move(from, to).unwrap());
        }
        let castling = engine.position().castling();
        assert!(engine.undo_move());
        assert_eq!(engine.position().castling(), castling);
        assert!(engine.make_move("a7", "a6").unwrap());
        assert_eq!(engine.position().castling(), castling);
        assert!(engine.fen().contains(" KQkq "));
    }

    #[test]
    fn undo_after_reset_reports_nothing_to_undo() {
        let mut engine = ChessEngine::new();
        engine.make_move("e2", "e4").unwrap();
        engine.reset_board();
        assert!(!engine.undo_move());
        assert_eq!(engine.history().len(), 1);
    }
}
