//! Game scenarios played through the string-facing engine API.

use chesslogic::{BoardMap, ChessEngine, PieceKind, Square, Team, STARTING_FEN};

fn play(engine: &mut ChessEngine, moves: &[(&str, &str)]) {
    for (from, to) in moves {
        assert!(
            engine.make_move(from, to).unwrap(),
            "{from}{to} should be legal in {}",
            engine.fen()
        );
    }
}

#[test]
fn starting_fen() {
    assert_eq!(ChessEngine::new().fen(), STARTING_FEN);
}

#[test]
fn white_moves_first() {
    let mut engine = ChessEngine::new();
    assert!(engine.make_move("e2", "e4").unwrap());
    assert_eq!(engine.whose_turn(), Team::Black);
}

#[test]
fn black_cannot_move_first() {
    let mut engine = ChessEngine::new();
    assert!(!engine.make_move("e7", "e5").unwrap());
    assert_eq!(engine.fen(), STARTING_FEN);
}

#[test]
fn turns_alternate() {
    let mut engine = ChessEngine::new();
    assert!(engine.make_move("e2", "e4").unwrap());
    assert!(!engine.make_move("d2", "d4").unwrap());
    assert!(engine.make_move("e7", "e5").unwrap());
    assert!(!engine.make_move("d7", "d5").unwrap());
}

#[test]
fn square_colors() {
    let engine = ChessEngine::new();
    for (name, code) in [
        ("a1", 'b'),
        ("h1", 'w'),
        ("a7", 'b'),
        ("b5", 'w'),
        ("c3", 'b'),
        ("a8", 'w'),
        ("h8", 'b'),
    ] {
        assert_eq!(engine.square_color(name).unwrap().code(), code, "{name}");
    }
}

#[test]
fn queen_recaptures_on_g5() {
    let mut engine = ChessEngine::new();
    play(
        &mut engine,
        &[
            ("e2", "e4"),
            ("d7", "d6"),
            ("d2", "d4"),
            ("e7", "e5"),
            ("c1", "g5"),
            ("d8", "g5"),
        ],
    );

    let g5 = Square::from_algebraic("g5").unwrap();
    let position = engine.position();
    assert!(position.map(BoardMap::Piece).contains(g5));
    assert!(position.map(BoardMap::Black).contains(g5));
    assert!(!position.map(BoardMap::White).contains(g5));
    let kinds_on_g5 = PieceKind::ALL
        .iter()
        .filter(|kind| position.kind_map(**kind).contains(g5))
        .count();
    assert_eq!(kinds_on_g5, 1);
    assert_eq!(
        engine.piece_on_square("g5").unwrap(),
        Some((PieceKind::Queen, Team::Black))
    );
    assert_eq!(position.team_map(Team::White).count(), 15);
    assert!(position.is_consistent());
}

#[test]
fn en_passant_capture() {
    let mut engine = ChessEngine::new();
    play(
        &mut engine,
        &[("a2", "a4"), ("h7", "h5"), ("a4", "a5"), ("b7", "b5")],
    );
    assert!(engine.fen().contains(" b6 "), "{}", engine.fen());

    assert!(engine.make_move("a5", "b6").unwrap());
    assert_eq!(engine.piece_on_square("b5").unwrap(), None);
    assert_eq!(
        engine.piece_on_square("b6").unwrap(),
        Some((PieceKind::Pawn, Team::White))
    );
    assert_eq!(
        engine.fen(),
        "rnbqkbnr/p1ppppp1/1P6/7p/8/8/1PPPPPPP/RNBQKBNR b KQkq - 5 3"
    );
    assert!(engine.position().is_consistent());
}

#[test]
fn en_passant_expires_after_one_ply() {
    let mut engine = ChessEngine::new();
    play(
        &mut engine,
        &[
            ("a2", "a4"),
            ("h7", "h6"),
            ("a4", "a5"),
            ("b7", "b5"),
            ("g1", "f3"),
            ("h6", "h5"),
        ],
    );
    assert!(!engine.make_move("a5", "b6").unwrap());
}

#[test]
fn pawn_beside_a_single_step_pawn_is_not_capturable() {
    let mut engine = ChessEngine::new();
    play(
        &mut engine,
        &[
            ("a2", "a4"),
            ("b7", "b6"),
            ("a4", "a5"),
            ("b6", "b5"),
        ],
    );
    assert!(!engine.make_move("a5", "b6").unwrap());
    assert!(engine.make_move("a5", "a6").unwrap());
}

#[test]
fn history_and_undo() {
    let mut engine = ChessEngine::new();
    play(&mut engine, &[("g1", "f3"), ("g8", "f6"), ("f3", "g1")]);
    assert_eq!(engine.history().len(), 4);
    assert_eq!(engine.history()[0], STARTING_FEN);

    assert!(engine.undo_move());
    assert_eq!(engine.history().len(), 3);
    assert_eq!(engine.whose_turn(), Team::White);
    assert_eq!(
        engine.piece_on_square("f3").unwrap(),
        Some((PieceKind::Knight, Team::White))
    );
}

#[test]
fn rook_lifts_along_the_a_file() {
    let mut engine = ChessEngine::new();
    play(&mut engine, &[("a2", "a4"), ("h7", "h6"), ("a1", "a3")]);
    assert_eq!(
        engine.fen(),
        "rnbqkbnr/ppppppp1/7p/8/P7/R7/1PPPPPPP/1NBQKBNR b Kkq - 3 2"
    );
}
