//! Applying validated moves to a position.

use chesslogic_core::{PieceKind, Team};

use crate::legality::ValidatedMove;
use crate::Position;

/// Applies a validated move in place and passes the turn.
///
/// The move must come from [`crate::validate_move`] on this same position;
/// applying anything else breaks the map invariants.
pub fn apply_move(position: &mut Position, mv: ValidatedMove) {
    let ally = position.ally();
    let enemy = position.enemy();
    let ValidatedMove {
        from,
        to,
        kind,
        en_passant,
    } = mv;
    let captured = position
        .team_map(enemy)
        .contains(to)
        .then(|| position.kind_at(to))
        .flatten();

    if let Some(target) = en_passant {
        position.occupied = position.occupied.without(target);
        position.teams[enemy.index()] = position.teams[enemy.index()].without(target);
        position.kinds[PieceKind::Pawn.index()] =
            position.kinds[PieceKind::Pawn.index()].without(target);
        position.two_square_pawns = position.two_square_pawns.without(target);
    }

    position.occupied = position.occupied.without(from).with(to);
    position.teams[ally.index()] = position.teams[ally.index()].without(from).with(to);

    if let Some(taken) = captured {
        position.teams[enemy.index()] = position.teams[enemy.index()].without(to);
        position.kinds[taken.index()] = position.kinds[taken.index()].without(to);
        if taken == PieceKind::Pawn {
            position.unmoved_pawns = position.unmoved_pawns.without(to);
            position.two_square_pawns = position.two_square_pawns.without(to);
        }
        position.castling.remove_corner(to);
    }

    position.kinds[kind.index()] = position.kinds[kind.index()].without(from).with(to);

    match kind {
        PieceKind::Pawn => {
            position.unmoved_pawns = position.unmoved_pawns.without(from);
            if from.index().abs_diff(to.index()) == PieceKind::TWO_SQUARE_PAWN_MOVE {
                position.two_square_pawns = position.two_square_pawns.with(to);
            }
        }
        PieceKind::King => position.castling.remove_team(ally),
        PieceKind::Rook => position.castling.remove_corner(from),
        _ => {}
    }

    if position.two_square_pawns.contains(from) {
        position.two_square_pawns = position.two_square_pawns.without(from);
    }
    // Marks from the previous ply expire once the reply has been played.
    position.two_square_pawns = position.two_square_pawns & position.teams[ally.index()];

    advance_turn(position);
}

/// Swaps the side to move and advances the move counters.
fn advance_turn(position: &mut Position) {
    if position.side_to_move == Team::Black {
        position.fullmove_number += 1;
    }
    position.halfmove_clock += 1;
    position.side_to_move = position.side_to_move.opponent();
}
