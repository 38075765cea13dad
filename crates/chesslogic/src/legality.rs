//! Pseudo-legal move validation.
//!
//! Validation reads the position and never changes it. Checks on the king
//! are not considered.

use chesslogic_core::{Motion, PieceKind, Square};

use crate::{BitVector, Position};

/// A move that passed validation, ready to be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedMove {
    pub from: Square,
    pub to: Square,
    pub kind: PieceKind,
    /// Square of the pawn removed by an en-passant capture.
    pub en_passant: Option<Square>,
}

/// Validates a move for the side to move.
///
/// Returns `None` when the source is not one of the mover's pieces, the
/// destination holds one of the mover's pieces, or the piece cannot reach
/// the destination.
pub fn validate_move(position: &Position, from: Square, to: Square) -> Option<ValidatedMove> {
    let kind = position.kind_at(from)?;
    let ally = position.team_map(position.ally());
    if !ally.contains(from) || ally.contains(to) {
        return None;
    }

    let mv = ValidatedMove {
        from,
        to,
        kind,
        en_passant: None,
    };
    match kind.motion() {
        Motion::Step => step_targets(kind, from).contains(to).then_some(mv),
        Motion::Slide => slide_targets(position, kind, from).contains(to).then_some(mv),
        Motion::Pawn => validate_pawn(position, mv),
    }
}

/// Every destination the piece on `from` may move to, in index order.
pub fn pseudo_legal_targets(position: &Position, from: Square) -> Vec<Square> {
    Square::all()
        .filter(|to| validate_move(position, from, *to).is_some())
        .collect()
}

/// Squares a knight or king on `from` could land on, ignoring occupancy.
pub fn step_targets(kind: PieceKind, from: Square) -> BitVector {
    kind.offsets()
        .iter()
        .filter_map(|&delta| from.offset(delta))
        .collect()
}

/// Squares a slider on `from` reaches along its rays.
///
/// A ray includes the first enemy piece it meets and stops short of the
/// first friendly one. Rays with a sideways component end at the edge
/// column they travel toward.
pub fn slide_targets(position: &Position, kind: PieceKind, from: Square) -> BitVector {
    let ally = position.team_map(position.ally());
    let enemy = position.team_map(position.enemy());
    let mut targets = BitVector::EMPTY;

    for &delta in kind.offsets() {
        let mut current = from;
        while let Some(next) = current.offset(delta) {
            if ally.contains(next) {
                break;
            }
            targets = targets.with(next);
            if enemy.contains(next) {
                break;
            }
            current = next;
        }
    }
    targets
}

/// Forward pushes from `from`, each requiring every square up to it empty.
fn push_targets(position: &Position, from: Square, offsets: &[i8]) -> BitVector {
    let mut targets = BitVector::EMPTY;
    for &delta in offsets {
        match from.offset(delta) {
            Some(sq) if !position.occupied().contains(sq) => targets = targets.with(sq),
            _ => break,
        }
    }
    targets
}

fn validate_pawn(position: &Position, mv: ValidatedMove) -> Option<ValidatedMove> {
    let team = position.ally();
    let ValidatedMove { from, to, .. } = mv;

    if position.team_map(position.enemy()).contains(to) {
        let attacks = PieceKind::pawn_offsets(&PieceKind::PAWN_ATTACK, team);
        return attacks
            .iter()
            .any(|&delta| from.offset(delta) == Some(to))
            .then_some(mv);
    }

    if position.unmoved_pawns().contains(from) {
        let pushes = PieceKind::pawn_offsets(&PieceKind::PAWN_FIRST_MOVE, team);
        return push_targets(position, from, &pushes).contains(to).then_some(mv);
    }

    let push = PieceKind::pawn_offsets(&PieceKind::PAWN_PUSH, team);
    if push_targets(position, from, &push).contains(to) {
        return Some(mv);
    }

    // The destination is empty here; probe the squares beside the pawn.
    let capturable = position.pieces_of(PieceKind::Pawn, position.enemy())
        & position.two_square_pawns();
    PieceKind::EN_PASSANT
        .iter()
        .filter_map(|&side| from.offset(side))
        .find(|beside| capturable.contains(*beside) && beside.offset(team.forward()) == Some(to))
        .map(|beside| ValidatedMove {
            en_passant: Some(beside),
            ..mv
        })
}
