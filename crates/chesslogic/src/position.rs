//! Chess position state as a set of named bit maps.

use chesslogic_core::{FenError, FenFields, PieceKind, Square, Team};

use crate::BitVector;

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Field printed when castling rights are not tracked.
    pub const PLACEHOLDER: &'static str = "KQkq";

    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Parses letters from a FEN castling field; unknown letters are ignored.
    pub fn from_letters(letters: &str) -> Self {
        let flags = letters.chars().fold(0u8, |flags, c| {
            flags
                | match c {
                    'K' => Self::WHITE_KINGSIDE,
                    'Q' => Self::WHITE_QUEENSIDE,
                    'k' => Self::BLACK_KINGSIDE,
                    'q' => Self::BLACK_QUEENSIDE,
                    _ => 0,
                }
        });
        CastlingRights::new(flags)
    }

    #[inline]
    pub const fn has(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    /// Removes both rights of a team, after its king moves.
    #[inline]
    pub fn remove_team(&mut self, team: Team) {
        self.0 &= match team {
            Team::White => !(Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE),
            Team::Black => !(Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE),
        };
    }

    /// Removes the right tied to a rook's home corner, if `sq` is one.
    pub fn remove_corner(&mut self, sq: Square) {
        let flag = match sq {
            Square::H1 => Self::WHITE_KINGSIDE,
            Square::A1 => Self::WHITE_QUEENSIDE,
            Square::H8 => Self::BLACK_KINGSIDE,
            Square::A8 => Self::BLACK_QUEENSIDE,
            _ => return,
        };
        self.0 &= !flag;
    }

    /// Returns the FEN castling field, `-` when no rights remain.
    pub fn to_fen_field(self) -> String {
        if self.0 == 0 {
            return "-".to_string();
        }
        [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ]
        .into_iter()
        .filter(|&(flag, _)| self.has(flag))
        .map(|(_, letter)| letter)
        .collect()
    }
}

/// Names of the eleven maps that make up a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardMap {
    /// Every occupied square.
    Piece,
    White,
    Black,
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    /// Pawns that have not left their starting square.
    UnmovedPawns,
    /// Pawns whose most recent move was a two-square advance.
    FirstMoveTwoSquarePawns,
}

impl BoardMap {
    pub const ALL: [BoardMap; 11] = [
        BoardMap::Piece,
        BoardMap::White,
        BoardMap::Black,
        BoardMap::Pawn,
        BoardMap::Knight,
        BoardMap::Bishop,
        BoardMap::Rook,
        BoardMap::Queen,
        BoardMap::King,
        BoardMap::UnmovedPawns,
        BoardMap::FirstMoveTwoSquarePawns,
    ];

    pub const fn team(team: Team) -> Self {
        match team {
            Team::White => BoardMap::White,
            Team::Black => BoardMap::Black,
        }
    }

    pub const fn kind(kind: PieceKind) -> Self {
        match kind {
            PieceKind::Pawn => BoardMap::Pawn,
            PieceKind::Knight => BoardMap::Knight,
            PieceKind::Bishop => BoardMap::Bishop,
            PieceKind::Rook => BoardMap::Rook,
            PieceKind::Queen => BoardMap::Queen,
            PieceKind::King => BoardMap::King,
        }
    }
}

// Starting maps, one byte per rank with rank 1 in the most-significant byte.
const START_PIECE: u64 = 0xFFFF_0000_0000_FFFF;
const START_WHITE: u64 = 0xFFFF_0000_0000_0000;
const START_BLACK: u64 = 0x0000_0000_0000_FFFF;
const START_PAWN: u64 = 0x00FF_0000_0000_FF00;
const START_KNIGHT: u64 = 0x4200_0000_0000_0042;
const START_BISHOP: u64 = 0x2400_0000_0000_0024;
const START_ROOK: u64 = 0x8100_0000_0000_0081;
const START_QUEEN: u64 = 0x0800_0000_0000_0008;
const START_KING: u64 = 0x1000_0000_0000_0010;

/// Complete position state.
///
/// Invariants maintained by every constructor and by move application:
/// - `occupied` is the union of both team maps
/// - the six kind maps are pairwise disjoint and their union is `occupied`
/// - `unmoved_pawns` and `two_square_pawns` are subsets of the pawn map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub(crate) occupied: BitVector,
    /// Indexed by [`Team::index`].
    pub(crate) teams: [BitVector; 2],
    /// Indexed by [`PieceKind::index`].
    pub(crate) kinds: [BitVector; 6],
    pub(crate) unmoved_pawns: BitVector,
    pub(crate) two_square_pawns: BitVector,
    pub(crate) side_to_move: Team,
    pub(crate) castling: CastlingRights,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Position {
    /// Creates a position with every map zeroed and counters reset.
    pub fn empty() -> Self {
        Position {
            occupied: BitVector::EMPTY,
            teams: [BitVector::EMPTY; 2],
            kinds: [BitVector::EMPTY; 6],
            unmoved_pawns: BitVector::EMPTY,
            two_square_pawns: BitVector::EMPTY,
            side_to_move: Team::White,
            castling: CastlingRights::NONE,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting arrangement.
    pub fn startpos() -> Self {
        Position {
            occupied: BitVector::from_u64(START_PIECE),
            teams: [
                BitVector::from_u64(START_WHITE),
                BitVector::from_u64(START_BLACK),
            ],
            kinds: [
                BitVector::from_u64(START_PAWN),
                BitVector::from_u64(START_KNIGHT),
                BitVector::from_u64(START_BISHOP),
                BitVector::from_u64(START_ROOK),
                BitVector::from_u64(START_QUEEN),
                BitVector::from_u64(START_KING),
            ],
            unmoved_pawns: BitVector::from_u64(START_PAWN),
            two_square_pawns: BitVector::EMPTY,
            side_to_move: Team::White,
            castling: CastlingRights::ALL,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_fields(&FenFields::parse(fen)?))
    }

    /// Builds the maps from already-validated FEN fields.
    ///
    /// Pawns standing on their home rank count as unmoved. An en-passant
    /// target marks the pawn just in front of it as a two-square pawn.
    pub fn from_fields(fields: &FenFields) -> Self {
        let mut position = Position::empty();

        for (sq, slot) in Square::all().zip(fields.placement.iter()) {
            let Some((kind, team)) = *slot else {
                continue;
            };
            position.occupied = position.occupied.with(sq);
            position.teams[team.index()] = position.teams[team.index()].with(sq);
            position.kinds[kind.index()] = position.kinds[kind.index()].with(sq);
            if kind == PieceKind::Pawn && sq.row() == team.pawn_home_row() {
                position.unmoved_pawns = position.unmoved_pawns.with(sq);
            }
        }

        // The pawn that skipped the target belongs to the side not to move.
        if let Some(target) = fields.en_passant {
            let mover = fields.side_to_move.opponent();
            if let Some(pawn) = target.offset(mover.forward()) {
                if position.pieces_of(PieceKind::Pawn, mover).contains(pawn) {
                    position.two_square_pawns = position.two_square_pawns.with(pawn);
                }
            }
        }

        position.side_to_move = fields.side_to_move;
        position.castling = CastlingRights::from_letters(&fields.castling);
        position.halfmove_clock = fields.halfmove_clock;
        position.fullmove_number = fields.fullmove_number;
        position
    }

    /// Returns the named map.
    pub fn map(&self, map: BoardMap) -> BitVector {
        match map {
            BoardMap::Piece => self.occupied,
            BoardMap::White => self.teams[Team::White.index()],
            BoardMap::Black => self.teams[Team::Black.index()],
            BoardMap::Pawn => self.kinds[PieceKind::Pawn.index()],
            BoardMap::Knight => self.kinds[PieceKind::Knight.index()],
            BoardMap::Bishop => self.kinds[PieceKind::Bishop.index()],
            BoardMap::Rook => self.kinds[PieceKind::Rook.index()],
            BoardMap::Queen => self.kinds[PieceKind::Queen.index()],
            BoardMap::King => self.kinds[PieceKind::King.index()],
            BoardMap::UnmovedPawns => self.unmoved_pawns,
            BoardMap::FirstMoveTwoSquarePawns => self.two_square_pawns,
        }
    }

    #[inline]
    pub fn occupied(&self) -> BitVector {
        self.occupied
    }

    #[inline]
    pub fn team_map(&self, team: Team) -> BitVector {
        self.teams[team.index()]
    }

    #[inline]
    pub fn kind_map(&self, kind: PieceKind) -> BitVector {
        self.kinds[kind.index()]
    }

    #[inline]
    pub fn unmoved_pawns(&self) -> BitVector {
        self.unmoved_pawns
    }

    #[inline]
    pub fn two_square_pawns(&self) -> BitVector {
        self.two_square_pawns
    }

    /// Pieces of one kind belonging to one team.
    #[inline]
    pub fn pieces_of(&self, kind: PieceKind, team: Team) -> BitVector {
        self.kind_map(kind) & self.team_map(team)
    }

    /// The side to move.
    #[inline]
    pub fn ally(&self) -> Team {
        self.side_to_move
    }

    /// The side waiting to move.
    #[inline]
    pub fn enemy(&self) -> Team {
        self.side_to_move.opponent()
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Returns the kind on a square; the first kind map containing it wins.
    pub fn kind_at(&self, sq: Square) -> Option<PieceKind> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| self.kind_map(*kind).contains(sq))
    }

    /// Returns the team owning a square, if any.
    pub fn team_at(&self, sq: Square) -> Option<Team> {
        Team::ALL
            .into_iter()
            .find(|team| self.team_map(*team).contains(sq))
    }

    /// Returns the kind and team on a square, if occupied.
    pub fn piece_at(&self, sq: Square) -> Option<(PieceKind, Team)> {
        if !self.occupied.contains(sq) {
            return None;
        }
        Some((self.kind_at(sq)?, self.team_at(sq)?))
    }

    /// The square a pawn skipped on the previous ply, capturable en passant
    /// by the side to move.
    pub fn en_passant_target(&self) -> Option<Square> {
        let mover = self.enemy();
        self.two_square_pawns
            .squares()
            .find(|sq| self.team_map(mover).contains(*sq))
            .and_then(|pawn| pawn.offset(-mover.forward()))
    }

    /// Checks the structural invariants between the maps.
    pub fn is_consistent(&self) -> bool {
        let [white, black] = self.teams;
        let union = self.kinds.iter().fold(BitVector::EMPTY, |acc, &bv| acc | bv);
        let overlaps = self
            .kinds
            .iter()
            .map(|bv| bv.count())
            .sum::<u32>()
            != union.count();
        let pawns = self.kind_map(PieceKind::Pawn);

        self.occupied == (white | black)
            && (white & black).is_zero()
            && !overlaps
            && union == self.occupied
            && (self.unmoved_pawns & !pawns).is_zero()
            && (self.two_square_pawns & !pawns).is_zero()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
