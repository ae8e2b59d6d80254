use super::types::{CastlingRights, Color, ColoredPiece, Piece, Square};
use super::Position;
use crate::zobrist::position_hash;

/// Halfmove clock value at which the fifty-move rule applies
const FIFTY_MOVE_LIMIT: u32 = 100;

/// Everything needed to take back one move exactly.
///
/// Returned by [`Board::make_move`] and consumed by [`Board::undo_move`].
/// Not `Clone`: a record can only be undone once.
#[derive(Debug)]
#[must_use = "an undo record must be passed back to undo_move"]
pub struct UndoRecord {
    pub(crate) from: Square,
    pub(crate) to: Square,
    pub(crate) moved: ColoredPiece,
    pub(crate) captured: Option<ColoredPiece>,
    /// Square the captured piece stood on (differs from `to` for en passant)
    pub(crate) captured_square: Square,
    /// Rook origin and destination when the move castled
    pub(crate) castling_rook: Option<(Square, Square)>,
    pub(crate) promotion: Option<Piece>,
    pub(crate) previous_castling: CastlingRights,
    pub(crate) previous_en_passant: Option<Square>,
    pub(crate) previous_halfmove_clock: u32,
    pub(crate) previous_hash: u64,
}

impl UndoRecord {
    /// Source square of the recorded move
    #[must_use]
    pub fn from(&self) -> Square {
        self.from
    }

    /// Destination square of the recorded move
    #[must_use]
    pub fn to(&self) -> Square {
        self.to
    }

    /// The piece that moved (a pawn for promotions)
    #[must_use]
    pub fn moved(&self) -> ColoredPiece {
        self.moved
    }

    /// The captured piece, if any
    #[must_use]
    pub fn captured(&self) -> Option<ColoredPiece> {
        self.captured
    }
}

/// State saved by a null move
#[derive(Debug)]
pub struct NullMoveRecord {
    pub(crate) previous_en_passant: Option<Square>,
    pub(crate) previous_hash: u64,
}

/// Piece placement plus game state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub(crate) position: Position,
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64,
}

impl Board {
    /// The standard starting position
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.into_iter().enumerate() {
            let place = |board: &mut Board, rank: usize, p: Piece, c: Color| {
                if let Some(sq) = Square::new(rank, file) {
                    board.position.create_piece(sq, ColoredPiece::new(p, c));
                }
            };
            place(&mut board, 0, piece, Color::White);
            place(&mut board, 1, Piece::Pawn, Color::White);
            place(&mut board, 6, Piece::Pawn, Color::Black);
            place(&mut board, 7, piece, Color::Black);
        }

        board.castling = CastlingRights::all();
        board.hash = board.compute_hash();
        board
    }

    pub(crate) fn empty() -> Self {
        Board {
            position: Position::empty(),
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        }
    }

    /// Current Zobrist hash
    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Recompute the hash from scratch
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        position_hash(
            &self.position,
            self.side_to_move,
            self.castling,
            self.en_passant,
        )
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Piece on a square, if any
    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<ColoredPiece> {
        self.position.piece_at(sq)
    }

    /// Fifty-move rule exhausted
    #[must_use]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_LIMIT
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
