//! Applying and taking back moves.
//!
//! The hash is updated incrementally and must always equal
//! [`Board::compute_hash`]; undo restores it from the record.

use super::error::MoveError;
use super::state::{NullMoveRecord, UndoRecord};
use super::types::{Color, ColoredPiece, Move, Piece, Square};
use super::Board;
use crate::zobrist::ZOBRIST;

/// Rook origin and destination for a castling king move
fn castling_rook_squares(king_to: Square) -> (Square, Square) {
    match king_to {
        Square::G1 => (Square::H1, Square::F1),
        Square::C1 => (Square::A1, Square::D1),
        Square::G8 => (Square::H8, Square::F8),
        Square::C8 => (Square::A8, Square::D8),
        _ => unreachable!("castling king cannot land on {king_to}"),
    }
}

impl Board {
    /// Apply a move generated for this position.
    ///
    /// # Panics
    ///
    /// Panics if the source square is empty. The move is otherwise trusted:
    /// pass only moves produced by the generator for the current position.
    pub fn make_move(&mut self, mv: Move) -> UndoRecord {
        let keys = &*ZOBRIST;
        let from = mv.from();
        let to = mv.to();
        let color = self.side_to_move;
        let moved = self
            .position
            .piece_at(from)
            .unwrap_or_else(|| panic!("make_move {mv}: no piece on {from}"));

        let mut record = UndoRecord {
            from,
            to,
            moved,
            captured: None,
            captured_square: to,
            castling_rook: None,
            promotion: mv.promotion_piece(),
            previous_castling: self.castling,
            previous_en_passant: self.en_passant,
            previous_halfmove_clock: self.halfmove_clock,
            previous_hash: self.hash,
        };

        let mut hash = self.hash;
        hash ^= keys.en_passant(self.en_passant);
        hash ^= keys.castling(self.castling);

        if mv.is_castling() {
            let (rook_from, rook_to) = castling_rook_squares(to);
            let rook = ColoredPiece::new(Piece::Rook, color);
            self.position.move_to_empty(from, to, moved);
            self.position.move_to_empty(rook_from, rook_to, rook);
            hash ^= keys.piece(rook, rook_from) ^ keys.piece(rook, rook_to);
            record.castling_rook = Some((rook_from, rook_to));
        } else if mv.is_en_passant() {
            self.position.move_to_empty(from, to, moved);
            let victim_sq = self.position.capture_en_passant(to, color);
            let victim = ColoredPiece::new(Piece::Pawn, color.opponent());
            hash ^= keys.piece(victim, victim_sq);
            record.captured = Some(victim);
            record.captured_square = victim_sq;
        } else if let Some(captured) = self.position.piece_at(to) {
            self.position.move_to_occupied(from, to, moved, captured);
            hash ^= keys.piece(captured, to);
            record.captured = Some(captured);
        } else {
            self.position.move_to_empty(from, to, moved);
        }
        hash ^= keys.piece(moved, from);

        if let Some(promoted) = record.promotion {
            self.position.promote(to, color, promoted);
            hash ^= keys.piece(ColoredPiece::new(promoted, color), to);
        } else {
            hash ^= keys.piece(moved, to);
        }

        self.castling.touch(from);
        self.castling.touch(to);
        self.en_passant = if mv.is_double_pawn_push() {
            from.offset_rank(color.pawn_direction())
        } else {
            None
        };

        if moved.piece() == Piece::Pawn || record.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if color == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = color.opponent();
        hash ^= keys.side();
        hash ^= keys.castling(self.castling);
        hash ^= keys.en_passant(self.en_passant);
        self.hash = hash;

        debug_assert!(self.position.is_consistent());
        record
    }

    /// Take back the move described by `record`.
    pub fn undo_move(&mut self, record: UndoRecord) {
        let color = record.moved.color();

        if let Some(promoted) = record.promotion {
            self.position.unpromote(record.to, color, promoted);
        }
        self.position
            .move_to_empty(record.to, record.from, record.moved);
        if let Some((rook_from, rook_to)) = record.castling_rook {
            self.position
                .move_to_empty(rook_to, rook_from, ColoredPiece::new(Piece::Rook, color));
        }
        if let Some(captured) = record.captured {
            self.position.create_piece(record.captured_square, captured);
        }

        if color == Color::Black {
            self.fullmove_number -= 1;
        }
        self.side_to_move = color;
        self.castling = record.previous_castling;
        self.en_passant = record.previous_en_passant;
        self.halfmove_clock = record.previous_halfmove_clock;
        self.hash = record.previous_hash;

        debug_assert!(self.position.is_consistent());
    }

    /// Apply the legal move from `from` to `to`, promoting to a queen when a
    /// pawn reaches the last rank.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<UndoRecord, MoveError> {
        self.apply_move_with_promotion(from, to, None)
    }

    /// Apply the legal move from `from` to `to` with an explicit promotion piece.
    pub fn apply_move_with_promotion(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<UndoRecord, MoveError> {
        match self.piece_at(from) {
            Some(p) if p.color() == self.side_to_move => {}
            _ => {
                return Err(MoveError::NoPieceOnSquare {
                    square: from.to_string(),
                })
            }
        }
        let mv = self
            .find_legal_move(from, to, promotion)
            .ok_or_else(|| {
                let promo = promotion.map(|p| p.to_char().to_string()).unwrap_or_default();
                MoveError::IllegalMove {
                    notation: format!("{from}{to}{promo}"),
                }
            })?;
        Ok(self.make_move(mv))
    }

    /// The legal move matching `from`, `to` and the promotion choice.
    /// A missing promotion choice selects the queen.
    pub(crate) fn find_legal_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Option<Move> {
        let wanted = promotion.unwrap_or(Piece::Queen);
        self.generate_moves().into_iter().find(|m| {
            m.from() == from
                && m.to() == to
                && m.promotion_piece().map_or(true, |p| p == wanted)
        })
    }

    /// Pass the turn without moving.
    pub fn make_null_move(&mut self) -> NullMoveRecord {
        let keys = &*ZOBRIST;
        let record = NullMoveRecord {
            previous_en_passant: self.en_passant,
            previous_hash: self.hash,
        };
        self.hash ^= keys.en_passant(self.en_passant) ^ keys.side();
        self.en_passant = None;
        self.side_to_move = self.side_to_move.opponent();
        record
    }

    pub fn unmake_null_move(&mut self, record: NullMoveRecord) {
        self.side_to_move = self.side_to_move.opponent();
        self.en_passant = record.previous_en_passant;
        self.hash = record.previous_hash;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_apply_and_undo_restores_board() {
        let mut board = Board::new();
        let before = board.clone();
        let record = board.apply_move(sq("e2"), sq("e4")).unwrap();
        assert_eq!(board.en_passant_target(), Some(sq("e3")));
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.hash(), board.compute_hash());
        board.undo_move(record);
        assert_eq!(board, before);
    }

    #[test]
    fn test_apply_rejects_illegal_and_empty() {
        let mut board = Board::new();
        assert_eq!(
            board.apply_move(sq("e4"), sq("e5")).unwrap_err(),
            MoveError::NoPieceOnSquare {
                square: "e4".to_string()
            }
        );
        assert_eq!(
            board.apply_move(sq("e7"), sq("e5")).unwrap_err(),
            MoveError::NoPieceOnSquare {
                square: "e7".to_string()
            }
        );
        assert_eq!(
            board.apply_move(sq("e2"), sq("e5")).unwrap_err(),
            MoveError::IllegalMove {
                notation: "e2e5".to_string()
            }
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_castling_moves_rook_and_drops_rights() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let record = board.apply_move(Square::E1, Square::G1).unwrap();
        assert_eq!(
            board.piece_at(Square::F1),
            Some(ColoredPiece::new(Piece::Rook, Color::White))
        );
        assert_eq!(board.piece_at(Square::H1), None);
        assert_eq!(board.castling_rights().to_string(), "kq");
        assert_eq!(board.hash(), board.compute_hash());
        board.undo_move(record);
        assert_eq!(board.to_fen(), "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    }

    #[test]
    fn test_promotion_defaults_to_queen() {
        let mut board = Board::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1");
        let record = board.apply_move(sq("a7"), sq("a8")).unwrap();
        assert_eq!(
            board.piece_at(sq("a8")),
            Some(ColoredPiece::new(Piece::Queen, Color::White))
        );
        board.undo_move(record);

        let record = board
            .apply_move_with_promotion(sq("a7"), sq("a8"), Some(Piece::Knight))
            .unwrap();
        assert_eq!(
            board.piece_at(sq("a8")),
            Some(ColoredPiece::new(Piece::Knight, Color::White))
        );
        assert_eq!(board.hash(), board.compute_hash());
        board.undo_move(record);
        assert_eq!(
            board.piece_at(sq("a7")),
            Some(ColoredPiece::new(Piece::Pawn, Color::White))
        );
    }

    #[test]
    fn test_en_passant_capture_and_undo() {
        let fen = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
        let mut board = Board::from_fen(fen);
        let record = board.apply_move(sq("e5"), sq("f6")).unwrap();
        assert_eq!(record.captured(), Some(ColoredPiece::new(Piece::Pawn, Color::Black)));
        assert_eq!(board.piece_at(sq("f5")), None);
        assert_eq!(board.hash(), board.compute_hash());
        board.undo_move(record);
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn test_halfmove_and_fullmove_counters() {
        let mut board = Board::new();
        let r1 = board.apply_move(Square::G1, sq("f3")).unwrap();
        assert_eq!(board.halfmove_clock(), 1);
        let r2 = board.apply_move(sq("e7"), sq("e5")).unwrap();
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 2);
        board.undo_move(r2);
        board.undo_move(r1);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_null_move_round_trip() {
        let fen = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
        let mut board = Board::from_fen(fen);
        let original = board.clone();
        let record = board.make_null_move();
        assert_eq!(board.en_passant_target(), None);
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.hash(), board.compute_hash());
        board.unmake_null_move(record);
        assert_eq!(board, original);
    }
}
