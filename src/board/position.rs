//! Piece placement: twelve piece bitboards plus the aggregates derived from them.
//!
//! Every mutation goes through a method here so that `occupied` and
//! `color_mask` never drift from the piece boards.

use super::types::{Bitboard, Color, ColoredPiece, Piece, Square};

/// Piece placement without game state.
///
/// Invariants:
/// - `occupied` is the union of all twelve piece boards
/// - no square is set in two piece boards
/// - `color_mask` is the union of the six black piece boards
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pieces: [Bitboard; 12],
    occupied: Bitboard,
    color_mask: Bitboard,
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl Position {
    /// A board with no pieces
    #[must_use]
    pub const fn empty() -> Self {
        Position {
            pieces: [Bitboard::EMPTY; 12],
            occupied: Bitboard::EMPTY,
            color_mask: Bitboard::EMPTY,
        }
    }

    /// All occupied squares
    #[inline]
    #[must_use]
    pub const fn occupied(&self) -> Bitboard {
        self.occupied
    }

    /// Squares held by black pieces
    #[inline]
    #[must_use]
    pub const fn color_mask(&self) -> Bitboard {
        self.color_mask
    }

    /// Squares held by `color`
    #[inline]
    #[must_use]
    pub fn color_occupied(&self, color: Color) -> Bitboard {
        match color {
            Color::White => self.occupied & !self.color_mask,
            Color::Black => self.color_mask,
        }
    }

    /// Bitboard of one piece type and color
    #[inline]
    #[must_use]
    pub const fn pieces(&self, piece: Piece, color: Color) -> Bitboard {
        self.pieces[ColoredPiece::new(piece, color).slot()]
    }

    /// Bitboard of one piece type regardless of color
    #[inline]
    #[must_use]
    pub fn pieces_of_type(&self, piece: Piece) -> Bitboard {
        self.pieces(piece, Color::White) | self.pieces(piece, Color::Black)
    }

    /// Squares holding `piece` of `color`, lowest index first
    #[must_use]
    pub fn squares_of(&self, piece: Piece, color: Color) -> Vec<Square> {
        self.pieces(piece, color).iter().collect()
    }

    /// Piece on a square, if any
    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<ColoredPiece> {
        if !self.occupied.contains(sq) {
            return None;
        }
        let base = if self.color_mask.contains(sq) { 6 } else { 0 };
        (base..base + 6)
            .find(|&slot| self.pieces[slot].contains(sq))
            .map(ColoredPiece::from_slot)
    }

    /// King square of `color`
    ///
    /// # Panics
    ///
    /// Panics if `color` has no king, which only a corrupted board can produce.
    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces(Piece::King, color)
            .lsb()
            .unwrap_or_else(|| panic!("{color} has no king on the board"))
    }

    /// Replace whatever stands on `sq` with `piece` (or clear it with `None`)
    pub fn set(&mut self, sq: Square, piece: Option<ColoredPiece>) {
        if self.occupied.contains(sq) {
            self.remove_piece(sq);
        }
        if let Some(p) = piece {
            self.create_piece(sq, p);
        }
    }

    /// Place a piece on an empty square
    #[inline]
    pub fn create_piece(&mut self, sq: Square, piece: ColoredPiece) {
        debug_assert!(
            !self.occupied.contains(sq),
            "create_piece on occupied square {sq}"
        );
        self.pieces[piece.slot()].set(sq);
        self.occupied.set(sq);
        if piece.color() == Color::Black {
            self.color_mask.set(sq);
        }
    }

    /// Remove and return the piece on `sq`
    ///
    /// # Panics
    ///
    /// Panics if the square is empty.
    #[inline]
    pub fn remove_piece(&mut self, sq: Square) -> ColoredPiece {
        let piece = self
            .piece_at(sq)
            .unwrap_or_else(|| panic!("remove_piece on empty square {sq}"));
        self.pieces[piece.slot()].clear(sq);
        self.occupied.clear(sq);
        self.color_mask.clear(sq);
        piece
    }

    /// Move `piece` from `from` to the empty square `to`
    #[inline]
    pub fn move_to_empty(&mut self, from: Square, to: Square, piece: ColoredPiece) {
        debug_assert_eq!(self.piece_at(from), Some(piece), "no {piece:?} on {from}");
        debug_assert!(!self.occupied.contains(to), "destination {to} is occupied");
        let mask = Bitboard::from_square(from) | Bitboard::from_square(to);
        self.pieces[piece.slot()] ^= mask;
        self.occupied ^= mask;
        if piece.color() == Color::Black {
            self.color_mask ^= mask;
        }
    }

    /// Move `piece` from `from` onto `to`, capturing `captured`
    ///
    /// `captured` must be exactly what stands on `to`.
    #[inline]
    pub fn move_to_occupied(
        &mut self,
        from: Square,
        to: Square,
        piece: ColoredPiece,
        captured: ColoredPiece,
    ) {
        debug_assert_eq!(
            self.piece_at(to),
            Some(captured),
            "capture on {to} does not match the board"
        );
        self.pieces[captured.slot()].clear(to);
        self.color_mask.clear(to);
        self.occupied.clear(to);
        self.move_to_empty(from, to, piece);
    }

    /// Turn the pawn on `sq` into `into`
    pub fn promote(&mut self, sq: Square, color: Color, into: Piece) {
        let pawn = ColoredPiece::new(Piece::Pawn, color);
        debug_assert_eq!(self.piece_at(sq), Some(pawn), "no pawn to promote on {sq}");
        self.pieces[pawn.slot()].clear(sq);
        self.pieces[ColoredPiece::new(into, color).slot()].set(sq);
    }

    /// Turn the promoted `from` piece on `sq` back into a pawn
    pub fn unpromote(&mut self, sq: Square, color: Color, from: Piece) {
        let promoted = ColoredPiece::new(from, color);
        debug_assert_eq!(self.piece_at(sq), Some(promoted), "no {promoted:?} on {sq}");
        self.pieces[promoted.slot()].clear(sq);
        self.pieces[ColoredPiece::new(Piece::Pawn, color).slot()].set(sq);
    }

    /// Remove the enemy pawn taken en passant by a `mover` pawn landing on `to`.
    /// Returns the square the captured pawn stood on.
    pub fn capture_en_passant(&mut self, to: Square, mover: Color) -> Square {
        let victim_sq = to
            .offset_rank(-mover.pawn_direction())
            .unwrap_or_else(|| panic!("en passant target {to} has no square behind it"));
        let victim = self.remove_piece(victim_sq);
        debug_assert_eq!(victim, ColoredPiece::new(Piece::Pawn, mover.opponent()));
        victim_sq
    }

    /// Check the aggregate invariants
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut union = Bitboard::EMPTY;
        let mut black = Bitboard::EMPTY;
        for (slot, &bb) in self.pieces.iter().enumerate() {
            if !(union & bb).is_empty() {
                return false;
            }
            union |= bb;
            if slot >= 6 {
                black |= bb;
            }
        }
        union == self.occupied && black == self.color_mask
    }

    /// Piece/square pairs for every occupied square, lowest index first
    pub fn iter(&self) -> impl Iterator<Item = (Square, ColoredPiece)> + '_ {
        self.occupied
            .iter()
            .filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }
}
