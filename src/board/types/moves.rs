//! Move type and fixed-capacity move lists.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Piece;
use super::square::Square;

// Move kinds (upper 4 bits)
const KIND_QUIET: u16 = 0;
const KIND_DOUBLE_PUSH: u16 = 1;
const KIND_CASTLE_KING: u16 = 2;
const KIND_CASTLE_QUEEN: u16 = 3;
const KIND_CAPTURE: u16 = 4;
const KIND_EN_PASSANT: u16 = 5;
// Promotions: bit 3 set, bit 2 = capture, bits 0-1 = piece
const KIND_PROMOTION: u16 = 8;
const KIND_PROMOTION_CAPTURE: u16 = 12;

/// A move packed into 16 bits.
///
/// - bits 0-5:   from square
/// - bits 6-11:  to square
/// - bits 12-15: kind
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u16);

impl Move {
    #[inline]
    #[must_use]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Move::with_kind(from, to, KIND_QUIET)
    }

    #[inline]
    #[must_use]
    pub const fn capture(from: Square, to: Square) -> Self {
        Move::with_kind(from, to, KIND_CAPTURE)
    }

    #[inline]
    #[must_use]
    pub const fn double_pawn_push(from: Square, to: Square) -> Self {
        Move::with_kind(from, to, KIND_DOUBLE_PUSH)
    }

    #[inline]
    #[must_use]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Move::with_kind(from, to, KIND_EN_PASSANT)
    }

    #[inline]
    #[must_use]
    pub const fn castle_kingside(from: Square, to: Square) -> Self {
        Move::with_kind(from, to, KIND_CASTLE_KING)
    }

    #[inline]
    #[must_use]
    pub const fn castle_queenside(from: Square, to: Square) -> Self {
        Move::with_kind(from, to, KIND_CASTLE_QUEEN)
    }

    /// Promotion, optionally capturing. Pawn and king fall back to queen.
    #[inline]
    #[must_use]
    pub const fn promotion(from: Square, to: Square, piece: Piece, capture: bool) -> Self {
        let piece_bits = match piece {
            Piece::Knight => 0,
            Piece::Bishop => 1,
            Piece::Rook => 2,
            _ => 3,
        };
        let base = if capture {
            KIND_PROMOTION_CAPTURE
        } else {
            KIND_PROMOTION
        };
        Move::with_kind(from, to, base | piece_bits)
    }

    #[inline]
    const fn with_kind(from: Square, to: Square, kind: u16) -> Self {
        Move(from.index() as u16 | ((to.index() as u16) << 6) | (kind << 12))
    }

    /// Source square
    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index_unchecked((self.0 & 0x3F) as usize)
    }

    /// Destination square
    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index_unchecked(((self.0 >> 6) & 0x3F) as usize)
    }

    #[inline]
    const fn kind(self) -> u16 {
        self.0 >> 12
    }

    /// Captures a piece (including en passant)
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        let k = self.kind();
        k == KIND_CAPTURE || k == KIND_EN_PASSANT || k >= KIND_PROMOTION_CAPTURE
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.kind() == KIND_EN_PASSANT
    }

    #[inline]
    #[must_use]
    pub const fn is_castling(self) -> bool {
        let k = self.kind();
        k == KIND_CASTLE_KING || k == KIND_CASTLE_QUEEN
    }

    #[inline]
    #[must_use]
    pub const fn is_castle_kingside(self) -> bool {
        self.kind() == KIND_CASTLE_KING
    }

    #[inline]
    #[must_use]
    pub const fn is_double_pawn_push(self) -> bool {
        self.kind() == KIND_DOUBLE_PUSH
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.kind() >= KIND_PROMOTION
    }

    /// Promotion piece, if any
    #[inline]
    #[must_use]
    pub const fn promotion_piece(self) -> Option<Piece> {
        if !self.is_promotion() {
            return None;
        }
        Some(match self.kind() & 0b11 {
            0 => Piece::Knight,
            1 => Piece::Bishop,
            2 => Piece::Rook,
            _ => Piece::Queen,
        })
    }

    /// Raw 16-bit value (for table storage)
    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn from_u16(value: u16) -> Self {
        Move(value)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self}")?;
        if self.is_capture() {
            write!(f, " cap")?;
        }
        if self.is_castling() {
            write!(f, " castle")?;
        }
        if self.is_en_passant() {
            write!(f, " ep")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    /// Long algebraic notation: `e2e4`, `e7e8q`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion_piece() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

pub(crate) const MAX_MOVES: usize = 256;
/// Filler for unused list slots (a1a1 quiet), never generated
const EMPTY_MOVE: Move = Move(0);

/// List of moves with fixed-size backing array.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [EMPTY_MOVE; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    #[must_use]
    pub fn first(&self) -> Option<Move> {
        self.as_slice().first().copied()
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

/// Owning iterator over moves in a `MoveList`
pub struct MoveListIntoIter {
    list: MoveList,
    idx: usize,
}

impl Iterator for MoveListIntoIter {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx < self.list.len {
            let mv = self.list.moves[self.idx];
            self.idx += 1;
            Some(mv)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MoveListIntoIter {}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = MoveListIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        MoveListIntoIter { list: self, idx: 0 }
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.as_slice()[idx]
    }
}

/// A move with its ordering score.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Moves with ordering scores, consumed best-first.
pub(crate) struct ScoredMoveList {
    moves: Vec<ScoredMove>,
    next: usize,
}

impl ScoredMoveList {
    pub(crate) fn new<F>(moves: &MoveList, mut score: F) -> Self
    where
        F: FnMut(Move) -> i32,
    {
        let moves = moves
            .iter()
            .map(|&mv| ScoredMove {
                mv,
                score: score(mv),
            })
            .collect();
        ScoredMoveList { moves, next: 0 }
    }

    pub(crate) fn len(&self) -> usize {
        self.moves.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl Iterator for ScoredMoveList {
    type Item = ScoredMove;

    /// Incremental selection sort: cutoffs usually come early, so a full
    /// sort would mostly be wasted.
    fn next(&mut self) -> Option<ScoredMove> {
        let rest = self.moves.get(self.next..)?;
        let (offset, _) = rest
            .iter()
            .enumerate()
            .max_by_key(|(i, sm)| (sm.score, std::cmp::Reverse(*i)))?;
        self.moves.swap(self.next, self.next + offset);
        let picked = self.moves[self.next];
        self.next += 1;
        Some(picked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_move_fields() {
        let mv = Move::capture(sq("e4"), sq("d5"));
        assert_eq!(mv.from(), sq("e4"));
        assert_eq!(mv.to(), sq("d5"));
        assert!(mv.is_capture());
        assert!(!mv.is_promotion());
        assert_eq!(mv.to_string(), "e4d5");
    }

    #[test]
    fn test_promotion_kinds() {
        for piece in [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight] {
            let quiet = Move::promotion(sq("a7"), sq("a8"), piece, false);
            let capture = Move::promotion(sq("a7"), sq("b8"), piece, true);
            assert_eq!(quiet.promotion_piece(), Some(piece));
            assert_eq!(capture.promotion_piece(), Some(piece));
            assert!(!quiet.is_capture());
            assert!(capture.is_capture());
        }
        let mv = Move::promotion(sq("e7"), sq("e8"), Piece::Queen, false);
        assert_eq!(mv.to_string(), "e7e8q");
    }

    #[test]
    fn test_u16_round_trip() {
        let mv = Move::castle_kingside(Square::E1, Square::G1);
        assert_eq!(Move::from_u16(mv.as_u16()), mv);
        assert!(mv.is_castling());
        assert!(mv.is_castle_kingside());
    }

    #[test]
    fn test_scored_moves_come_out_best_first() {
        let mut list = MoveList::new();
        list.push(Move::quiet(sq("a2"), sq("a3")));
        list.push(Move::quiet(sq("b2"), sq("b3")));
        list.push(Move::quiet(sq("c2"), sq("c3")));
        let scored = ScoredMoveList::new(&list, |mv| match mv.from().file() {
            0 => 5,
            1 => 50,
            _ => 5,
        });
        assert_eq!(scored.len(), 3);
        let order: Vec<String> = scored.map(|sm| sm.mv.to_string()).collect();
        assert_eq!(order, ["b2b3", "a2a3", "c2c3"]);
    }
}
