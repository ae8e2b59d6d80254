//! Zobrist hashing for chess positions.
//!
//! Keys are drawn once from a fixed-seed RNG, so hashes are stable across
//! runs. The board keeps its hash updated incrementally; [`position_hash`]
//! is the full recompute the incremental value must always equal.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{CastlingRights, Color, ColoredPiece, Position, Square};

pub(crate) struct ZobristKeys {
    // piece_keys[colored piece slot][square index]
    piece_keys: [[u64; 64]; 12],
    black_to_move_key: u64,
    // one key per castling flag, in CastlingRights bit order (K, Q, k, q)
    castling_keys: [u64; 4],
    // en_passant_keys[file]
    en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1_234_567_890_u64);
        let mut piece_keys = [[0; 64]; 12];
        let mut castling_keys = [0; 4];
        let mut en_passant_keys = [0; 8];

        for piece in &mut piece_keys {
            for key in piece.iter_mut() {
                *key = rng.gen();
            }
        }

        let black_to_move_key = rng.gen();

        for key in &mut castling_keys {
            *key = rng.gen();
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }

    #[inline]
    pub(crate) fn piece(&self, piece: ColoredPiece, sq: Square) -> u64 {
        self.piece_keys[piece.slot()][sq.index()]
    }

    #[inline]
    pub(crate) fn side(&self) -> u64 {
        self.black_to_move_key
    }

    /// XOR of the keys for every flag set in `rights`
    #[inline]
    pub(crate) fn castling(&self, rights: CastlingRights) -> u64 {
        let bits = rights.as_u8();
        self.castling_keys
            .iter()
            .enumerate()
            .filter(|(i, _)| bits & (1 << *i) != 0)
            .fold(0, |acc, (_, key)| acc ^ key)
    }

    #[inline]
    pub(crate) fn en_passant(&self, target: Option<Square>) -> u64 {
        target.map_or(0, |sq| self.en_passant_keys[sq.file()])
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

/// Full hash of a position and its game state.
#[must_use]
pub fn position_hash(
    position: &Position,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
) -> u64 {
    let keys = &*ZOBRIST;
    let mut hash = position
        .iter()
        .fold(0, |acc, (sq, piece)| acc ^ keys.piece(piece, sq));

    if side_to_move == Color::Black {
        hash ^= keys.side();
    }
    hash ^= keys.castling(castling);
    hash ^= keys.en_passant(en_passant);
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    #[test]
    fn test_keys_are_deterministic() {
        let a = ZobristKeys::new();
        let b = ZobristKeys::new();
        assert_eq!(a.piece_keys, b.piece_keys);
        assert_eq!(a.black_to_move_key, b.black_to_move_key);
    }

    #[test]
    fn test_each_state_component_changes_hash() {
        let mut pos = Position::empty();
        pos.create_piece(Square::E1, ColoredPiece::new(Piece::King, Color::White));
        pos.create_piece(Square::E8, ColoredPiece::new(Piece::King, Color::Black));

        let base = position_hash(&pos, Color::White, CastlingRights::none(), None);
        assert_ne!(
            base,
            position_hash(&pos, Color::Black, CastlingRights::none(), None)
        );
        assert_ne!(
            base,
            position_hash(&pos, Color::White, CastlingRights::all(), None)
        );
        assert_ne!(
            base,
            position_hash(
                &pos,
                Color::White,
                CastlingRights::none(),
                Some("d6".parse().unwrap())
            )
        );
    }

    #[test]
    fn test_en_passant_key_depends_on_file_only() {
        let keys = &*ZOBRIST;
        let d6: Square = "d6".parse().unwrap();
        let d3: Square = "d3".parse().unwrap();
        assert_eq!(keys.en_passant(Some(d6)), keys.en_passant(Some(d3)));
        assert_eq!(keys.en_passant(None), 0);
    }
}
