use super::super::attack_tables::knight_attacks;
use super::super::{Bitboard, Board, Color, Piece, Square};

impl Board {
    /// Pseudo-legal knight destinations from `from`
    pub(crate) fn knight_targets(&self, from: Square, side: Color) -> Bitboard {
        knight_attacks(from) & !self.position.color_occupied(side)
    }

    pub(crate) fn knight_cover(&self, color: Color) -> Bitboard {
        self.position
            .pieces(Piece::Knight, color)
            .iter()
            .fold(Bitboard::EMPTY, |acc, sq| acc | knight_attacks(sq))
    }
}
