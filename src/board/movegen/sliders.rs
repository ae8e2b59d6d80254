use super::super::attack_tables::{bishop_attacks, queen_attacks, rook_attacks};
use super::super::{Bitboard, Board, Color, Piece, Square};

impl Board {
    /// Pseudo-legal destinations for the bishop, rook or queen on `from`
    pub(crate) fn slider_targets(&self, from: Square, piece: Piece, side: Color) -> Bitboard {
        let occupied = self.position.occupied();
        let attacks = match piece {
            Piece::Bishop => bishop_attacks(from, occupied),
            Piece::Rook => rook_attacks(from, occupied),
            Piece::Queen => queen_attacks(from, occupied),
            _ => unreachable!("{piece:?} is not a slider"),
        };
        attacks & !self.position.color_occupied(side)
    }

    /// Squares attacked by `color`'s sliders under the given occupancy
    pub(crate) fn slider_cover(&self, color: Color, occupied: Bitboard) -> Bitboard {
        let pos = &self.position;
        let diagonal = pos.pieces(Piece::Bishop, color) | pos.pieces(Piece::Queen, color);
        let straight = pos.pieces(Piece::Rook, color) | pos.pieces(Piece::Queen, color);

        let mut covered = Bitboard::EMPTY;
        for sq in diagonal {
            covered |= bishop_attacks(sq, occupied);
        }
        for sq in straight {
            covered |= rook_attacks(sq, occupied);
        }
        covered
    }
}
