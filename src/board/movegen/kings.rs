use super::super::attack_tables::king_attacks;
use super::super::{Bitboard, Board, Color, ColoredPiece, Piece, Square};
use super::Legality;

impl Board {
    /// Legal king destinations, castling included
    pub(crate) fn king_targets(&self, from: Square, side: Color, legality: &Legality) -> Bitboard {
        let own = self.position.color_occupied(side);
        let steps = king_attacks(from) & !own & !legality.covered;
        steps | self.castling_targets(from, side, legality)
    }

    fn castling_targets(&self, from: Square, side: Color, legality: &Legality) -> Bitboard {
        let home = match side {
            Color::White => Square::E1,
            Color::Black => Square::E8,
        };
        if from != home || legality.in_check() {
            return Bitboard::EMPTY;
        }

        let rank = side.back_rank();
        let on_rank = |file: usize| Square::from_index_unchecked(rank * 8 + file);
        let rook = Some(ColoredPiece::new(Piece::Rook, side));
        let occupied = self.position.occupied();
        let mut targets = Bitboard::EMPTY;

        // (kingside, rook file, files that must be empty, files the king crosses)
        let wings: [(bool, usize, &[usize], [usize; 2]); 2] =
            [(true, 7, &[5, 6], [5, 6]), (false, 0, &[1, 2, 3], [3, 2])];
        for (kingside, rook_file, empty, path) in wings {
            if !self.castling.has(side, kingside) || self.piece_at(on_rank(rook_file)) != rook {
                continue;
            }
            if empty.iter().any(|&f| occupied.contains(on_rank(f))) {
                continue;
            }
            if path.iter().any(|&f| legality.covered.contains(on_rank(f))) {
                continue;
            }
            targets.set(on_rank(path[1]));
        }
        targets
    }
}
