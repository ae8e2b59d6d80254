use super::super::attack_tables::{bishop_attacks, knight_attacks, pawn_attacks, rook_attacks};
use super::super::{Bitboard, Board, Color, Piece, Square};
use super::Legality;

impl Board {
    /// Legal pawn destinations from `from`, en passant included
    pub(crate) fn pawn_targets(
        &self,
        from: Square,
        side: Color,
        legality: &Legality,
        en_passant: Option<Square>,
    ) -> Bitboard {
        let empty = !self.position.occupied();
        let enemy = self.position.color_occupied(side.opponent());
        let pawn = Bitboard::from_square(from);

        let (single, double) = match side {
            Color::White => {
                let single = pawn.north() & empty;
                (single, (single & Bitboard::rank_mask(2)).north() & empty)
            }
            Color::Black => {
                let single = pawn.south() & empty;
                (single, (single & Bitboard::rank_mask(5)).south() & empty)
            }
        };
        let captures = pawn_attacks(from, side) & enemy;
        let mut targets = (single | double | captures) & legality.allowed(from);

        if let Some(ep) = en_passant {
            if empty.contains(ep)
                && pawn_attacks(from, side).contains(ep)
                && self.en_passant_is_safe(from, ep, side)
            {
                targets.set(ep);
            }
        }
        targets
    }

    /// Play the en passant capture out on the bitboards and test whether the
    /// mover's king would be attacked afterwards.
    fn en_passant_is_safe(&self, from: Square, ep: Square, side: Color) -> bool {
        let Some(victim) = ep.offset_rank(-side.pawn_direction()) else {
            return false;
        };
        let pos = &self.position;
        let enemy = side.opponent();
        let king = pos.king_square(side);
        let occupied = (pos.occupied()
            ^ Bitboard::from_square(from)
            ^ Bitboard::from_square(victim))
            | Bitboard::from_square(ep);

        let diagonal = pos.pieces(Piece::Bishop, enemy) | pos.pieces(Piece::Queen, enemy);
        let straight = pos.pieces(Piece::Rook, enemy) | pos.pieces(Piece::Queen, enemy);
        if !pos.pieces(Piece::Pawn, enemy).contains(victim) {
            return false;
        }
        let pawns = pos.pieces(Piece::Pawn, enemy) & !Bitboard::from_square(victim);

        (bishop_attacks(king, occupied) & diagonal).is_empty()
            && (rook_attacks(king, occupied) & straight).is_empty()
            && (knight_attacks(king) & pos.pieces(Piece::Knight, enemy)).is_empty()
            && (pawn_attacks(king, side) & pawns).is_empty()
    }
}
