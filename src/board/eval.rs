//! Static evaluation.
//!
//! Every term is summed from White's point of view and the total is
//! negated for Black at the end.

use super::attack_tables::king_attacks;
use super::pst::piece_square_value;
use super::types::{Bitboard, Color, Piece, Square};
use super::Board;

/// Combined non-king material at or below which the endgame starts
/// (two rooks, two minors and two pawns).
pub(crate) const ENDGAME_MATERIAL: i32 = 2 * 500 + 2 * 300 + 2 * 100;
/// Material lead that switches on king mop-up in the endgame
const MOP_UP_LEAD: i32 = 300;
const MOP_UP_WEIGHT: i32 = 15;
const CHECK_BONUS: i32 = 50;
const CONTROL_WEIGHT: i32 = 4;
const DOUBLED_PAWN_PENALTY: i32 = 60;
const PAWN_SHIELD_BONUS: i32 = 30;

const CORNERS: [Square; 4] = [Square::A1, Square::H1, Square::A8, Square::H8];

impl Board {
    /// Static score of the position in centipawns from `side`'s view.
    #[must_use]
    pub fn evaluate(&self, side: Color) -> i32 {
        let endgame = self.is_endgame();
        let material = self.material_balance();

        let mut score = material;
        if endgame && material.abs() >= MOP_UP_LEAD {
            let leader = if material > 0 {
                Color::White
            } else {
                Color::Black
            };
            score += leader.sign() * self.mop_up_bonus(leader);
        }
        score += self.check_bonus();
        score += self.piece_square_balance(endgame);
        score += self.control_balance();
        score += self.doubled_pawn_balance();
        score += self.pawn_shield(Color::White) - self.pawn_shield(Color::Black);

        score * side.sign()
    }

    /// Non-king material of both sides
    #[must_use]
    pub fn material_sum(&self) -> i32 {
        self.position
            .iter()
            .map(|(_, piece)| piece.piece().value())
            .sum()
    }

    #[must_use]
    pub fn is_endgame(&self) -> bool {
        self.material_sum() <= ENDGAME_MATERIAL
    }

    fn material_balance(&self) -> i32 {
        self.position
            .iter()
            .map(|(_, piece)| piece.color().sign() * piece.piece().value())
            .sum()
    }

    fn piece_square_balance(&self, endgame: bool) -> i32 {
        self.position
            .iter()
            .map(|(sq, piece)| piece.color().sign() * piece_square_value(piece, sq, endgame))
            .sum()
    }

    /// Reward for driving the losing king to a corner and bringing our
    /// own king close to it.
    fn mop_up_bonus(&self, leader: Color) -> i32 {
        let own_king = self.position.king_square(leader);
        let enemy_king = self.position.king_square(leader.opponent());
        let corner_distance = CORNERS
            .iter()
            .map(|&corner| enemy_king.distance(corner))
            .min()
            .unwrap_or(0) as i32;
        let king_distance = own_king.distance(enemy_king) as i32;
        MOP_UP_WEIGHT * ((7 - corner_distance) + (7 - king_distance))
    }

    fn check_bonus(&self) -> i32 {
        let mut bonus = 0;
        if self.is_in_check(Color::Black) {
            bonus += CHECK_BONUS;
        }
        if self.is_in_check(Color::White) {
            bonus -= CHECK_BONUS;
        }
        bonus
    }

    fn control_balance(&self) -> i32 {
        let white = self.covered_squares(Color::White).popcount() as i32;
        let black = self.covered_squares(Color::Black).popcount() as i32;
        CONTROL_WEIGHT * (white - black)
    }

    fn doubled_pawn_balance(&self) -> i32 {
        let doubled = |color: Color| -> i32 {
            let pawns = self.position.pieces(Piece::Pawn, color);
            (0..8)
                .map(|file| (pawns & Bitboard::file_mask(file)).popcount().saturating_sub(1))
                .sum::<u32>() as i32
        };
        DOUBLED_PAWN_PENALTY * (doubled(Color::Black) - doubled(Color::White))
    }

    /// Bonus for pawns next to the king, ignoring the centre files.
    fn pawn_shield(&self, color: Color) -> i32 {
        let king = self.position.king_square(color);
        let centre = Bitboard::file_mask(3) | Bitboard::file_mask(4);
        let shield = self.position.pieces(Piece::Pawn, color) & king_attacks(king) & !centre;
        PAWN_SHIELD_BONUS * shield.popcount() as i32
    }
}
