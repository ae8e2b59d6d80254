//! Move ordering for search.

use super::super::pst::piece_square_value;
use super::super::{Board, ColoredPiece, Move, Piece};
use super::constants::{QUIET_MOVE_SCORE, TT_MOVE_SCORE};

/// Ordering score of `mv`: the TT move first, then captures by victim
/// value minus attacker value, with quiet moves at a flat penalty. The
/// positional gain of the moved piece and any promotion gain are added.
pub(crate) fn order_score(board: &Board, mv: Move, endgame: bool, tt_move: Option<Move>) -> i32 {
    if tt_move == Some(mv) {
        return TT_MOVE_SCORE;
    }
    let Some(moved) = board.piece_at(mv.from()) else {
        return QUIET_MOVE_SCORE;
    };

    let victim = if mv.is_en_passant() {
        Some(Piece::Pawn)
    } else {
        board.piece_at(mv.to()).map(|p| p.piece())
    };
    let mut score = match victim {
        Some(victim) => victim.value() - moved.piece().value(),
        None => QUIET_MOVE_SCORE,
    };

    let landed = match mv.promotion_piece() {
        Some(promoted) => {
            score += promoted.value() - Piece::Pawn.value();
            ColoredPiece::new(promoted, moved.color())
        }
        None => moved,
    };
    score += piece_square_value(landed, mv.to(), endgame)
        - piece_square_value(moved, mv.from(), endgame);
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_before_quiet_moves() {
        let board = Board::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
        let capture = board.parse_move("e4d5").unwrap();
        let push = board.parse_move("e4e5").unwrap();
        assert!(order_score(&board, capture, false, None) > order_score(&board, push, false, None));
    }

    #[test]
    fn test_tt_move_first() {
        let board = Board::new();
        let mv = board.parse_move("a2a3").unwrap();
        assert_eq!(order_score(&board, mv, false, Some(mv)), TT_MOVE_SCORE);
    }

    #[test]
    fn test_queen_promotion_beats_knight_promotion() {
        let board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let queen = board.parse_move("a7a8q").unwrap();
        let knight = board.parse_move("a7a8n").unwrap();
        assert!(order_score(&board, queen, false, None) > order_score(&board, knight, false, None));
    }
}
