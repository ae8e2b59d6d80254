use super::SearchContext;

impl SearchContext<'_> {
    /// Fail-hard quiescence search over captures and queen promotions.
    pub fn quiesce(&mut self, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        let stand_pat = self.board.evaluate(self.board.side_to_move());

        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }
        if self.stop.is_stopped() {
            return alpha;
        }

        let captures = {
            let board = &*self.board;
            let endgame = board.is_endgame();
            let list = board.generate_captures();
            crate::board::ScoredMoveList::new(&list, |mv| {
                super::super::move_order::order_score(board, mv, endgame, None)
            })
        };

        for scored in captures {
            let record = self.board.make_move(scored.mv);
            let score = -self.quiesce(-beta, -alpha);
            self.board.undo_move(record);

            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                return beta;
            }
        }
        alpha
    }
}
