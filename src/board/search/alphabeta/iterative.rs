use std::time::{Duration, Instant};

use super::super::constants::{DRAW_SCORE, INFINITY, MATE_SCORE, MATE_THRESHOLD};
use super::super::{mate_in, ProgressCallback, SearchResult};
use super::SearchContext;
use crate::board::Board;
use crate::sync::StopFlag;
use crate::tt::TranspositionTable;

impl SearchContext<'_> {
    /// Deepen one ply at a time until `max_depth`, a mate, or a stop.
    pub fn iterative_deepening(&mut self, max_depth: u32) -> SearchResult {
        let side = self.board.side_to_move();
        let mut result = SearchResult {
            best_move: None,
            score: DRAW_SCORE,
            depth: 0,
            nodes: 0,
            tt_hits: 0,
            elapsed: Duration::ZERO,
            mate_in: None,
            aborted: false,
        };

        // First move in ordering order, played if no iteration completes
        let Some(fallback) = self.ordered_moves(None).next().map(|scored| scored.mv) else {
            if self.board.is_in_check(side) {
                result.score = -MATE_SCORE;
                result.mate_in = Some(0);
            }
            return result;
        };
        result.best_move = Some(fallback);

        for depth in 1..=max_depth {
            self.root_depth = depth;
            self.root_best = None;
            let score = self.alphabeta(depth, -INFINITY, INFINITY, 0);

            if self.stop.is_stopped() {
                log::debug!("depth {depth} aborted after {} nodes", self.nodes);
                result.aborted = true;
                break;
            }

            let (best_move, _) = self.root_best.unwrap_or((fallback, score));
            result.best_move = Some(best_move);
            result.score = score;
            result.depth = depth;
            self.publish(best_move, score);
            log::debug!(
                "depth {depth} best {best_move} score {score} nodes {} time {:?}",
                self.nodes,
                self.start_time.elapsed()
            );

            if score.abs() >= MATE_THRESHOLD {
                break;
            }
        }

        result.nodes = self.nodes;
        result.tt_hits = self.tt_hits;
        result.elapsed = self.start_time.elapsed();
        result.mate_in = mate_in(result.score);
        result
    }
}

/// Search `board` to at most `max_depth` plies.
pub(in crate::board::search) fn run(
    board: &mut Board,
    tt: &mut TranspositionTable,
    stop: &StopFlag,
    move_time: Option<Duration>,
    history: &[u64],
    progress: Option<ProgressCallback>,
    max_depth: u32,
) -> SearchResult {
    let mut ctx = SearchContext {
        board,
        tt,
        stop,
        start_time: Instant::now(),
        move_time,
        next_time_check: 0,
        history,
        path: Vec::with_capacity(max_depth as usize + 1),
        nodes: 0,
        tt_hits: 0,
        root_depth: 0,
        root_best: None,
        progress,
    };
    ctx.iterative_deepening(max_depth)
}
