//! Core search implementation.
//!
//! This module implements:
//! - Negamax alpha-beta over legal moves
//! - Mate distance pruning below the root
//! - Transposition table cutoffs below the root
//! - Repetition and fifty-move draws
//! - Cooperative cancellation: once stopped, every node resolves to a
//!   quiescence score and nothing more is stored in the table

mod iterative;
mod quiescence;

pub(super) use iterative::run;

use std::time::{Duration, Instant};

use crate::sync::StopFlag;
use crate::tt::{BoundType, TranspositionTable};

use super::super::{Board, Move, ScoredMoveList};
use super::constants::{DRAW_SCORE, MATE_SCORE, MATE_THRESHOLD, TIME_CHECK_INTERVAL};
use super::move_order::order_score;
use super::{ProgressCallback, SearchProgress};

/// Search context for a single search
pub(crate) struct SearchContext<'a> {
    pub board: &'a mut Board,
    pub tt: &'a mut TranspositionTable,
    pub stop: &'a StopFlag,
    pub start_time: Instant,
    pub move_time: Option<Duration>,
    /// Node count at which the clock is next read
    pub next_time_check: u64,
    /// Hashes of positions reached in the game before the root
    pub history: &'a [u64],
    /// Hashes of positions on the current line below the root
    pub path: Vec<u64>,
    pub nodes: u64,
    pub tt_hits: u64,
    pub root_depth: u32,
    /// Best root move and score of the iteration in progress
    pub root_best: Option<(Move, i32)>,
    pub progress: Option<ProgressCallback>,
}

#[inline]
fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_THRESHOLD
}

impl SearchContext<'_> {
    /// Poll the stop flag, raising it first if the time budget is spent.
    fn should_stop(&mut self) -> bool {
        if self.stop.is_stopped() {
            return true;
        }
        if let Some(limit) = self.move_time {
            if self.nodes >= self.next_time_check {
                self.next_time_check = self.nodes + TIME_CHECK_INTERVAL;
                if self.start_time.elapsed() >= limit {
                    self.stop.stop();
                    return true;
                }
            }
        }
        false
    }

    /// Times `hash` occurs in the game history and on the current line
    fn occurrences(&self, hash: u64) -> usize {
        self.history
            .iter()
            .chain(self.path.iter())
            .filter(|&&h| h == hash)
            .count()
    }

    /// Whether the position just reached by a move is drawn by repetition
    /// (seen twice before) or by the fifty-move rule.
    fn is_draw(&self) -> bool {
        self.board.is_fifty_move_draw() || self.occurrences(self.board.hash()) >= 2
    }

    fn publish(&self, best_move: Move, score: i32) {
        if let Some(callback) = &self.progress {
            callback(&SearchProgress {
                depth: self.root_depth,
                best_move,
                score,
                nodes: self.nodes,
                elapsed: self.start_time.elapsed(),
            });
        }
    }

    /// Ordered legal moves for the side to move
    pub(crate) fn ordered_moves(&self, tt_move: Option<Move>) -> ScoredMoveList {
        let board: &Board = &*self.board;
        let moves = board.generate_moves();
        let endgame = board.is_endgame();
        ScoredMoveList::new(&moves, |mv| order_score(board, mv, endgame, tt_move))
    }

    pub(crate) fn alphabeta(&mut self, depth: u32, mut alpha: i32, mut beta: i32, ply: u32) -> i32 {
        if self.should_stop() {
            return self.quiesce(alpha, beta);
        }
        self.nodes += 1;
        let is_root = ply == 0;

        // Mate distance pruning
        if !is_root {
            alpha = alpha.max(-MATE_SCORE + ply as i32);
            beta = beta.min(MATE_SCORE - ply as i32);
            if alpha >= beta {
                return alpha;
            }
        }

        if depth == 0 {
            return self.quiesce(alpha, beta);
        }

        let hash = self.board.hash();
        if !is_root {
            if let Some(score) = self.tt.lookup(hash, depth, alpha, beta) {
                self.tt_hits += 1;
                return score;
            }
        }

        let tt_move = self.tt.probe(hash).and_then(|entry| entry.best_move());
        let moves = self.ordered_moves(tt_move);
        if moves.is_empty() {
            return if self.board.is_in_check(self.board.side_to_move()) {
                -MATE_SCORE + ply as i32
            } else {
                DRAW_SCORE
            };
        }

        let mut bound = BoundType::UpperBound;
        let mut best_move = None;

        for scored in moves {
            let mv = scored.mv;
            let record = self.board.make_move(mv);
            let score = if self.is_draw() {
                DRAW_SCORE
            } else {
                self.path.push(self.board.hash());
                let score = -self.alphabeta(depth - 1, -beta, -alpha, ply + 1);
                self.path.pop();
                score
            };
            self.board.undo_move(record);

            if score >= beta {
                if !self.stop.is_stopped() && !is_mate_score(beta) {
                    self.tt.store(hash, depth, beta, BoundType::LowerBound, Some(mv));
                }
                return score;
            }

            if score > alpha {
                alpha = score;
                bound = BoundType::Exact;
                best_move = Some(mv);
                if is_root && !self.stop.is_stopped() {
                    self.root_best = Some((mv, score));
                    self.publish(mv, score);
                }
            }
        }

        if !self.stop.is_stopped() && !is_mate_score(alpha) {
            self.tt.store(hash, depth, alpha, bound, best_move);
        }
        alpha
    }
}
