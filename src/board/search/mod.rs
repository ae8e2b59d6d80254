//! Search module implementing alpha-beta with iterative deepening.
//!
//! Features:
//! - Iterative deepening that keeps the last completed iteration on abort
//! - Negamax alpha-beta with mate distance pruning
//! - Fail-hard quiescence search over captures
//! - Move ordering (TT move, capture value delta, piece-square delta)
//! - Transposition table for cutoffs and move ordering
//! - Draw detection by repetition and the fifty-move rule

mod alphabeta;
mod constants;
mod move_order;

use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sync::StopFlag;
use crate::tt::{TranspositionTable, DEFAULT_TT_ENTRIES};

use super::{Board, Move};
pub use constants::{DEFAULT_MAX_DEPTH, INFINITY, MATE_SCORE, MATE_THRESHOLD};

/// Outcome of a search with its diagnostic counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` only when the side to move has no legal move
    pub best_move: Option<Move>,
    /// Score of the last completed iteration, from the mover's view
    pub score: i32,
    /// Deepest completed iteration (0 if none completed)
    pub depth: u32,
    /// Main and quiescence nodes
    pub nodes: u64,
    pub tt_hits: u64,
    pub elapsed: Duration,
    /// Full moves to mate: positive when the mover mates, negative when mated
    pub mate_in: Option<i32>,
    /// The search was stopped before reaching its depth limit
    pub aborted: bool,
}

/// Snapshot published when the root best move improves or an iteration
/// completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchProgress {
    pub depth: u32,
    pub best_move: Move,
    pub score: i32,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Callback type for progress snapshots.
pub type ProgressCallback = Arc<dyn Fn(&SearchProgress) + Send + Sync>;

/// Convert a score to full moves until mate, if it is a mate score.
#[must_use]
pub fn mate_in(score: i32) -> Option<i32> {
    if score >= MATE_THRESHOLD {
        Some((MATE_SCORE - score + 1) / 2)
    } else if score <= -MATE_THRESHOLD {
        Some(-(MATE_SCORE + score) / 2)
    } else {
        None
    }
}

/// Depth and time budget of one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchLimits {
    /// Deepest iteration to run; `None` runs up to the configured maximum
    pub depth: Option<u32>,
    /// Wall-clock budget; the search stops itself when it runs out
    pub move_time: Option<Duration>,
}

impl SearchLimits {
    #[must_use]
    pub fn depth(depth: u32) -> Self {
        SearchLimits {
            depth: Some(depth),
            move_time: None,
        }
    }

    #[must_use]
    pub fn time(move_time: Duration) -> Self {
        SearchLimits {
            depth: None,
            move_time: Some(move_time),
        }
    }

    /// No limit beyond the maximum depth; runs until stopped
    #[must_use]
    pub fn infinite() -> Self {
        SearchLimits::default()
    }
}

/// Counters accumulated across searches
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub tt_hits: u64,
    pub total_nodes: u64,
    pub searches: u64,
}

impl SearchStats {
    fn record(&mut self, result: &SearchResult) {
        self.nodes = result.nodes;
        self.tt_hits = result.tt_hits;
        self.total_nodes = self.total_nodes.saturating_add(result.nodes);
        self.searches += 1;
    }
}

/// Search state persisted across searches
pub struct SearchState {
    pub tt: TranspositionTable,
    pub stats: SearchStats,
}

impl SearchState {
    #[must_use]
    pub fn new(tt_entries: usize) -> Self {
        SearchState {
            tt: TranspositionTable::new(tt_entries),
            stats: SearchStats::default(),
        }
    }

    /// Forget everything learned about earlier positions.
    pub fn clear(&mut self) {
        self.tt.clear();
        self.stats = SearchStats::default();
    }

    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        self.tt.hashfull_per_mille()
    }
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState::new(DEFAULT_TT_ENTRIES)
    }
}

/// Configuration for a search operation.
#[derive(Clone, Default)]
pub struct SearchConfig {
    /// Maximum depth to search (None = up to `DEFAULT_MAX_DEPTH`)
    pub max_depth: Option<u32>,
    pub move_time: Option<Duration>,
    /// Hashes of the positions already reached in the game, oldest first
    pub history: Vec<u64>,
    pub progress: Option<ProgressCallback>,
}

impl SearchConfig {
    #[must_use]
    pub fn depth(max_depth: u32) -> Self {
        SearchConfig {
            max_depth: Some(max_depth),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn from_limits(limits: &SearchLimits) -> Self {
        SearchConfig {
            max_depth: limits.depth,
            move_time: limits.move_time,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_history(mut self, history: Vec<u64>) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }
}

/// Run an iterative-deepening search from the current position.
///
/// The board is restored before returning. Raising `stop` ends the search
/// early with the result of the last completed iteration.
#[allow(clippy::needless_pass_by_value)]
pub fn search(
    board: &mut Board,
    state: &mut SearchState,
    config: SearchConfig,
    stop: &StopFlag,
) -> SearchResult {
    let max_depth = config.max_depth.unwrap_or(DEFAULT_MAX_DEPTH).max(1);
    state.tt.new_search();
    log::info!(
        "search start: fen {} max depth {} move time {:?}",
        board.to_fen(),
        max_depth,
        config.move_time
    );

    let result = alphabeta::run(
        board,
        &mut state.tt,
        stop,
        config.move_time,
        &config.history,
        config.progress.clone(),
        max_depth,
    );

    state.stats.record(&result);
    log::info!(
        "search done: best {} score {} depth {} nodes {} tt hits {} in {:?}{}",
        result
            .best_move
            .map_or_else(|| "none".to_string(), |m| m.to_string()),
        result.score,
        result.depth,
        result.nodes,
        result.tt_hits,
        result.elapsed,
        if result.aborted { " (aborted)" } else { "" }
    );
    result
}

/// Find the best move with a fixed depth limit.
pub fn find_best_move(
    board: &mut Board,
    state: &mut SearchState,
    max_depth: u32,
    stop: &StopFlag,
) -> Option<Move> {
    search(board, state, SearchConfig::depth(max_depth), stop).best_move
}
