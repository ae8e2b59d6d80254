//! Search algorithm tests.
//!
//! Tests for alpha-beta, quiescence, draws and cancellation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::board::search::{
    find_best_move, search, SearchConfig, SearchLimits, SearchProgress, SearchState, MATE_SCORE,
};
use crate::board::Board;
use crate::sync::StopFlag;

fn state() -> SearchState {
    SearchState::new(1 << 16)
}

// ============================================================================
// Alpha-beta search tests
// ============================================================================

#[test]
fn alphabeta_finds_mate_in_one() {
    // White to move, Qe8# is mate
    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1");
    let best = find_best_move(&mut board, &mut state(), 3, &StopFlag::new());
    assert_eq!(best.map(|m| m.to_string()), Some("e1e8".to_string()));
}

#[test]
fn alphabeta_returns_mate_score_for_mate_in_one() {
    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1");
    let result = search(&mut board, &mut state(), SearchConfig::depth(6), &StopFlag::new());
    assert_eq!(result.score, MATE_SCORE - 1);
    assert_eq!(result.mate_in, Some(1));
    // Deepening stops once a mate is proven
    assert!(result.depth < 6);
    assert!(!result.aborted);
}

#[test]
fn alphabeta_prefers_shorter_mate() {
    // Rb8# mates at once; other lines mate later
    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/1R1R2K1 w - - 0 1");
    let result = search(&mut board, &mut state(), SearchConfig::depth(4), &StopFlag::new());
    assert_eq!(result.mate_in, Some(1));
    let best = result.best_move.expect("a move").to_string();
    assert!(best == "b1b8" || best == "d1d8", "unexpected {best}");
}

#[test]
fn alphabeta_handles_stalemate() {
    let mut board = Board::from_fen("k7/8/1QK5/8/8/8/8/8 b - - 0 1");
    let result = search(&mut board, &mut state(), SearchConfig::depth(4), &StopFlag::new());
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, 0);
}

#[test]
fn alphabeta_returns_none_for_checkmate_position() {
    let mut board = Board::from_fen("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1");
    let result = search(&mut board, &mut state(), SearchConfig::depth(4), &StopFlag::new());
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, -MATE_SCORE);
}

#[test]
fn alphabeta_wins_hanging_queen() {
    let mut board = Board::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
    let best = find_best_move(&mut board, &mut state(), 3, &StopFlag::new());
    assert_eq!(best.map(|m| m.to_string()), Some("d1d5".to_string()));
}

#[test]
fn quiescence_sees_recapture() {
    // Qxd5 loses the queen to cxd5
    let mut board = Board::from_fen("4k3/8/2p5/3p4/8/8/8/3QK3 w - - 0 1");
    let best = find_best_move(&mut board, &mut state(), 1, &StopFlag::new());
    assert_ne!(best.map(|m| m.to_string()), Some("d1d5".to_string()));
}

#[test]
fn search_restores_board() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let mut board = Board::from_fen(fen);
    let result = search(&mut board, &mut state(), SearchConfig::depth(2), &StopFlag::new());
    assert_eq!(board.to_fen(), fen);
    assert_eq!(board.hash(), board.compute_hash());
    assert_eq!(result.depth, 2);
    assert!(result.nodes > 0);
    assert!(board.generate_moves().contains(result.best_move.expect("a move")));
}

// ============================================================================
// Draw tests
// ============================================================================

#[test]
fn fifty_move_rule_scores_draw() {
    // Every white move is quiet, so each reaches a halfmove clock of 100
    let mut board = Board::from_fen("7k/8/8/8/8/8/Q7/7K w - - 99 80");
    let result = search(&mut board, &mut state(), SearchConfig::depth(3), &StopFlag::new());
    assert_eq!(result.score, 0);
    assert!(result.best_move.is_some());
}

#[test]
fn repetition_scores_draw() {
    let mut board = Board::from_fen("7k/8/8/8/8/8/Q7/7K w - - 0 1");
    let winning = search(&mut board, &mut state(), SearchConfig::depth(2), &StopFlag::new());
    assert!(winning.score > 500);

    // Every reply position has already occurred twice
    let mut history = vec![board.hash()];
    for mv in board.generate_moves() {
        let record = board.make_move(mv);
        history.push(board.hash());
        history.push(board.hash());
        board.undo_move(record);
    }
    let config = SearchConfig::depth(2).with_history(history);
    let drawn = search(&mut board, &mut state(), config, &StopFlag::new());
    assert_eq!(drawn.score, 0);
}

// ============================================================================
// Cancellation and time tests
// ============================================================================

#[test]
fn stopped_search_still_returns_legal_move() {
    let mut board = Board::new();
    let stop = StopFlag::stopped();
    let result = search(&mut board, &mut state(), SearchConfig::depth(8), &stop);
    assert!(result.aborted);
    assert_eq!(result.depth, 0);
    assert!(board.generate_moves().contains(result.best_move.expect("fallback")));
}

#[test]
fn move_time_stops_search() {
    let mut board = Board::new();
    let stop = StopFlag::new();
    let config = SearchConfig::from_limits(&SearchLimits::time(Duration::from_millis(50)));
    let result = search(&mut board, &mut state(), config, &stop);
    assert!(result.aborted);
    assert!(stop.is_stopped());
    assert!(result.depth >= 1);
    assert!(result.elapsed < Duration::from_secs(5));
    assert!(board.generate_moves().contains(result.best_move.expect("a move")));
}

#[test]
fn progress_reports_each_iteration() {
    let mut board = Board::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let deepest = Arc::new(AtomicUsize::new(0));
    let (c, d) = (Arc::clone(&calls), Arc::clone(&deepest));
    let config = SearchConfig::depth(3).with_progress(Arc::new(move |p: &SearchProgress| {
        c.fetch_add(1, Ordering::Relaxed);
        d.fetch_max(p.depth as usize, Ordering::Relaxed);
    }));
    let result = search(&mut board, &mut state(), config, &StopFlag::new());
    assert!(calls.load(Ordering::Relaxed) >= 3);
    assert_eq!(deepest.load(Ordering::Relaxed), result.depth as usize);
}

#[test]
fn transposition_table_reused_across_searches() {
    let mut board = Board::new();
    let mut state = state();
    let first = search(&mut board, &mut state, SearchConfig::depth(4), &StopFlag::new());
    let second = search(&mut board, &mut state, SearchConfig::depth(4), &StopFlag::new());
    assert!(second.tt_hits > 0);
    assert_eq!(state.stats.searches, 2);
    assert_eq!(state.stats.total_nodes, first.nodes + second.nodes);
    assert!(state.hashfull_per_mille() > 0);
}
