//! Search tests to verify the engine finds correct moves in various positions.

use chess_position_engine::board::{find_best_move, search, Board, SearchConfig, SearchState};
use chess_position_engine::sync::StopFlag;

fn best_move(fen: &str, depth: u32) -> Option<String> {
    let mut board = Board::from_fen(fen);
    let mut state = SearchState::new(1 << 16);
    find_best_move(&mut board, &mut state, depth, &StopFlag::new()).map(|m| m.to_string())
}

/// Test that the engine finds a simple mate in 1
#[test]
fn finds_mate_in_one_back_rank() {
    // White to move, Qe8# is mate
    assert_eq!(
        best_move("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1", 4).as_deref(),
        Some("e1e8"),
        "Should find Qe8# (back rank mate)"
    );
}

/// Test that the engine finds a simple mate in 1 with queen
#[test]
fn finds_mate_in_one_queen() {
    // White to move, Qxf7# is mate
    assert_eq!(
        best_move(
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 4",
            4
        )
        .as_deref(),
        Some("h5f7"),
        "Should find Qxf7# (scholar's mate)"
    );
}

/// Test that the engine avoids giving away material
#[test]
fn avoids_hanging_queen() {
    let best = best_move(
        "r1bqkbnr/pppppppp/2n5/8/4P3/5Q2/PPPP1PPP/RNB1KBNR w KQkq - 0 3",
        3,
    );
    assert!(best.is_some(), "Should find a move");
    assert_ne!(best.as_deref(), Some("f3c6"), "Should not trade the queen for a knight");
}

/// Test that the engine captures free material
#[test]
fn captures_free_rook() {
    // The a8 rook is undefended and on the bishop's diagonal
    assert_eq!(
        best_move("r3k3/8/8/8/8/8/6B1/4K3 w - - 0 1", 3).as_deref(),
        Some("g2a8")
    );
}

/// Test iterative deepening produces legal moves at every depth
#[test]
fn iterative_deepening_consistency() {
    let mut board = Board::new();
    let mut state = SearchState::new(1 << 16);
    let stop = StopFlag::new();

    let best2 = find_best_move(&mut board, &mut state, 2, &stop).expect("depth 2 move");
    let best4 = find_best_move(&mut board, &mut state, 4, &stop).expect("depth 4 move");

    let moves = board.generate_moves();
    assert!(moves.contains(best2), "Depth 2 move should be legal");
    assert!(moves.contains(best4), "Depth 4 move should be legal");
}

/// Test that search handles single legal move positions
#[test]
fn single_legal_move() {
    // The h1 rook checks along the first rank and the c4 knight covers b2
    let mut board = Board::from_fen("7k/8/8/8/2n5/8/8/K6r w - - 0 1");
    assert_eq!(board.generate_moves().len(), 1);
    let mut state = SearchState::new(1 << 10);
    let best = find_best_move(&mut board, &mut state, 4, &StopFlag::new());
    assert_eq!(best.map(|m| m.to_string()).as_deref(), Some("a1a2"));
}

/// Test that search returns None for checkmate position
#[test]
fn no_move_in_checkmate() {
    // Fool's mate: White is checkmated
    let mut board =
        Board::from_fen("rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 3");
    assert!(board.is_checkmate(), "Position should be checkmate");

    let mut state = SearchState::new(1 << 10);
    let result = search(&mut board, &mut state, SearchConfig::depth(4), &StopFlag::new());
    assert!(result.best_move.is_none(), "Should return None for checkmate position");
    assert_eq!(result.mate_in, Some(0));
}

/// Test that stalemate is correctly identified
#[test]
fn identifies_stalemate() {
    let board = Board::from_fen("k7/8/1QK5/8/8/8/8/8 b - - 0 1");
    assert!(board.is_stalemate(), "Position should be stalemate");
    assert!(!board.is_checkmate(), "Position should not be checkmate");
}

/// Test that search completes at reasonable depth
#[test]
fn search_completes_at_depth_4() {
    let mut board = Board::new();
    let mut state = SearchState::default();
    let result = search(&mut board, &mut state, SearchConfig::depth(4), &StopFlag::new());

    assert!(result.best_move.is_some(), "Should find a move at depth 4");
    assert_eq!(result.depth, 4);
    assert!(!result.aborted);
    assert!(
        result.elapsed.as_secs() < 120,
        "Search at depth 4 took too long: {:?}",
        result.elapsed
    );
}

/// Test the search finds a mate for the side to move when it is Black
#[test]
fn finds_back_rank_mate_for_black() {
    let mut board = Board::from_fen("1r4k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1");
    let mut state = SearchState::new(1 << 16);
    let result = search(&mut board, &mut state, SearchConfig::depth(4), &StopFlag::new());
    assert_eq!(result.mate_in, Some(1));
    assert_eq!(result.best_move.map(|m| m.to_string()).as_deref(), Some("b8b1"));
}
