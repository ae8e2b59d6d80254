use serde::Deserialize;

use chess_position_engine::board::{search, Board, SearchConfig, SearchState};
use chess_position_engine::sync::StopFlag;

#[derive(Deserialize)]
struct ProblemSet {
    problems: Vec<Problem>,
}

#[derive(Deserialize)]
struct Problem {
    name: String,
    fen: String,
    solution: String,
}

fn problems() -> Vec<Problem> {
    let data = include_str!("data/mate_in_one.json");
    let set: ProblemSet = serde_json::from_str(data).expect("invalid mate_in_one.json");
    set.problems
}

#[test]
fn listed_solutions_mate() {
    for problem in problems() {
        let mut board = Board::from_fen(&problem.fen);
        let mv = board
            .parse_move(&problem.solution)
            .unwrap_or_else(|e| panic!("{}: {e}", problem.name));
        let _ = board.make_move(mv);
        assert!(
            board.is_checkmate(),
            "{}: {} is not mate",
            problem.name,
            problem.solution
        );
    }
}

#[test]
fn search_finds_a_mate() {
    for problem in problems() {
        let mut board = Board::from_fen(&problem.fen);
        let mut state = SearchState::new(1 << 16);
        let result = search(&mut board, &mut state, SearchConfig::depth(3), &StopFlag::new());

        assert_eq!(result.mate_in, Some(1), "{}: no mate found", problem.name);
        let best = result
            .best_move
            .unwrap_or_else(|| panic!("{}: no move", problem.name));
        let _ = board.make_move(best);
        assert!(
            board.is_checkmate(),
            "{}: {} does not mate",
            problem.name,
            best
        );
    }
}

#[test]
fn mate_names_end_with_hash() {
    for problem in problems() {
        let board = Board::from_fen(&problem.fen);
        let mv = board.parse_move(&problem.solution).expect("legal solution");
        let name = board.move_name(mv);
        assert!(name.ends_with('#'), "{}: named {name}", problem.name);
    }
}
