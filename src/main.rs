use std::env;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use chess_position_engine::board::{mate_in, SearchLimits, START_FEN};
use chess_position_engine::{Board, EngineConfig, EngineController};

const USAGE: &str = "usage:
  chess_position_engine perft <depth> [fen]
  chess_position_engine divide <depth> [fen]
  chess_position_engine search <depth> [fen]
  chess_position_engine movetime <millis> [fen]
  chess_position_engine eval [fen]
  chess_position_engine moves [fen]";

fn parse_number<T: std::str::FromStr>(arg: Option<&String>, what: &str) -> Result<T, String> {
    let text = arg.ok_or_else(|| format!("missing {what}"))?;
    text.parse()
        .map_err(|_| format!("invalid {what}: {text}"))
}

/// The FEN is whatever follows the numeric argument, so it may be passed
/// unquoted.
fn fen_from(args: &[String]) -> String {
    if args.is_empty() {
        START_FEN.to_string()
    } else {
        args.join(" ")
    }
}

fn load(fen: &str) -> Result<Board, String> {
    Board::try_from_fen(fen).map_err(|err| format!("bad fen: {err}"))
}

fn run(args: &[String]) -> Result<(), String> {
    let command = args.first().ok_or_else(|| USAGE.to_string())?;
    match command.as_str() {
        "perft" => {
            let depth: usize = parse_number(args.get(1), "depth")?;
            let mut board = load(&fen_from(&args[2..]))?;
            let start = Instant::now();
            let nodes = board.perft(depth);
            let elapsed = start.elapsed();
            println!("perft({depth}) = {nodes} in {elapsed:?}");
        }
        "divide" => {
            let depth: usize = parse_number(args.get(1), "depth")?;
            let mut board = load(&fen_from(&args[2..]))?;
            let counts = board.perft_divide(depth);
            for (mv, nodes) in &counts {
                println!("{mv}: {nodes}");
            }
            let total: u64 = counts.iter().map(|(_, nodes)| nodes).sum();
            println!("\nmoves: {}  nodes: {total}", counts.len());
        }
        "search" | "movetime" => {
            let limit: u64 = parse_number(args.get(1), "limit")?;
            let fen = fen_from(&args[2..]);
            let limits = if command == "search" {
                SearchLimits::depth(limit as u32)
            } else {
                SearchLimits::time(Duration::from_millis(limit))
            };
            let mut engine = EngineController::new(EngineConfig::default());
            engine
                .load_position(&fen)
                .map_err(|err| format!("bad fen: {err}"))?;
            let result = engine.choose_move(limits);
            match result.best_move {
                Some(mv) => println!(
                    "bestmove {mv} ({})",
                    engine.board().move_name(mv)
                ),
                None => println!("bestmove none"),
            }
            match mate_in(result.score) {
                Some(moves) => println!("score mate {moves}"),
                None => println!("score cp {}", result.score),
            }
            println!(
                "depth {} nodes {} tt hits {} time {:?}{}",
                result.depth,
                result.nodes,
                result.tt_hits,
                result.elapsed,
                if result.aborted { " (stopped)" } else { "" }
            );
        }
        "eval" => {
            let board = load(&fen_from(&args[1..]))?;
            let side = board.side_to_move();
            println!("{:?} to move: {}", side, board.evaluate(side));
            println!("endgame: {}", board.is_endgame());
        }
        "moves" => {
            let board = load(&fen_from(&args[1..]))?;
            let moves = board.generate_moves();
            for mv in &moves {
                println!("{mv}  {}", board.move_name(*mv));
            }
            println!("legal moves: {}", moves.len());
            if board.is_checkmate() {
                println!("checkmate");
            } else if board.is_stalemate() {
                println!("stalemate");
            }
        }
        other => return Err(format!("unknown command {other}\n{USAGE}")),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
