//! Chess board representation and game logic.
//!
//! Uses bitboards for move generation and evaluation, and supports the full
//! rules: castling, en passant and all promotions.
//!
//! # Example
//! ```
//! use chess_position_engine::board::{Board, Color};
//!
//! let board = Board::new();
//! let moves = board.legal_moves(Color::White);
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod attack_tables;
mod error;
mod eval;
mod fen;
mod make_unmake;
mod movegen;
mod notation;
mod perft;
mod position;
mod pst;
mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use error::{FenError, MoveError, SquareError};
pub use fen::START_FEN;
pub use position::Position;
pub use state::{Board, NullMoveRecord, UndoRecord};
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, ColoredPiece, Move, MoveList,
    MoveListIntoIter, Piece, Square,
};

// Public API - search functions and configuration
pub use search::{
    find_best_move, mate_in, search, ProgressCallback, SearchConfig, SearchLimits,
    SearchProgress, SearchResult, SearchState, SearchStats, DEFAULT_MAX_DEPTH, INFINITY,
    MATE_SCORE, MATE_THRESHOLD,
};

pub(crate) use types::ScoredMoveList;
