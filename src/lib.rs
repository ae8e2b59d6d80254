//! A chess position engine: legal move generation, static evaluation and an
//! iterative-deepening alpha-beta search, driven through
//! [`engine::EngineController`].

pub mod board;
pub mod engine;
pub mod sync;
pub mod tt;
pub mod zobrist;

pub use board::{Board, Color, Move, Piece, Square};
pub use engine::{EngineConfig, EngineController};
pub use tt::TranspositionTable;
