//! Core chess types.
//!
//! This module contains the fundamental types used throughout the engine:
//! - `Piece`, `Color` and the packed `ColoredPiece`
//! - `Square` - board square as an index 0-63
//! - `Bitboard` - 64-bit set of squares
//! - `Move` and `MoveList` - move representation
//! - `CastlingRights` - castling state

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::CastlingRights;
pub use moves::{Move, MoveList, MoveListIntoIter};
pub use piece::{Color, ColoredPiece, Piece};
pub use square::Square;

pub(crate) use moves::ScoredMoveList;
pub(crate) use piece::PROMOTION_PIECES;
