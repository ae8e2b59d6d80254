//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Leaf counts against published reference values
//! - `make_unmake.rs` - Make/undo correctness, castling rights, hashing
//! - `movegen.rs` - Check, pins, castling legality and special moves
//! - `proptest.rs` - Property-based tests over random playouts
//! - `search.rs` - Search results, draws and cancellation
//! - `eval.rs` - Static evaluation terms

mod make_unmake;
mod perft;
mod search;

use crate::board::Square;

pub(super) fn sq(name: &str) -> Square {
    name.parse().expect("valid square name")
}
