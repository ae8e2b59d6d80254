//! Leaf-node counting over the legal move tree.

use super::types::{Color, Move};
use super::Board;

impl Board {
    /// Number of leaf nodes `depth` plies below the current position.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.generate_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in &moves {
            let record = self.make_move(*mv);
            nodes += self.perft(depth - 1);
            self.undo_move(record);
        }
        nodes
    }

    /// Perft with `side` to move. When it is the other side's turn a null
    /// move is played first, which also clears any en passant target.
    pub fn perft_for(&mut self, side: Color, depth: usize) -> u64 {
        if side == self.side_to_move {
            return self.perft(depth);
        }
        let record = self.make_null_move();
        let nodes = self.perft(depth);
        self.unmake_null_move(record);
        nodes
    }

    /// Leaf counts below each root move.
    pub fn perft_divide(&mut self, depth: usize) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }
        let moves = self.generate_moves();
        let mut counts = Vec::with_capacity(moves.len());
        for mv in &moves {
            let record = self.make_move(*mv);
            counts.push((*mv, self.perft(depth - 1)));
            self.undo_move(record);
        }
        counts
    }
}
