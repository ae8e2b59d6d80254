//! Short human-readable move names for status display.

use super::types::{Move, Piece};
use super::Board;

impl Board {
    /// Name of a legal move in the current position: `O-O`, `Nf3`, `exd5`,
    /// `e8=Q+`, `Qh7#`.
    ///
    /// Names are not disambiguated between two like pieces reaching the
    /// same square.
    ///
    /// # Panics
    ///
    /// Panics if the move's source square is empty.
    #[must_use]
    pub fn move_name(&self, mv: Move) -> String {
        let mut name = String::with_capacity(8);
        if mv.is_castling() {
            name.push_str(if mv.is_castle_kingside() { "O-O" } else { "O-O-O" });
        } else {
            let moved = self
                .piece_at(mv.from())
                .unwrap_or_else(|| panic!("move_name {mv}: no piece on {}", mv.from()));
            if moved.piece() == Piece::Pawn {
                if mv.is_capture() {
                    name.push((b'a' + mv.from().file() as u8) as char);
                }
            } else {
                name.push(moved.piece().to_char().to_ascii_uppercase());
            }
            if mv.is_capture() {
                name.push('x');
            }
            name.push_str(&mv.to().to_string());
            if let Some(promoted) = mv.promotion_piece() {
                name.push('=');
                name.push(promoted.to_char().to_ascii_uppercase());
            }
        }

        let mut after = self.clone();
        let _ = after.make_move(mv);
        if after.is_in_check(after.side_to_move()) {
            name.push(if after.generate_moves().is_empty() { '#' } else { '+' });
        }
        name
    }
}
