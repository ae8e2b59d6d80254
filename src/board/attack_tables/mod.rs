//! Attack tables for move generation.
//!
//! Leaper attacks (knight, king, pawn) are looked up directly. Sliders walk
//! precomputed rays: the first blocker along a ray is found with a bit scan
//! (lowest bit for rays that increase the square index, highest bit for
//! rays that decrease it), and the ray beyond that blocker is masked off.
//!
//! All tables are process-wide and immutable after first use.

mod tables;

use tables::{BETWEEN, EDGE_DISTANCE, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS, RAYS};

use super::types::{Bitboard, Color, Square};

/// The eight ray directions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub(crate) const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub(crate) const STRAIGHT: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub(crate) const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// Square-index delta of one step
    #[inline]
    pub(crate) const fn step(self) -> isize {
        match self {
            Direction::North => 8,
            Direction::NorthEast => 9,
            Direction::East => 1,
            Direction::SouthEast => -7,
            Direction::South => -8,
            Direction::SouthWest => -9,
            Direction::West => -1,
            Direction::NorthWest => 7,
        }
    }

    #[inline]
    const fn increases_index(self) -> bool {
        self.step() > 0
    }

    #[inline]
    pub(crate) const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast
                | Direction::SouthEast
                | Direction::SouthWest
                | Direction::NorthWest
        )
    }
}

#[inline]
pub(crate) fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index()]
}

#[inline]
pub(crate) fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index()]
}

/// Squares a pawn of `color` on `sq` attacks
#[inline]
pub(crate) fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index()]
}

/// Number of steps from `sq` to the board edge in `dir`
#[inline]
pub(crate) fn edge_distance(sq: Square, dir: Direction) -> usize {
    EDGE_DISTANCE[sq.index()][dir as usize] as usize
}

/// Empty-board ray from `sq` (exclusive) in `dir`
#[inline]
pub(crate) fn ray(sq: Square, dir: Direction) -> Bitboard {
    RAYS[dir as usize][sq.index()]
}

/// Squares strictly between `a` and `b` when they share a line, else empty
#[inline]
pub(crate) fn between(a: Square, b: Square) -> Bitboard {
    BETWEEN[a.index()][b.index()]
}

/// Ray from `sq` in `dir`, stopping at and including the first occupied square
#[inline]
pub(crate) fn ray_attacks(sq: Square, dir: Direction, occupied: Bitboard) -> Bitboard {
    let full = ray(sq, dir);
    let blockers = full & occupied;
    let first = if dir.increases_index() {
        blockers.lsb()
    } else {
        blockers.msb()
    };
    match first {
        Some(blocker) => full & !ray(blocker, dir),
        None => full,
    }
}

#[inline]
pub(crate) fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    Direction::DIAGONAL
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | ray_attacks(sq, dir, occupied))
}

#[inline]
pub(crate) fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    Direction::STRAIGHT
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | ray_attacks(sq, dir, occupied))
}

#[inline]
pub(crate) fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}
