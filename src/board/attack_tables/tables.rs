//! Precomputed per-square tables: leaper attacks, edge distances and rays.

use once_cell::sync::Lazy;

use super::Direction;
use crate::board::types::Bitboard;

fn leaper_table(deltas: &[(isize, isize)]) -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        let r = (sq / 8) as isize;
        let f = (sq % 8) as isize;
        let mut mask = 0u64;
        for &(dr, df) in deltas {
            let nr = r + dr;
            let nf = f + df;
            if (0..8).contains(&nr) && (0..8).contains(&nf) {
                mask |= 1u64 << (nr * 8 + nf);
            }
        }
        *slot = Bitboard(mask);
    }
    attacks
}

pub(crate) static KNIGHT_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| {
    leaper_table(&[
        (2, 1),
        (1, 2),
        (-1, 2),
        (-2, 1),
        (-2, -1),
        (-1, -2),
        (1, -2),
        (2, -1),
    ])
});

pub(crate) static KING_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| {
    leaper_table(&[
        (1, 0),
        (-1, 0),
        (0, 1),
        (0, -1),
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
    ])
});

/// `PAWN_ATTACKS[color][square]`: squares a pawn of that color attacks
pub(crate) static PAWN_ATTACKS: Lazy<[[Bitboard; 64]; 2]> =
    Lazy::new(|| [leaper_table(&[(1, -1), (1, 1)]), leaper_table(&[(-1, -1), (-1, 1)])]);

/// `EDGE_DISTANCE[square][direction]`: steps available before leaving the board
pub(crate) static EDGE_DISTANCE: Lazy<[[u8; 8]; 64]> = Lazy::new(|| {
    let mut table = [[0u8; 8]; 64];
    for (sq, row) in table.iter_mut().enumerate() {
        let rank = sq / 8;
        let file = sq % 8;
        let north = 7 - rank;
        let south = rank;
        let east = 7 - file;
        let west = file;
        for dir in Direction::ALL {
            row[dir as usize] = match dir {
                Direction::North => north,
                Direction::NorthEast => north.min(east),
                Direction::East => east,
                Direction::SouthEast => south.min(east),
                Direction::South => south,
                Direction::SouthWest => south.min(west),
                Direction::West => west,
                Direction::NorthWest => north.min(west),
            } as u8;
        }
    }
    table
});

/// `RAYS[direction][square]`: every square from `square` (exclusive) to the edge
pub(crate) static RAYS: Lazy<[[Bitboard; 64]; 8]> = Lazy::new(|| {
    let mut rays = [[Bitboard::EMPTY; 64]; 8];
    for dir in Direction::ALL {
        let step = dir.step();
        for sq in 0..64 {
            let mut mask = 0u64;
            let mut cur = sq as isize;
            for _ in 0..EDGE_DISTANCE[sq][dir as usize] {
                cur += step;
                mask |= 1u64 << cur;
            }
            rays[dir as usize][sq] = Bitboard(mask);
        }
    }
    rays
});

/// `BETWEEN[a][b]`: squares strictly between two aligned squares, empty otherwise
pub(crate) static BETWEEN: Lazy<Box<[[Bitboard; 64]; 64]>> = Lazy::new(|| {
    let mut table = Box::new([[Bitboard::EMPTY; 64]; 64]);
    for dir in Direction::ALL {
        for from in 0..64 {
            let ray = RAYS[dir as usize][from];
            for to in ray.iter() {
                let beyond = RAYS[dir as usize][to.index()];
                table[from][to.index()] = ray & !beyond & !Bitboard::from_square(to);
            }
        }
    }
    table
});
