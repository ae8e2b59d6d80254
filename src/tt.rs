//! Transposition table for caching search results.
//!
//! One slot per index, addressed by `hash % len`. Each slot keeps the full
//! 64-bit key next to a packed entry, so a lookup only ever returns data
//! stored for the same key.

use crate::board::Move;

/// Default number of slots
pub const DEFAULT_TT_ENTRIES: usize = 512_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    /// Score is the exact value
    Exact,
    /// Search failed high: the true score is at least this
    LowerBound,
    /// Search failed low: the true score is at most this
    UpperBound,
}

impl BoundType {
    fn to_u8(self) -> u8 {
        match self {
            BoundType::Exact => 1,
            BoundType::LowerBound => 2,
            BoundType::UpperBound => 3,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v & 0x3 {
            1 => BoundType::Exact,
            2 => BoundType::LowerBound,
            _ => BoundType::UpperBound,
        }
    }
}

/// Unpacked entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtEntry {
    pub depth: u8,
    pub score: i16,
    pub bound_type: BoundType,
    pub best_move: Option<Move>,
    pub generation: u8,
}

impl TtEntry {
    #[must_use]
    pub fn depth(&self) -> u32 {
        u32::from(self.depth)
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        i32::from(self.score)
    }

    #[must_use]
    pub fn bound_type(&self) -> BoundType {
        self.bound_type
    }

    #[must_use]
    pub fn best_move(&self) -> Option<Move> {
        self.best_move
    }

    /// The stored score if it settles a node searched to `depth` with the
    /// window (`alpha`, `beta`).
    #[must_use]
    pub fn usable_score(&self, depth: u32, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth() < depth {
            return None;
        }
        let score = self.score();
        match self.bound_type {
            BoundType::Exact => Some(score),
            BoundType::LowerBound if score >= beta => Some(score),
            BoundType::UpperBound if score <= alpha => Some(score),
            _ => None,
        }
    }
}

/// Packed entry format (fits in 64 bits):
/// - bits 0-15:  move (u16, 0 = no move)
/// - bits 16-31: score (i16 as u16)
/// - bits 32-39: depth (u8)
/// - bits 40-41: bound (never 0, so a used slot is never all zero)
/// - bits 42-47: generation (6 bits)
fn pack_entry(
    depth: u8,
    score: i16,
    bound_type: BoundType,
    best_move: Option<Move>,
    generation: u8,
) -> u64 {
    let mv: u16 = best_move.map_or(0, Move::as_u16);
    let bound_gen: u8 = bound_type.to_u8() | ((generation & 0x3F) << 2);

    u64::from(mv)
        | (u64::from(score as u16) << 16)
        | (u64::from(depth) << 32)
        | (u64::from(bound_gen) << 40)
}

fn unpack_entry(data: u64) -> TtEntry {
    let mv_bits = (data & 0xFFFF) as u16;
    let score = ((data >> 16) & 0xFFFF) as u16 as i16;
    let depth = ((data >> 32) & 0xFF) as u8;
    let bound_gen = ((data >> 40) & 0xFF) as u8;

    TtEntry {
        depth,
        score,
        bound_type: BoundType::from_u8(bound_gen),
        best_move: (mv_bits != 0).then(|| Move::from_u16(mv_bits)),
        generation: bound_gen >> 2,
    }
}

#[derive(Clone, Copy, Default)]
struct TtSlot {
    key: u64,
    /// Packed entry, 0 when the slot is unused
    data: u64,
}

/// Position-hash keyed cache of search results.
pub struct TranspositionTable {
    slots: Vec<TtSlot>,
    generation: u8,
}

impl TranspositionTable {
    /// A table with `entries` slots (at least one).
    #[must_use]
    pub fn new(entries: usize) -> Self {
        TranspositionTable {
            slots: vec![TtSlot::default(); entries.max(1)],
            generation: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.data == 0)
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    /// The entry stored for exactly this hash, if any.
    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<TtEntry> {
        let slot = &self.slots[self.index(hash)];
        (slot.data != 0 && slot.key == hash).then(|| unpack_entry(slot.data))
    }

    /// A score that settles a node of at least `depth` with the window
    /// (`alpha`, `beta`), if the table holds one.
    #[must_use]
    pub fn lookup(&self, hash: u64, depth: u32, alpha: i32, beta: i32) -> Option<i32> {
        self.probe(hash)
            .and_then(|entry| entry.usable_score(depth, alpha, beta))
    }

    /// Store a result. The slot is overwritten when it is empty, holds the
    /// same position, was written by an earlier search, or was searched no
    /// deeper than `depth`.
    pub fn store(
        &mut self,
        hash: u64,
        depth: u32,
        score: i32,
        bound_type: BoundType,
        best_move: Option<Move>,
    ) {
        let idx = self.index(hash);
        let slot = &mut self.slots[idx];
        if slot.data != 0 && slot.key != hash {
            let existing = unpack_entry(slot.data);
            if existing.generation == self.generation && existing.depth() > depth {
                return;
            }
        }

        let depth = depth.min(u32::from(u8::MAX)) as u8;
        let score = score.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16;
        slot.key = hash;
        slot.data = pack_entry(depth, score, bound_type, best_move, self.generation);
    }

    /// Age existing entries so the next search prefers its own results.
    pub fn new_search(&mut self) {
        self.generation = (self.generation + 1) & 0x3F;
    }

    /// Fill level in per mille, sampled over the first thousand slots.
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        let sample = self.slots.len().min(1000);
        let used = self.slots[..sample]
            .iter()
            .filter(|slot| slot.data != 0)
            .count();
        (used * 1000 / sample) as u32
    }

    pub fn clear(&mut self) {
        self.slots.fill(TtSlot::default());
        self.generation = 0;
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        TranspositionTable::new(DEFAULT_TT_ENTRIES)
    }
}
