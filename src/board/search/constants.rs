//! Search constants.

// ============================================================================
// SCORES
// ============================================================================

/// Score of delivering mate at the root. Mate found `ply` plies from the
/// root scores `MATE_SCORE - ply`, so shorter mates score higher.
pub const MATE_SCORE: i32 = 30_000;

/// Scores with absolute value >= this are mate scores
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;

/// Window bound wider than any reachable score
pub const INFINITY: i32 = 32_000;

/// Score of a drawn position
pub const DRAW_SCORE: i32 = 0;

// ============================================================================
// LIMITS
// ============================================================================

/// Iterative deepening cap when no depth is requested
pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Nodes between clock polls
pub const TIME_CHECK_INTERVAL: u64 = 1024;

// ============================================================================
// MOVE ORDERING
// ============================================================================
// Higher scores are tried earlier. TT move, then captures that win or trade
// material, then quiet moves, then captures losing more than four pawns.

/// Hash move from the transposition table
pub const TT_MOVE_SCORE: i32 = 1 << 20;

/// Base score of a non-capture
pub const QUIET_MOVE_SCORE: i32 = -400;
