//! Engine configuration.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::DEFAULT_MAX_DEPTH;
use crate::tt::DEFAULT_TT_ENTRIES;

/// Search thread stack size (32 MB)
const DEFAULT_STACK_SIZE: usize = 32 * 1024 * 1024;
/// Depth of the fixed-depth evaluation search
const DEFAULT_EVAL_DEPTH: u32 = 8;

/// Settings for an [`EngineController`](super::EngineController).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Transposition table slots
    pub tt_entries: usize,
    /// Iterative-deepening cap when a search names no depth
    pub max_depth: u32,
    /// Time budget applied when a search names none
    pub move_time: Option<Duration>,
    /// Depth used by `search_evaluation`
    pub eval_depth: u32,
    pub search_stack_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            tt_entries: DEFAULT_TT_ENTRIES,
            max_depth: DEFAULT_MAX_DEPTH,
            move_time: None,
            eval_depth: DEFAULT_EVAL_DEPTH,
            search_stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_tt_entries(mut self, entries: usize) -> Self {
        self.tt_entries = entries.max(1);
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    #[must_use]
    pub fn with_move_time(mut self, move_time: Duration) -> Self {
        self.move_time = Some(move_time);
        self
    }

    #[must_use]
    pub fn with_eval_depth(mut self, depth: u32) -> Self {
        self.eval_depth = depth.max(1);
        self
    }

    #[must_use]
    pub fn with_search_stack_size(mut self, bytes: usize) -> Self {
        self.search_stack_size = bytes;
        self
    }
}
