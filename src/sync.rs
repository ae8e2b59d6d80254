//! Cooperative cancellation for searches running on other threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared abort flag.
///
/// Clones observe the same flag. The search polls it at every node and
/// unwinds once it is raised; nothing else is interrupted.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    #[must_use]
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    /// A flag that is already raised
    #[must_use]
    pub fn stopped() -> Self {
        StopFlag(Arc::new(AtomicBool::new(true)))
    }

    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Raise the flag. Every clone sees it on its next poll.
    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_flag_lifecycle() {
        let flag = StopFlag::new();
        assert!(!flag.is_stopped());

        flag.stop();
        assert!(flag.is_stopped());

        flag.reset();
        assert!(!flag.is_stopped());
    }

    #[test]
    fn test_clones_share_state() {
        let flag = StopFlag::new();
        let seen_by_worker = flag.clone();

        flag.stop();
        assert!(seen_by_worker.is_stopped());
    }

    #[test]
    fn test_stopped_constructor() {
        assert!(StopFlag::stopped().is_stopped());
        assert!(!StopFlag::default().is_stopped());
    }
}
