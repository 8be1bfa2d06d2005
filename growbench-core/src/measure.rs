//! Wall-Clock Timing
//!
//! Thin wrapper around `std::time::Instant`. Growth measurement only needs
//! total elapsed time for a batch of calls; per-call precision comes from
//! batching, not from hardware counters.

use std::time::{Duration, Instant};

/// Timer for measuring batched action runs.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed wall-clock time since the timer was started.
    #[inline(always)]
    pub fn stop(&self) -> Duration {
        self.start.elapsed()
    }
}
