//! Per-run performance metrics.
//!
//! [`RunMetrics`] captures what the engine did for one dither run, for the
//! CLI summary and the scaling harness.

use std::time::Duration;

/// Timing and scheduling data collected during a single run.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Logical width of the grid.
    pub width: usize,
    /// Logical height of the grid.
    pub height: usize,
    /// Resolved worker count.
    pub workers: usize,
    /// Worker threads actually spawned. Zero on the sequential path; less
    /// than `workers` if the OS refused a thread and the calling thread
    /// adopted its rows.
    pub spawned_workers: usize,
    /// Whether the single-worker sequential scan was used.
    pub sequential: bool,
    /// Wall-clock time for the run, in microseconds.
    pub total_us: u64,
}

impl RunMetrics {
    /// Wall-clock time as a [`Duration`].
    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.total_us)
    }

    /// Wall-clock time in fractional milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.total_us as f64 / 1000.0
    }

    /// Whether fewer threads were started than requested.
    pub fn degraded(&self) -> bool {
        !self.sequential && self.spawned_workers < self.workers
    }
}

/// Whole microseconds in `elapsed`, saturating at `u64::MAX`.
pub(crate) fn saturating_micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}
