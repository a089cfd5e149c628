//! Row counter for progress reporting.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Rows finished out of rows scheduled, updated by workers as they go.
///
/// Purely informational: nothing in the engine reads it to make a decision,
/// so every access is `Relaxed`.
#[derive(Debug, Default)]
pub struct Progress {
    done: AtomicUsize,
    total: AtomicUsize,
}

impl Progress {
    /// A counter with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for a run over `total_rows` rows.
    pub fn begin(&self, total_rows: usize) {
        self.done.store(0, Ordering::Relaxed);
        self.total.store(total_rows, Ordering::Relaxed);
    }

    /// Record one finished row.
    pub fn row_finished(&self) {
        self.done.fetch_add(1, Ordering::Relaxed);
    }

    /// Rows finished so far.
    pub fn rows_done(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }

    /// Rows scheduled for the current run.
    pub fn rows_total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    /// Fraction finished in `[0.0, 1.0]`; `0.0` before any run begins.
    pub fn fraction(&self) -> f64 {
        let total = self.rows_total();
        if total == 0 {
            return 0.0;
        }
        (self.rows_done() as f64 / total as f64).min(1.0)
    }

    /// Whether every scheduled row has finished.
    pub fn is_complete(&self) -> bool {
        let total = self.rows_total();
        total > 0 && self.rows_done() >= total
    }
}
