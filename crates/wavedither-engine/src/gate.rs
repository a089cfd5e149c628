//! Per-cell completion flags and the wavefront gate.
//!
//! A flag becomes `true` once its cell has been quantized and all four of its
//! error fragments have landed. Padded cell `(y, x)` may only be processed
//! after its upper-right neighbour `(y - 1, x + 1)` is complete. Together
//! with a single left-to-right owner per row this implies every cell that
//! deposits into `(y, x)` has finished.
//!
//! Border flags start `true`, so the top row and the rightmost column never
//! block on a cell that does not exist.

use std::hint;
use std::sync::atomic::{AtomicBool, Ordering};

/// `(height + 2) x (width + 2)` completion flags.
pub struct CompletionGrid {
    width: usize,
    height: usize,
    flags: Box<[AtomicBool]>,
}

// Compile-time assertion: CompletionGrid is shared by reference across workers.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<CompletionGrid>();
};

impl CompletionGrid {
    /// Flags for a `width x height` logical grid: border set, interior clear.
    pub fn new(width: usize, height: usize) -> Self {
        let (pw, ph) = (width + 2, height + 2);
        let flags = (0..ph)
            .flat_map(|y| (0..pw).map(move |x| (y, x)))
            .map(|(y, x)| AtomicBool::new(y == 0 || x == 0 || y == ph - 1 || x == pw - 1))
            .collect();
        Self {
            width,
            height,
            flags,
        }
    }

    /// Logical width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Logical height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Spin until `(y, x)` is complete.
    ///
    /// Busy-waits with a CPU spin hint; never sleeps or parks. The acquire
    /// load pairs with the release in [`mark_done`](Self::mark_done), making
    /// every deposit the completed cell made visible to the caller.
    #[inline]
    pub fn wait_for(&self, y: usize, x: usize) {
        let flag = self.flag(y, x);
        while !flag.load(Ordering::Acquire) {
            hint::spin_loop();
        }
    }

    /// Publish `(y, x)` as complete. Call only after all of its deposits.
    #[inline]
    pub fn mark_done(&self, y: usize, x: usize) {
        self.flag(y, x).store(true, Ordering::Release);
    }

    /// Whether `(y, x)` is complete, without waiting.
    pub fn is_done(&self, y: usize, x: usize) -> bool {
        self.flag(y, x).load(Ordering::Acquire)
    }

    /// Whether every flag, interior included, is set.
    pub fn all_done(&self) -> bool {
        self.flags.iter().all(|f| f.load(Ordering::Acquire))
    }

    /// Number of interior cells not yet complete.
    pub fn pending(&self) -> usize {
        self.flags
            .iter()
            .filter(|f| !f.load(Ordering::Acquire))
            .count()
    }

    #[inline]
    fn flag(&self, y: usize, x: usize) -> &AtomicBool {
        debug_assert!(y < self.height + 2 && x < self.width + 2);
        &self.flags[y * (self.width + 2) + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn border_is_preset_and_interior_clear() {
        let gate = CompletionGrid::new(3, 2);
        for y in 0..4 {
            for x in 0..5 {
                let border = y == 0 || x == 0 || y == 3 || x == 4;
                assert_eq!(gate.is_done(y, x), border, "flag ({y},{x})");
            }
        }
        assert_eq!(gate.pending(), 6);
        assert!(!gate.all_done());
    }

    #[test]
    fn border_waits_return_immediately() {
        let gate = CompletionGrid::new(4, 4);
        // First-row cells wait on row 0; last-column cells wait on column w+1.
        for x in 1..=4 {
            gate.wait_for(0, x + 1);
        }
        for y in 2..=4 {
            gate.wait_for(y - 1, 5);
        }
    }

    #[test]
    fn mark_done_completes_the_grid() {
        let gate = CompletionGrid::new(2, 2);
        for y in 1..=2 {
            for x in 1..=2 {
                gate.mark_done(y, x);
            }
        }
        assert!(gate.all_done());
        assert_eq!(gate.pending(), 0);
    }

    #[test]
    fn wait_for_observes_writes_before_mark_done() {
        let gate = CompletionGrid::new(1, 1);
        let payload = AtomicUsize::new(0);
        std::thread::scope(|s| {
            s.spawn(|| {
                gate.wait_for(1, 1);
                assert_eq!(payload.load(Ordering::Relaxed), 42);
            });
            s.spawn(|| {
                payload.store(42, Ordering::Relaxed);
                gate.mark_done(1, 1);
            });
        });
    }
}
