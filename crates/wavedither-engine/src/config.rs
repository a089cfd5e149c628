//! Engine configuration.
//!
//! There is nothing to validate: out-of-range worker counts are clamped to
//! what the machine offers instead of being rejected.

use tracing::warn;

/// Number of hardware threads, or 1 if it cannot be determined.
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

// ── EngineConfig ───────────────────────────────────────────────────

/// Configuration for [`DitherEngine`](crate::DitherEngine).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Requested number of worker threads. `None` = one per hardware
    /// thread.
    pub worker_count: Option<usize>,
}

impl EngineConfig {
    /// Config requesting exactly `workers` threads (still clamped).
    pub fn with_workers(workers: usize) -> Self {
        Self {
            worker_count: Some(workers),
        }
    }

    /// Resolve the actual worker count.
    ///
    /// Explicit values are clamped to `[1, available_parallelism]`. A value
    /// outside that range is logged at `warn` and clamped, never an error.
    pub fn resolved_worker_count(&self) -> usize {
        resolve_worker_count(self.worker_count, available_workers())
    }
}

/// Resolve a requested worker count against `available` hardware threads.
///
/// `None` means all of them. Explicit values are clamped to
/// `[1, available]`, with a `warn` when the clamp changes the value.
pub fn resolve_worker_count(requested: Option<usize>, available: usize) -> usize {
    let available = available.max(1);
    match requested {
        None => available,
        Some(n) => {
            let clamped = n.clamp(1, available);
            if clamped != n {
                warn!(requested = n, available, using = clamped, "worker count clamped");
            }
            clamped
        }
    }
}
