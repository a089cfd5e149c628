//! The dithering orchestrator.
//!
//! [`DitherEngine`] resolves the worker count, picks the sequential scan for
//! one worker or the wavefront scan otherwise, and reports what it did.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;
use wavedither_core::{diffuse_row, DiffusionKernel, PaddedGrid};

use crate::config::EngineConfig;
use crate::metrics::{saturating_micros, RunMetrics};
use crate::progress::Progress;
use crate::wavefront::diffuse_parallel;

/// Output of [`DitherEngine::run`].
#[derive(Clone, Debug)]
pub struct RunReport {
    /// The dithered grid. Interior cells are 0 or 255; the border is scratch.
    pub grid: PaddedGrid,
    /// What the run cost.
    pub metrics: RunMetrics,
}

/// Runs Floyd-Steinberg dithering over padded grids.
///
/// Reusable: each call to [`run`](Self::run) resets the shared
/// [`Progress`] counter.
///
/// # Examples
///
/// ```
/// use wavedither_core::PaddedGrid;
/// use wavedither_engine::{DitherEngine, EngineConfig};
///
/// let engine = DitherEngine::new(EngineConfig::with_workers(2));
/// let grid = PaddedGrid::from_rows(&[[200, 200], [200, 200]]).unwrap();
/// let report = engine.run(grid);
/// assert!(report.grid.interior_rows().all(|row| row == [255, 255]));
/// ```
#[derive(Debug)]
pub struct DitherEngine {
    config: EngineConfig,
    kernel: DiffusionKernel,
    progress: Arc<Progress>,
}

impl Default for DitherEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl DitherEngine {
    /// An engine using the Floyd-Steinberg kernel.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            kernel: DiffusionKernel::floyd_steinberg(),
            progress: Arc::new(Progress::new()),
        }
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The kernel applied at every cell.
    pub fn kernel(&self) -> &DiffusionKernel {
        &self.kernel
    }

    /// Handle to the row counter, for polling from another thread.
    pub fn progress(&self) -> Arc<Progress> {
        Arc::clone(&self.progress)
    }

    /// Dither `grid` and return it with run metrics.
    pub fn run(&self, mut grid: PaddedGrid) -> RunReport {
        let metrics = self.run_in_place(&mut grid);
        RunReport { grid, metrics }
    }

    /// Dither `grid` in place.
    pub fn run_in_place(&self, grid: &mut PaddedGrid) -> RunMetrics {
        let workers = self.config.resolved_worker_count();
        let (width, height) = (grid.width(), grid.height());
        self.progress.begin(height);
        info!(width, height, workers, "dither run started");

        let start = Instant::now();
        let sequential = workers == 1;
        let spawned_workers = if sequential {
            for y in 1..=height {
                diffuse_row(grid, &self.kernel, y);
                self.progress.row_finished();
            }
            0
        } else {
            diffuse_parallel(grid, &self.kernel, workers, &self.progress)
        };
        let total_us = saturating_micros(start.elapsed());

        let metrics = RunMetrics {
            width,
            height,
            workers,
            spawned_workers,
            sequential,
            total_us,
        };
        info!(
            width,
            height,
            workers,
            elapsed_ms = metrics.elapsed_ms(),
            "dither run finished"
        );
        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavedither_core::diffuse_sequential;

    #[test]
    fn single_worker_takes_sequential_path() {
        let engine = DitherEngine::new(EngineConfig::with_workers(1));
        let grid = PaddedGrid::from_rows(&[[10, 240, 130], [128, 129, 0]]).unwrap();
        let mut expected = grid.clone();
        diffuse_sequential(&mut expected, engine.kernel());

        let report = engine.run(grid);
        assert!(report.metrics.sequential);
        assert_eq!(report.metrics.workers, 1);
        assert_eq!(report.metrics.spawned_workers, 0);
        assert_eq!(report.grid, expected);
    }

    #[test]
    fn progress_reaches_height() {
        let engine = DitherEngine::default();
        let progress = engine.progress();
        let grid = PaddedGrid::from_interior(5, 7, &[90; 35]).unwrap();
        let report = engine.run(grid);
        assert_eq!(progress.rows_done(), 7);
        assert!(progress.is_complete());
        assert_eq!((report.metrics.width, report.metrics.height), (5, 7));
    }

    #[test]
    fn engine_is_reusable() {
        let engine = DitherEngine::default();
        let a = engine.run(PaddedGrid::from_interior(3, 3, &[140; 9]).unwrap());
        let b = engine.run(PaddedGrid::from_interior(3, 3, &[140; 9]).unwrap());
        assert_eq!(a.grid, b.grid);
        assert_eq!(engine.progress().rows_done(), 3);
    }
}
