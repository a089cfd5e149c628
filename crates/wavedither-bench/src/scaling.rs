//! Worker-count scaling runs.
//!
//! One sequential reference scan, then the wavefront scan at every worker
//! count from 1 up to the configured maximum. Each parallel result is
//! checked against the reference before its time is recorded; the first
//! disagreement aborts the sweep. The 1-worker parallel run still goes
//! through the completion gate, which is what makes it a measure of the
//! protocol's overhead.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use tracing::{debug, info, warn};
use wavedither_core::{diffuse_row, first_mismatch, DiffusionKernel, PaddedGrid};
use wavedither_engine::{available_workers, diffuse_parallel, resolve_worker_count, Progress};
use wavedither_io::save_grid;

use crate::error::BenchError;

// ── RunKind ────────────────────────────────────────────────────────

/// Which scan a measurement belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunKind {
    /// The single-threaded reference.
    Sequential,
    /// The wavefront scan with this many workers.
    Parallel {
        /// Worker count.
        workers: usize,
    },
}

impl RunKind {
    /// Human-readable label for progress lines.
    pub fn label(&self) -> String {
        match self {
            Self::Sequential => "Sequential".to_string(),
            Self::Parallel { workers } => format!("Parallel ({workers}T)"),
        }
    }

    /// File name for this run's output image.
    pub fn file_name(&self) -> String {
        match self {
            Self::Sequential => "sequential_output.png".to_string(),
            Self::Parallel { workers } => format!("parallel_output_{workers}T.png"),
        }
    }

    /// Value of the CSV `Type` column.
    pub fn csv_type(&self) -> &'static str {
        match self {
            Self::Sequential => "Sequential",
            Self::Parallel { workers: 1 } => "Parallel_Overhead",
            Self::Parallel { .. } => "Parallel",
        }
    }
}

// ── ScalingObserver ────────────────────────────────────────────────

/// Hooks around each timed run, e.g. for a live progress display.
///
/// Both methods default to doing nothing; `()` is the silent observer.
pub trait ScalingObserver {
    /// A run is about to start. `progress` has been reset for it.
    fn run_started(&mut self, kind: RunKind, progress: &Arc<Progress>) {
        let _ = (kind, progress);
    }

    /// A run finished in `elapsed`, before verification.
    fn run_finished(&mut self, kind: RunKind, elapsed: Duration) {
        let _ = (kind, elapsed);
    }
}

impl ScalingObserver for () {}

// ── ScalingConfig ──────────────────────────────────────────────────

/// Configuration for a [`ScalingHarness`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScalingConfig {
    /// Highest worker count to measure. `None` = one per hardware thread.
    /// Explicit values are clamped to the hardware thread count.
    pub max_workers: Option<usize>,
    /// If set, every run's output is written here as PNG.
    pub output_dir: Option<PathBuf>,
}

impl ScalingConfig {
    /// Resolve the maximum worker count to `[1, available_parallelism]`.
    ///
    /// Workers spin while waiting on the row above, so a sweep past the
    /// hardware thread count would only measure contention for cores.
    pub fn resolved_max_workers(&self) -> usize {
        resolve_worker_count(self.max_workers, available_workers())
    }
}

// ── ScalingReport ──────────────────────────────────────────────────

/// One verified parallel run.
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    /// Worker count.
    pub workers: usize,
    /// Wall-clock time.
    pub elapsed: Duration,
    /// Sequential time divided by this run's time.
    pub speedup: f64,
}

impl Measurement {
    /// The run kind this measurement belongs to.
    pub fn kind(&self) -> RunKind {
        RunKind::Parallel {
            workers: self.workers,
        }
    }
}

/// Results of a full sweep.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalingReport {
    /// Logical width of the input.
    pub width: usize,
    /// Logical height of the input.
    pub height: usize,
    /// Sequential reference time.
    pub sequential: Duration,
    /// Parallel runs keyed by worker count, in the order they ran.
    pub parallel: IndexMap<usize, Measurement>,
}

impl ScalingReport {
    /// The fastest parallel run.
    pub fn best(&self) -> Option<&Measurement> {
        self.parallel.values().min_by_key(|m| m.elapsed)
    }
}

impl fmt::Display for ScalingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "-------------------------------------";
        writeln!(
            f,
            "Sequential Time: {} ms (1.00x)",
            self.sequential.as_millis()
        )?;
        writeln!(f, "{RULE}")?;
        for m in self.parallel.values() {
            writeln!(
                f,
                "Parallel ({} Threads): {} ms ({:.2}x)",
                m.workers,
                m.elapsed.as_millis(),
                m.speedup
            )?;
        }
        write!(f, "{RULE}")
    }
}

/// `sequential / parallel`, with the parallel time floored at 1 µs.
pub fn speedup(sequential: Duration, parallel: Duration) -> f64 {
    sequential.as_secs_f64() / parallel.as_secs_f64().max(1e-6)
}

/// Check a parallel result against the reference.
pub fn verify(
    reference: &PaddedGrid,
    candidate: &PaddedGrid,
    workers: usize,
) -> Result<(), BenchError> {
    match first_mismatch(reference, candidate)? {
        None => Ok(()),
        Some(mismatch) => Err(BenchError::VerificationFailed { workers, mismatch }),
    }
}

// ── ScalingHarness ─────────────────────────────────────────────────

/// Runs and verifies a scaling sweep.
#[derive(Debug)]
pub struct ScalingHarness {
    config: ScalingConfig,
    kernel: DiffusionKernel,
    progress: Arc<Progress>,
}

impl ScalingHarness {
    /// A harness using the Floyd-Steinberg kernel.
    pub fn new(config: ScalingConfig) -> Self {
        Self {
            config,
            kernel: DiffusionKernel::floyd_steinberg(),
            progress: Arc::new(Progress::new()),
        }
    }

    /// The configuration this harness was built with.
    pub fn config(&self) -> &ScalingConfig {
        &self.config
    }

    /// Handle to the row counter shared by every run.
    pub fn progress(&self) -> Arc<Progress> {
        Arc::clone(&self.progress)
    }

    /// Run the sweep silently.
    pub fn run(&self, input: &PaddedGrid) -> Result<ScalingReport, BenchError> {
        self.run_observed(input, &mut ())
    }

    /// Run the sweep, notifying `observer` around each timed run.
    pub fn run_observed<O: ScalingObserver + ?Sized>(
        &self,
        input: &PaddedGrid,
        observer: &mut O,
    ) -> Result<ScalingReport, BenchError> {
        let (width, height) = (input.width(), input.height());
        let max_workers = self.config.resolved_max_workers();
        info!(width, height, max_workers, "scaling sweep started");

        let mut reference = input.clone();
        let sequential = self.timed(RunKind::Sequential, height, observer, || {
            for y in 1..=height {
                diffuse_row(&mut reference, &self.kernel, y);
                self.progress.row_finished();
            }
        });
        self.save_output(RunKind::Sequential, &reference)?;

        let mut parallel = IndexMap::with_capacity(max_workers);
        for workers in 1..=max_workers {
            let kind = RunKind::Parallel { workers };
            let mut grid = input.clone();
            let elapsed = self.timed(kind, height, observer, || {
                diffuse_parallel(&mut grid, &self.kernel, workers, &self.progress);
            });

            if let Err(err) = verify(&reference, &grid, workers) {
                warn!(workers, "parallel result differs from sequential reference");
                return Err(err);
            }
            debug!(workers, elapsed_ms = %elapsed.as_millis(), "run verified");
            self.save_output(kind, &grid)?;

            parallel.insert(
                workers,
                Measurement {
                    workers,
                    elapsed,
                    speedup: speedup(sequential, elapsed),
                },
            );
        }

        let report = ScalingReport {
            width,
            height,
            sequential,
            parallel,
        };
        if let Some(best) = report.best() {
            info!(
                best_workers = best.workers,
                best_speedup = best.speedup,
                "scaling sweep finished"
            );
        }
        Ok(report)
    }

    fn timed<O: ScalingObserver + ?Sized>(
        &self,
        kind: RunKind,
        rows: usize,
        observer: &mut O,
        run: impl FnOnce(),
    ) -> Duration {
        self.progress.begin(rows);
        observer.run_started(kind, &self.progress);
        let start = Instant::now();
        run();
        let elapsed = start.elapsed();
        observer.run_finished(kind, elapsed);
        elapsed
    }

    fn save_output(&self, kind: RunKind, grid: &PaddedGrid) -> Result<(), BenchError> {
        if let Some(dir) = &self.config.output_dir {
            save_grid(grid, dir.join(kind.file_name()))?;
        }
        Ok(())
    }
}
