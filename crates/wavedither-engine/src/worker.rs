//! Row-partitioned wavefront workers.
//!
//! Rows are dealt out round-robin: with `n` workers, worker `i` owns padded
//! rows `i + 1, i + 1 + n, i + 1 + 2n, ...`. Each worker walks its rows top
//! to bottom and each row left to right, gating every cell on its
//! upper-right neighbour. A worker never retries, aborts or reorders.

use tracing::debug;
use wavedither_core::DiffusionKernel;

use crate::gate::CompletionGrid;
use crate::progress::Progress;
use crate::shared::SharedGrid;

// ── WorkerDescriptor ───────────────────────────────────────────────

/// Which rows a worker owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkerDescriptor {
    /// Zero-based offset of the first owned row.
    pub start_row: usize,
    /// Distance between consecutive owned rows; equals the worker count.
    pub stride: usize,
}

impl WorkerDescriptor {
    /// One descriptor per worker, `start_row = i`, `stride = workers`.
    ///
    /// `workers` is raised to 1 if zero.
    pub fn partition(workers: usize) -> Vec<Self> {
        let stride = workers.max(1);
        (0..stride)
            .map(|start_row| Self { start_row, stride })
            .collect()
    }

    /// Padded row indices owned in a grid of logical `height`, ascending.
    pub fn rows(&self, height: usize) -> impl Iterator<Item = usize> {
        (self.start_row + 1..height + 1).step_by(self.stride.max(1))
    }
}

// ── WorkerState ────────────────────────────────────────────────────

/// Lifecycle of a [`Worker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerState {
    /// Built, not yet started.
    Idle,
    /// Scanning its rows.
    Running,
    /// Finished and collected by the orchestrator.
    Joined,
}

// ── WorkerContext ──────────────────────────────────────────────────

/// Everything a worker borrows from the orchestrator.
#[derive(Clone, Copy)]
pub struct WorkerContext<'a> {
    /// Cells being dithered.
    pub grid: &'a SharedGrid,
    /// Completion flags.
    pub gate: &'a CompletionGrid,
    /// Kernel applied at every cell.
    pub kernel: &'a DiffusionKernel,
    /// Row counter for reporting.
    pub progress: &'a Progress,
}

// ── Worker ─────────────────────────────────────────────────────────

/// One scanning thread's share of the grid.
#[derive(Debug)]
pub struct Worker {
    index: usize,
    rows: Vec<usize>,
    rows_done: usize,
    state: WorkerState,
}

impl Worker {
    /// A worker owning the rows of `descriptor`.
    pub fn new(index: usize, descriptor: WorkerDescriptor, height: usize) -> Self {
        Self {
            index,
            rows: descriptor.rows(height).collect(),
            rows_done: 0,
            state: WorkerState::Idle,
        }
    }

    /// A worker owning the union of several descriptors' rows, scanned in
    /// ascending order.
    ///
    /// Used when some worker threads could not be spawned: the calling thread
    /// takes their rows so that every row still has exactly one owner.
    pub fn adopting(index: usize, descriptors: &[WorkerDescriptor], height: usize) -> Self {
        let mut rows: Vec<usize> = descriptors.iter().flat_map(|d| d.rows(height)).collect();
        rows.sort_unstable();
        Self {
            index,
            rows,
            rows_done: 0,
            state: WorkerState::Idle,
        }
    }

    /// Worker index, used in thread names and logs.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Owned padded rows in scan order.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Rows completed so far.
    pub fn rows_done(&self) -> usize {
        self.rows_done
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// Scan every owned row through the gate.
    pub fn run(&mut self, ctx: &WorkerContext<'_>) {
        debug_assert_eq!(self.state, WorkerState::Idle);
        self.state = WorkerState::Running;
        debug!(worker = self.index, rows = self.rows.len(), "worker started");
        let width = ctx.gate.width();
        let mut view = ctx.grid.view();
        for &y in &self.rows {
            for x in 1..=width {
                ctx.gate.wait_for(y - 1, x + 1);
                ctx.kernel.apply(&mut view, y, x);
                ctx.gate.mark_done(y, x);
            }
            ctx.progress.row_finished();
            self.rows_done += 1;
        }
        debug!(worker = self.index, rows = self.rows_done, "worker finished");
    }

    /// Record that the orchestrator has collected this worker.
    pub fn mark_joined(&mut self) {
        self.state = WorkerState::Joined;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use wavedither_core::PaddedGrid;

    #[test]
    fn descriptors_cover_rows_disjointly() {
        for height in 1..12 {
            for workers in 1..8 {
                let mut seen = vec![0u32; height + 2];
                for d in WorkerDescriptor::partition(workers) {
                    for y in d.rows(height) {
                        seen[y] += 1;
                    }
                }
                assert_eq!(seen[0], 0, "border row scheduled");
                assert_eq!(seen[height + 1], 0, "border row scheduled");
                assert!(
                    seen[1..=height].iter().all(|&n| n == 1),
                    "height {height}, workers {workers}: {seen:?}"
                );
            }
        }
    }

    #[test]
    fn rows_are_strided_from_start() {
        let d = WorkerDescriptor {
            start_row: 1,
            stride: 3,
        };
        assert_eq!(d.rows(8).collect::<Vec<_>>(), vec![2, 5, 8]);
        assert_eq!(d.rows(1).count(), 0);
    }

    #[test]
    fn zero_workers_partitions_as_one() {
        assert_eq!(
            WorkerDescriptor::partition(0),
            vec![WorkerDescriptor {
                start_row: 0,
                stride: 1
            }]
        );
    }

    #[test]
    fn adopting_merges_rows_in_ascending_order() {
        let ds = WorkerDescriptor::partition(4);
        let w = Worker::adopting(4, &ds[2..], 9);
        assert_eq!(w.rows(), &[3, 4, 7, 8]);
        assert_eq!(w.state(), WorkerState::Idle);
    }

    #[test]
    fn lone_worker_runs_every_row() {
        let grid = PaddedGrid::from_rows(&[[200, 10], [90, 250], [130, 0]]).unwrap();
        let shared = SharedGrid::from_grid(&grid);
        let gate = CompletionGrid::new(2, 3);
        let kernel = DiffusionKernel::floyd_steinberg();
        let progress = Progress::new();
        progress.begin(3);
        let ctx = WorkerContext {
            grid: &shared,
            gate: &gate,
            kernel: &kernel,
            progress: &progress,
        };

        let descriptor = WorkerDescriptor::partition(1)[0];
        let mut worker = Worker::new(0, descriptor, 3);
        worker.run(&ctx);
        assert_eq!(worker.state(), WorkerState::Running);
        worker.mark_joined();
        assert_eq!(worker.state(), WorkerState::Joined);

        assert_eq!(worker.rows_done(), 3);
        assert!(gate.all_done());
        assert!(progress.is_complete());

        let mut expected = grid.clone();
        wavedither_core::diffuse_sequential(&mut expected, &kernel);
        let mut out = grid;
        shared.write_back(&mut out);
        assert_eq!(out, expected);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn run_logs_start_and_finish() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .with_writer(move || writer.clone())
            .finish();

        let grid = PaddedGrid::from_rows(&[[40, 220], [180, 0]]).unwrap();
        let shared = SharedGrid::from_grid(&grid);
        let gate = CompletionGrid::new(2, 2);
        let kernel = DiffusionKernel::floyd_steinberg();
        let progress = Progress::new();
        let ctx = WorkerContext {
            grid: &shared,
            gate: &gate,
            kernel: &kernel,
            progress: &progress,
        };
        let mut worker = Worker::new(7, WorkerDescriptor::partition(1)[0], 2);
        tracing::subscriber::with_default(subscriber, || worker.run(&ctx));

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let started = logs.find("worker started").expect("start line");
        let finished = logs.find("worker finished").expect("finish line");
        assert!(started < finished);
        assert!(logs.contains("worker=7"));
        assert!(logs.contains("rows=2"));
    }
}
