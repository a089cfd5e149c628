//! The multi-threaded wavefront scan.

use std::panic;
use std::thread;

use tracing::{debug, warn};
use wavedither_core::{DiffusionKernel, PaddedGrid};

use crate::gate::CompletionGrid;
use crate::progress::Progress;
use crate::shared::SharedGrid;
use crate::worker::{Worker, WorkerContext, WorkerDescriptor};

/// Dither `grid` in place with exactly `workers` scoped threads.
///
/// Unlike [`DitherEngine`](crate::DitherEngine) this does not clamp the
/// worker count to the machine, and it always goes through the completion
/// gate, even for a single worker. The output is bit-identical to
/// [`diffuse_sequential`](wavedither_core::diffuse_sequential) for every
/// worker count. `progress` must already be [`begin`](Progress::begin)-ed
/// if the caller wants meaningful fractions.
///
/// Returns the number of threads actually spawned. If spawning fails part
/// way, the calling thread scans the rows of every worker that was not
/// started, so the result is unaffected.
///
/// A panicking worker is resumed on the calling thread once the others have
/// been joined.
pub fn diffuse_parallel(
    grid: &mut PaddedGrid,
    kernel: &DiffusionKernel,
    workers: usize,
    progress: &Progress,
) -> usize {
    let workers = workers.max(1);
    let height = grid.height();
    let shared = SharedGrid::from_grid(grid);
    let gate = CompletionGrid::new(grid.width(), height);
    let descriptors = WorkerDescriptor::partition(workers);
    let ctx = WorkerContext {
        grid: &shared,
        gate: &gate,
        kernel,
        progress,
    };

    let spawned = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        let mut unspawned: &[WorkerDescriptor] = &[];

        for (i, &descriptor) in descriptors.iter().enumerate() {
            let mut worker = Worker::new(i, descriptor, height);
            let spawn = thread::Builder::new()
                .name(format!("wavedither-worker-{i}"))
                .spawn_scoped(scope, move || {
                    worker.run(&ctx);
                    worker
                });
            match spawn {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    warn!(
                        worker = i,
                        error = %err,
                        "failed to spawn worker, scanning remaining rows on the calling thread"
                    );
                    unspawned = &descriptors[i..];
                    break;
                }
            }
        }

        if !unspawned.is_empty() {
            let mut adopted = Worker::adopting(workers, unspawned, height);
            adopted.run(&ctx);
            debug!(rows = adopted.rows_done(), "calling thread finished adopted rows");
        }

        let spawned = handles.len();
        let mut panicked = None;
        for handle in handles {
            match handle.join() {
                Ok(mut worker) => {
                    worker.mark_joined();
                    debug!(
                        worker = worker.index(),
                        rows = worker.rows_done(),
                        "worker joined"
                    );
                }
                Err(payload) => {
                    panicked.get_or_insert(payload);
                }
            }
        }
        if let Some(payload) = panicked {
            panic::resume_unwind(payload);
        }
        spawned
    });

    debug_assert!(gate.all_done());
    shared.write_back(grid);
    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavedither_core::diffuse_sequential;

    fn scenario() -> PaddedGrid {
        PaddedGrid::from_rows(&[
            [100, 200, 50, 210],
            [30, 220, 10, 240],
            [0, 255, 5, 190],
            [60, 130, 20, 250],
        ])
        .unwrap()
    }

    #[test]
    fn matches_sequential_scan_for_small_worker_counts() {
        let kernel = DiffusionKernel::floyd_steinberg();
        let mut expected = scenario();
        diffuse_sequential(&mut expected, &kernel);

        for workers in 1..=6 {
            let mut grid = scenario();
            let progress = Progress::new();
            progress.begin(grid.height());
            let spawned = diffuse_parallel(&mut grid, &kernel, workers, &progress);
            assert_eq!(spawned, workers);
            assert_eq!(grid, expected, "workers = {workers}");
            assert_eq!(progress.rows_done(), 4);
        }
    }

    #[test]
    fn zero_workers_runs_one() {
        let kernel = DiffusionKernel::floyd_steinberg();
        let mut grid = scenario();
        let spawned = diffuse_parallel(&mut grid, &kernel, 0, &Progress::new());
        assert_eq!(spawned, 1);
        assert!(grid.is_binary());
    }
}
