//! Live `label: rows/total (pct%)` progress line.
//!
//! A background thread redraws the line every 100 ms from the shared
//! [`Progress`] counter until it is told to stop over a channel.

use std::io::{self, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use tracing::warn;
use wavedither_bench::{RunKind, ScalingObserver};
use wavedither_engine::Progress;

const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

fn draw(label: &str, progress: &Progress) {
    let pct = progress.fraction() * 100.0;
    let mut out = io::stdout().lock();
    let _ = write!(
        out,
        "\r{label}: {}/{} rows ({pct:.1}%)",
        progress.rows_done(),
        progress.rows_total()
    );
    let _ = out.flush();
}

/// A running progress line.
pub struct ProgressReporter {
    label: String,
    progress: Arc<Progress>,
    stop: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressReporter {
    /// Start redrawing `label` from `progress`.
    ///
    /// If the reporter thread cannot be spawned the run proceeds without a
    /// live line; only the final summary is printed.
    pub fn start(label: impl Into<String>, progress: Arc<Progress>) -> Self {
        let label = label.into();
        let (stop, stopped) = bounded::<()>(1);

        let thread_label = label.clone();
        let thread_progress = Arc::clone(&progress);
        let spawned = thread::Builder::new()
            .name("wavedither-progress".into())
            .spawn(move || loop {
                draw(&thread_label, &thread_progress);
                match stopped.recv_timeout(REDRAW_INTERVAL) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            });
        let handle = match spawned {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!(error = %err, "progress reporter unavailable");
                None
            }
        };

        Self {
            label,
            progress,
            stop,
            handle,
        }
    }

    /// Stop the thread and print the completed line with the run time.
    pub fn finish(mut self, elapsed: Duration) {
        let _ = self.stop.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        println!(
            "\r{}: {total}/{total} rows (100.0%) - Time: {} ms      ",
            self.label,
            elapsed.as_millis(),
            total = self.progress.rows_total()
        );
    }
}

/// Drives a [`ProgressReporter`] per scaling run.
#[derive(Default)]
pub struct ReportingObserver {
    active: Option<ProgressReporter>,
}

impl ScalingObserver for ReportingObserver {
    fn run_started(&mut self, kind: RunKind, progress: &Arc<Progress>) {
        if let RunKind::Parallel { workers } = kind {
            println!("\n-> Testing with {workers} thread(s)...");
        }
        self.active = Some(ProgressReporter::start(kind.label(), Arc::clone(progress)));
    }

    fn run_finished(&mut self, _kind: RunKind, elapsed: Duration) {
        if let Some(reporter) = self.active.take() {
            reporter.finish(elapsed);
        }
    }
}
