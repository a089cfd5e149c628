//! Subcommand implementations.

use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::info;
use wavedither_bench::{export_csv, gradient_grid, ScalingConfig, ScalingHarness};
use wavedither_core::{binary_similarity, compare_interior};
use wavedither_engine::{DitherEngine, EngineConfig};
use wavedither_io::{load_grid, save_difference, save_grid};

use crate::error::CliResult;
use crate::reporter::{ProgressReporter, ReportingObserver};

/// `wavedither dither <input> <output> [--threads N]`
pub fn dither(input: &Path, output: &Path, threads: Option<usize>, quiet: bool) -> CliResult<()> {
    let grid = load_grid(input)?;
    let engine = DitherEngine::new(EngineConfig {
        worker_count: threads,
    });

    let reporter = (!quiet).then(|| ProgressReporter::start("Dither", engine.progress()));
    let report = engine.run(grid);
    if let Some(reporter) = reporter {
        reporter.finish(report.metrics.elapsed());
    }

    save_grid(&report.grid, output)?;
    let m = &report.metrics;
    info!(output = %output.display(), "dithered image written");
    if m.degraded() && !quiet {
        println!(
            "{} only {} of {} worker thread(s) started; the rest ran on the main thread",
            "Warning:".yellow().bold(),
            m.spawned_workers,
            m.workers
        );
    }
    if !quiet {
        println!(
            "{} {}x{} with {} worker(s){} -> {}",
            "Dithered".green().bold(),
            m.width,
            m.height,
            m.workers,
            if m.sequential { " (sequential)" } else { "" },
            output.display().to_string().bright_white()
        );
    }
    Ok(())
}

/// Input for `wavedither bench`.
pub enum BenchInput {
    /// Generated diagonal gradient.
    Gradient { width: usize, height: usize },
    /// An image file.
    File(PathBuf),
}

/// `wavedither bench [...]`
pub fn bench(
    input: BenchInput,
    max_threads: Option<usize>,
    csv: Option<&Path>,
    output_dir: Option<PathBuf>,
    quiet: bool,
) -> CliResult<()> {
    let grid = match input {
        BenchInput::Gradient { width, height } => gradient_grid(width, height)?,
        BenchInput::File(path) => load_grid(&path)?,
    };
    if !quiet {
        println!("Image Size: {}x{}", grid.width(), grid.height());
    }

    let harness = ScalingHarness::new(ScalingConfig {
        max_workers: max_threads,
        output_dir,
    });
    let report = if quiet {
        harness.run(&grid)?
    } else {
        println!("\n--- Running Sequential (Ground Truth) ---");
        harness.run_observed(&grid, &mut ReportingObserver::default())?
    };

    if !quiet {
        println!("\n\n--- BENCHMARK SUMMARY ---");
        println!("{report}");
        println!("{}", "All parallel runs matched the sequential output.".green());
    }
    if let Some(path) = csv {
        export_csv(&report, path)?;
        if !quiet {
            println!("\nBenchmark results exported to {}", path.display());
        }
    }
    Ok(())
}

/// `wavedither compare <a> <b> [--diff PATH]`
pub fn compare(a: &Path, b: &Path, diff: Option<&Path>, quiet: bool) -> CliResult<()> {
    let left = load_grid(a)?;
    let right = load_grid(b)?;
    let similarity = binary_similarity(&left, &right)?;
    let report = compare_interior(&left, &right)?;
    if let Some(path) = diff {
        save_difference(&left, &right, path)?;
        info!(path = %path.display(), "difference image written");
    }

    if quiet {
        return Ok(());
    }
    println!("Similarity: {:.2}%", similarity * 100.0);
    if report.is_identical() {
        println!("{}", "Images are identical.".green());
    } else {
        println!(
            "{} {} differing pixel(s)",
            "Differences:".yellow(),
            report.total
        );
        for m in &report.samples {
            println!("  {m}");
        }
    }
    if let Some(path) = diff {
        println!("Difference image written to {}", path.display());
    }
    Ok(())
}
