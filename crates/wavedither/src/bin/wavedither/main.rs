//! Wavedither CLI: dither images, benchmark worker scaling, compare outputs.
//!
//! # Commands
//!
//! - `wavedither dither <input> <output>` - Dither an image to black and white
//! - `wavedither bench` - Time the wavefront engine at every worker count
//! - `wavedither compare <a> <b>` - 1-bit similarity of two images, optional red difference image
//!
//! # Examples
//!
//! ```bash
//! # Dither with 8 worker threads
//! wavedither dither photo.png photo_bw.png --threads 8
//!
//! # Scaling sweep on a 4096x4096 gradient, exporting results.csv
//! wavedither bench --csv results.csv
//!
//! # Check two outputs agree, marking differences in diff.png
//! wavedither compare a.png b.png --diff diff.png
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod reporter;

use commands::BenchInput;

/// Wavedither - wavefront-parallel Floyd-Steinberg dithering
#[derive(Parser)]
#[command(name = "wavedither")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dither an image to pure black and white
    Dither {
        /// Input image (any format the decoder understands)
        input: PathBuf,

        /// Output image; format is chosen from the extension
        output: PathBuf,

        /// Worker threads (default: one per hardware thread)
        #[arg(short, long)]
        threads: Option<usize>,
    },

    /// Benchmark the engine at every worker count up to a maximum
    Bench {
        /// Gradient width
        #[arg(long, default_value_t = 4096)]
        width: usize,

        /// Gradient height
        #[arg(long, default_value_t = 4096)]
        height: usize,

        /// Benchmark this image instead of a generated gradient
        #[arg(short, long, conflicts_with_all = ["width", "height"])]
        input: Option<PathBuf>,

        /// Highest worker count to measure (clamped to hardware threads)
        #[arg(short, long)]
        max_threads: Option<usize>,

        /// Write results as CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Save every run's output image into this directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Compare two images after thresholding both to 1 bit
    Compare {
        /// First image
        a: PathBuf,

        /// Second image
        b: PathBuf,

        /// Write an image of the first input with differing pixels in red
        #[arg(short, long)]
        diff: Option<PathBuf>,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Dither {
            input,
            output,
            threads,
        } => commands::dither(&input, &output, threads, cli.quiet),

        Commands::Bench {
            width,
            height,
            input,
            max_threads,
            csv,
            output_dir,
        } => {
            let input = match input {
                Some(path) => BenchInput::File(path),
                None => BenchInput::Gradient { width, height },
            };
            commands::bench(input, max_threads, csv.as_deref(), output_dir, cli.quiet)
        }

        Commands::Compare { a, b, diff } => commands::compare(&a, &b, diff.as_deref(), cli.quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
