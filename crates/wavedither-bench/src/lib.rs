//! Benchmark inputs and the scaling harness for wavedither.
//!
//! - [`gradient_grid`] / [`noise_grid`]: deterministic inputs.
//! - [`ScalingHarness`]: sequential reference plus a verified wavefront run
//!   at every worker count up to a maximum.
//! - [`export_csv`]: the `Threads,Time_ms,Speedup,Type` table.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod export;
pub mod images;
pub mod scaling;

pub use error::BenchError;
pub use export::{export_csv, write_csv, CSV_HEADER};
pub use images::{gradient_grid, noise_grid};
pub use scaling::{
    speedup, verify, Measurement, RunKind, ScalingConfig, ScalingHarness, ScalingObserver,
    ScalingReport,
};
