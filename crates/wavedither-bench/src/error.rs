//! Error types for the scaling harness.

use std::error::Error;
use std::fmt;
use std::io;

use wavedither_core::{GridError, Mismatch};
use wavedither_io::IoError;

/// Errors from [`ScalingHarness`](crate::ScalingHarness) and CSV export.
#[derive(Debug)]
pub enum BenchError {
    /// A parallel run disagreed with the sequential reference.
    VerificationFailed {
        /// Worker count of the failing run.
        workers: usize,
        /// First differing interior pixel.
        mismatch: Mismatch,
    },
    /// The benchmark grid could not be built or compared.
    Grid(GridError),
    /// A run's output image could not be written.
    Output(IoError),
    /// CSV serialization failed.
    Csv(csv::Error),
    /// The CSV destination could not be written.
    Io(io::Error),
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VerificationFailed { workers, mismatch } => write!(
                f,
                "verification failed with {workers} worker(s): mismatch at pixel ({}, {})",
                mismatch.col, mismatch.row
            ),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Output(e) => write!(f, "output image: {e}"),
            Self::Csv(e) => write!(f, "csv: {e}"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl Error for BenchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Output(e) => Some(e),
            Self::Csv(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::VerificationFailed { .. } => None,
        }
    }
}

impl From<GridError> for BenchError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<IoError> for BenchError {
    fn from(e: IoError) -> Self {
        Self::Output(e)
    }
}

impl From<csv::Error> for BenchError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl From<io::Error> for BenchError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
