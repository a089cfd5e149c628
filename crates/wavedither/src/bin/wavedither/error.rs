//! Error type for the wavedither CLI.

use std::error::Error;
use std::fmt;

use wavedither_bench::BenchError;
use wavedither_core::GridError;
use wavedither_io::IoError;

/// CLI result type alias.
pub type CliResult<T> = Result<T, CliError>;

/// Anything a subcommand can fail with.
#[derive(Debug)]
pub enum CliError {
    /// Reading or writing an image failed.
    Io(IoError),
    /// Building or comparing grids failed.
    Grid(GridError),
    /// The scaling benchmark failed.
    Bench(BenchError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "{e}"),
            Self::Grid(e) => write!(f, "{e}"),
            Self::Bench(e) => write!(f, "{e}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::Bench(e) => Some(e),
        }
    }
}

impl From<IoError> for CliError {
    fn from(e: IoError) -> Self {
        Self::Io(e)
    }
}

impl From<GridError> for CliError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<BenchError> for CliError {
    fn from(e: BenchError) -> Self {
        Self::Bench(e)
    }
}
