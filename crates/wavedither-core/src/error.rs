//! Error types for grid construction and comparison.

use std::error::Error;
use std::fmt;

/// Errors from building or comparing [`PaddedGrid`](crate::PaddedGrid)s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Width or height is zero.
    EmptyGrid {
        /// Requested logical width.
        width: usize,
        /// Requested logical height.
        height: usize,
    },
    /// The padded cell count does not fit in `usize`.
    DimensionTooLarge {
        /// Requested logical width.
        width: usize,
        /// Requested logical height.
        height: usize,
    },
    /// An interior buffer has the wrong number of cells.
    LengthMismatch {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
    /// A row-by-row literal has rows of different lengths.
    RaggedRows {
        /// Index of the first row whose length differs from row 0.
        row: usize,
        /// Length of row 0.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
    /// Two grids being compared have different logical shapes.
    ShapeMismatch {
        /// `(width, height)` of the left grid.
        left: (usize, usize),
        /// `(width, height)` of the right grid.
        right: (usize, usize),
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => {
                write!(f, "grid must have at least one cell, got {width}x{height}")
            }
            Self::DimensionTooLarge { width, height } => {
                write!(f, "padded grid for {width}x{height} overflows usize")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "expected {expected} interior cells, got {actual}")
            }
            Self::RaggedRows {
                row,
                expected,
                actual,
            } => write!(f, "row {row} has {actual} cells, expected {expected}"),
            Self::ShapeMismatch { left, right } => write!(
                f,
                "grid shapes differ: {}x{} vs {}x{}",
                left.0, left.1, right.0, right.1
            ),
        }
    }
}

impl Error for GridError {}
