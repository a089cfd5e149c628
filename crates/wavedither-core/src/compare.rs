//! Interior comparison between two grids.
//!
//! Used to verify wavefront output against the single-worker reference and
//! to score how closely two dithered images agree. Border cells are never
//! compared: they hold absorbed fragments, not output.

use smallvec::SmallVec;

use crate::error::GridError;
use crate::grid::PaddedGrid;
use crate::kernel::THRESHOLD;

/// Number of mismatches a [`MismatchReport`] keeps inline.
const SAMPLE_LIMIT: usize = 8;

/// One interior cell whose value differs between two grids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mismatch {
    /// Logical row.
    pub row: usize,
    /// Logical column.
    pub col: usize,
    /// Value in the reference (left) grid.
    pub expected: i32,
    /// Value in the candidate (right) grid.
    pub actual: i32,
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "pixel ({}, {}): expected {}, got {}",
            self.col, self.row, self.expected, self.actual
        )
    }
}

/// Summary of every interior difference between two grids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MismatchReport {
    /// Total number of differing interior cells.
    pub total: usize,
    /// The first few mismatches in raster order.
    pub samples: SmallVec<[Mismatch; SAMPLE_LIMIT]>,
}

impl MismatchReport {
    /// Whether the grids agree on every interior cell.
    pub fn is_identical(&self) -> bool {
        self.total == 0
    }

    /// First mismatch in raster order, if any.
    pub fn first(&self) -> Option<Mismatch> {
        self.samples.first().copied()
    }
}

fn check_shape(a: &PaddedGrid, b: &PaddedGrid) -> Result<(), GridError> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(GridError::ShapeMismatch {
            left: (a.width(), a.height()),
            right: (b.width(), b.height()),
        });
    }
    Ok(())
}

/// Compare interiors cell by cell.
pub fn compare_interior(
    reference: &PaddedGrid,
    candidate: &PaddedGrid,
) -> Result<MismatchReport, GridError> {
    check_shape(reference, candidate)?;
    let mut report = MismatchReport::default();
    for (row, (r, c)) in reference
        .interior_rows()
        .zip(candidate.interior_rows())
        .enumerate()
    {
        for (col, (&expected, &actual)) in r.iter().zip(c).enumerate() {
            if expected != actual {
                report.total += 1;
                if report.samples.len() < SAMPLE_LIMIT {
                    report.samples.push(Mismatch {
                        row,
                        col,
                        expected,
                        actual,
                    });
                }
            }
        }
    }
    Ok(report)
}

/// First differing interior cell in raster order, stopping at the first hit.
pub fn first_mismatch(
    reference: &PaddedGrid,
    candidate: &PaddedGrid,
) -> Result<Option<Mismatch>, GridError> {
    check_shape(reference, candidate)?;
    let found = reference
        .interior_rows()
        .zip(candidate.interior_rows())
        .enumerate()
        .find_map(|(row, (r, c))| {
            r.iter()
                .zip(c)
                .position(|(a, b)| a != b)
                .map(|col| Mismatch {
                    row,
                    col,
                    expected: r[col],
                    actual: c[col],
                })
        });
    Ok(found)
}

/// RGB colour of a cell whose one-bit values differ.
pub const DIFF_MARK: [u8; 3] = [255, 0, 0];

/// Row-major RGB8 bytes visualizing where two grids differ at one bit.
///
/// Each interior cell is black or white from `base`'s one-bit value, except
/// cells where `base` and `other` disagree, which are [`DIFF_MARK`].
pub fn binary_difference_rgb(base: &PaddedGrid, other: &PaddedGrid) -> Result<Vec<u8>, GridError> {
    check_shape(base, other)?;
    let mut rgb = Vec::with_capacity(base.cell_count() * 3);
    for (ra, rb) in base.interior_rows().zip(other.interior_rows()) {
        for (&va, &vb) in ra.iter().zip(rb) {
            let bit = va > THRESHOLD;
            let pixel = if bit != (vb > THRESHOLD) {
                DIFF_MARK
            } else if bit {
                [255; 3]
            } else {
                [0; 3]
            };
            rgb.extend_from_slice(&pixel);
        }
    }
    Ok(rgb)
}

/// Fraction of interior cells on which two grids agree after both are
/// thresholded to one bit (`value > 128`).
///
/// Returns a value in `[0.0, 1.0]`.
pub fn binary_similarity(a: &PaddedGrid, b: &PaddedGrid) -> Result<f64, GridError> {
    check_shape(a, b)?;
    let agree: usize = a
        .interior_rows()
        .zip(b.interior_rows())
        .map(|(ra, rb)| {
            ra.iter()
                .zip(rb)
                .filter(|&(va, vb)| (*va > THRESHOLD) == (*vb > THRESHOLD))
                .count()
        })
        .sum();
    Ok(agree as f64 / a.cell_count() as f64)
}
