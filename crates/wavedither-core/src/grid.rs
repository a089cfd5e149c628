//! Padded row-major intensity grid.
//!
//! A logical `width x height` image is stored with one extra row and column
//! on every side, so the padded shape is `(height + 2) x (width + 2)`. The
//! border absorbs error fragments pushed past the image edge; its values are
//! scratch and never part of the output.
//!
//! Two coordinate systems are used throughout the workspace:
//!
//! - **padded** `(y, x)` with `1 <= y <= height` and `1 <= x <= width` for
//!   interior cells, as seen by the kernel and the wavefront gate;
//! - **logical** `(row, col)` with `row < height` and `col < width`, as seen
//!   by codecs and comparison reports.

use crate::error::GridError;
use crate::kernel::{CellAccess, HIGH, LOW};

/// An `i32` intensity grid with a one-cell border on every side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaddedGrid {
    width: usize,
    height: usize,
    cells: Vec<i32>,
}

impl PaddedGrid {
    /// Create a zero-filled grid with the given logical shape.
    ///
    /// Returns `Err(GridError::EmptyGrid)` if either dimension is zero, or
    /// `Err(GridError::DimensionTooLarge)` if the padded cell count would
    /// overflow `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let len = padded_len(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![0; len],
        })
    }

    /// Build a grid from a row-major interior buffer of `width * height`
    /// intensities. The border is zeroed.
    pub fn from_interior(width: usize, height: usize, values: &[i32]) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height)?;
        let expected = width * height;
        if values.len() != expected {
            return Err(GridError::LengthMismatch {
                expected,
                actual: values.len(),
            });
        }
        for (row, src) in values.chunks_exact(width).enumerate() {
            grid.interior_row_mut(row).copy_from_slice(src);
        }
        Ok(grid)
    }

    /// Build a grid from a slice of equal-length rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavedither_core::PaddedGrid;
    ///
    /// let grid = PaddedGrid::from_rows(&[[10, 20, 30], [40, 50, 60]]).unwrap();
    /// assert_eq!((grid.width(), grid.height()), (3, 2));
    /// assert_eq!(grid.interior(1, 2), 60);
    /// assert_eq!(grid.get(2, 3), 60);
    /// ```
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut grid = Self::new(width, height)?;
        for (row, src) in rows.iter().enumerate() {
            let src = src.as_ref();
            if src.len() != width {
                return Err(GridError::RaggedRows {
                    row,
                    expected: width,
                    actual: src.len(),
                });
            }
            grid.interior_row_mut(row).copy_from_slice(src);
        }
        Ok(grid)
    }

    /// Logical width (columns of the image).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Logical height (rows of the image).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Width including the two border columns.
    pub fn padded_width(&self) -> usize {
        self.width + 2
    }

    /// Height including the two border rows.
    pub fn padded_height(&self) -> usize {
        self.height + 2
    }

    /// Number of interior cells.
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Flat index of padded coordinate `(y, x)`.
    #[inline]
    pub fn index(&self, y: usize, x: usize) -> usize {
        debug_assert!(y < self.padded_height() && x < self.padded_width());
        y * self.padded_width() + x
    }

    /// Whether padded `(y, x)` lies on the border.
    pub fn is_border(&self, y: usize, x: usize) -> bool {
        y == 0 || x == 0 || y == self.height + 1 || x == self.width + 1
    }

    /// Value at padded `(y, x)`.
    #[inline]
    pub fn get(&self, y: usize, x: usize) -> i32 {
        self.cells[self.index(y, x)]
    }

    /// Overwrite the value at padded `(y, x)`.
    #[inline]
    pub fn set(&mut self, y: usize, x: usize, value: i32) {
        let i = self.index(y, x);
        self.cells[i] = value;
    }

    /// Value at logical `(row, col)`.
    pub fn interior(&self, row: usize, col: usize) -> i32 {
        self.get(row + 1, col + 1)
    }

    /// Overwrite the value at logical `(row, col)`.
    pub fn set_interior(&mut self, row: usize, col: usize, value: i32) {
        self.set(row + 1, col + 1, value);
    }

    /// Interior cells of logical row `row`.
    pub fn interior_row(&self, row: usize) -> &[i32] {
        let start = self.index(row + 1, 1);
        &self.cells[start..start + self.width]
    }

    /// Mutable interior cells of logical row `row`.
    pub fn interior_row_mut(&mut self, row: usize) -> &mut [i32] {
        let start = self.index(row + 1, 1);
        let width = self.width;
        &mut self.cells[start..start + width]
    }

    /// Iterate interior rows top to bottom.
    pub fn interior_rows(&self) -> impl Iterator<Item = &[i32]> + '_ {
        (0..self.height).map(move |row| self.interior_row(row))
    }

    /// Copy the interior into a row-major `Vec` of `width * height` cells.
    pub fn to_interior_vec(&self) -> Vec<i32> {
        let mut out = Vec::with_capacity(self.cell_count());
        for row in self.interior_rows() {
            out.extend_from_slice(row);
        }
        out
    }

    /// Interior clamped to `[0, 255]`, row-major, ready for an 8-bit encoder.
    pub fn clamped_interior(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.cell_count());
        for row in self.interior_rows() {
            out.extend(row.iter().map(|&v| v.clamp(LOW, HIGH) as u8));
        }
        out
    }

    /// Whether every interior cell is exactly [`LOW`] or [`HIGH`].
    pub fn is_binary(&self) -> bool {
        self.interior_rows()
            .all(|row| row.iter().all(|&v| v == LOW || v == HIGH))
    }

    /// The whole padded buffer, row-major.
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    /// The whole padded buffer, mutably. The shape cannot change through it.
    pub fn cells_mut(&mut self) -> &mut [i32] {
        &mut self.cells
    }
}

impl CellAccess for PaddedGrid {
    #[inline]
    fn load(&mut self, y: usize, x: usize) -> i32 {
        self.get(y, x)
    }

    #[inline]
    fn store(&mut self, y: usize, x: usize, value: i32) {
        self.set(y, x, value);
    }

    #[inline]
    fn deposit(&mut self, y: usize, x: usize, amount: i32) {
        let i = self.index(y, x);
        self.cells[i] += amount;
    }
}

/// `(width + 2) * (height + 2)`, validated.
pub(crate) fn padded_len(width: usize, height: usize) -> Result<usize, GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::EmptyGrid { width, height });
    }
    let too_large = GridError::DimensionTooLarge { width, height };
    let pw = width.checked_add(2).ok_or_else(|| too_large.clone())?;
    let ph = height.checked_add(2).ok_or_else(|| too_large.clone())?;
    pw.checked_mul(ph).ok_or(too_large)
}
