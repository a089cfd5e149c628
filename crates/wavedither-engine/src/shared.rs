//! Atomic copy of a padded grid that wavefront workers share.
//!
//! Every cell is an [`AtomicI32`]. A cell has two kinds of writers: its row
//! owner, which reads and overwrites it exactly once, and up to four
//! neighbours that add error fragments into it. Neighbour deposits are
//! `fetch_add`; the owner's read and write are plain relaxed loads and
//! stores, since the wavefront gate already orders them after every deposit
//! that can reach the cell. All cross-thread visibility comes from the
//! gate's release/acquire pair, so every operation here is `Relaxed`.

use std::sync::atomic::{AtomicI32, Ordering};

use wavedither_core::{CellAccess, PaddedGrid};

/// A padded grid with atomic cells.
pub struct SharedGrid {
    padded_width: usize,
    padded_height: usize,
    cells: Box<[AtomicI32]>,
}

// Compile-time assertion: workers borrow SharedGrid across threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SharedGrid>();
};

impl SharedGrid {
    /// Copy `grid`, border included, into atomic storage.
    pub fn from_grid(grid: &PaddedGrid) -> Self {
        Self {
            padded_width: grid.padded_width(),
            padded_height: grid.padded_height(),
            cells: grid.cells().iter().map(|&v| AtomicI32::new(v)).collect(),
        }
    }

    /// Copy every cell back into `grid`, which must have the shape this
    /// grid was built from.
    pub fn write_back(self, grid: &mut PaddedGrid) {
        debug_assert_eq!(grid.padded_width(), self.padded_width);
        debug_assert_eq!(grid.padded_height(), self.padded_height);
        for (dst, src) in grid.cells_mut().iter_mut().zip(self.cells.into_vec()) {
            *dst = src.into_inner();
        }
    }

    /// Current value at padded `(y, x)`.
    pub fn get(&self, y: usize, x: usize) -> i32 {
        self.cell(y, x).load(Ordering::Relaxed)
    }

    /// A [`CellAccess`] handle the kernel can write through.
    pub fn view(&self) -> GridView<'_> {
        GridView { grid: self }
    }

    #[inline]
    fn cell(&self, y: usize, x: usize) -> &AtomicI32 {
        debug_assert!(y < self.padded_height && x < self.padded_width);
        &self.cells[y * self.padded_width + x]
    }
}

/// Borrowed kernel access to a [`SharedGrid`].
///
/// Each worker holds its own copy; many views may exist at once.
#[derive(Clone, Copy)]
pub struct GridView<'a> {
    grid: &'a SharedGrid,
}

impl CellAccess for GridView<'_> {
    #[inline]
    fn load(&mut self, y: usize, x: usize) -> i32 {
        self.grid.cell(y, x).load(Ordering::Relaxed)
    }

    #[inline]
    fn store(&mut self, y: usize, x: usize, value: i32) {
        self.grid.cell(y, x).store(value, Ordering::Relaxed);
    }

    #[inline]
    fn deposit(&mut self, y: usize, x: usize, amount: i32) {
        self.grid.cell(y, x).fetch_add(amount, Ordering::Relaxed);
    }
}
