//! Single-threaded raster scan.
//!
//! Rows top to bottom, each left to right. This is the reference order the
//! wavefront engine must reproduce, and the path the engine takes itself when
//! only one worker is available.

use crate::grid::PaddedGrid;
use crate::kernel::DiffusionKernel;

/// Apply `kernel` to every interior cell of padded row `y`, left to right.
pub fn diffuse_row(grid: &mut PaddedGrid, kernel: &DiffusionKernel, y: usize) {
    debug_assert!((1..=grid.height()).contains(&y));
    for x in 1..=grid.width() {
        kernel.apply(grid, y, x);
    }
}

/// Dither the whole grid in raster order.
///
/// # Examples
///
/// ```
/// use wavedither_core::{diffuse_sequential, DiffusionKernel, PaddedGrid};
///
/// let mut grid = PaddedGrid::from_rows(&[[200, 200], [200, 200]]).unwrap();
/// diffuse_sequential(&mut grid, &DiffusionKernel::floyd_steinberg());
/// assert!(grid.interior_rows().all(|row| row == [255, 255]));
/// ```
pub fn diffuse_sequential(grid: &mut PaddedGrid, kernel: &DiffusionKernel) {
    for y in 1..=grid.height() {
        diffuse_row(grid, kernel, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dither(rows: &[[i32; 4]]) -> PaddedGrid {
        let mut grid = PaddedGrid::from_rows(rows).unwrap();
        diffuse_sequential(&mut grid, &DiffusionKernel::floyd_steinberg());
        grid
    }

    #[test]
    fn constant_above_threshold_saturates() {
        let grid = dither(&[[200; 4]; 4]);
        assert!(grid.interior_rows().all(|row| row.iter().all(|&v| v == 255)));
    }

    #[test]
    fn constant_white_has_no_error() {
        let grid = dither(&[[255; 4]; 4]);
        assert_eq!(grid.to_interior_vec(), vec![255; 16]);
        // Zero error everywhere: nothing reaches the border.
        assert!(grid.cells().iter().all(|&v| v == 0 || v == 255));
    }

    #[test]
    fn constant_black_stays_black() {
        let grid = dither(&[[0; 4]; 4]);
        assert_eq!(grid.to_interior_vec(), vec![0; 16]);
    }

    #[test]
    fn mixed_scenario_error_trace() {
        // (value at quantization time, error pushed) per cell, raster order.
        const TRACE: [[(i32, i32); 4]; 4] = [
            [(100, 100), (243, -12), (44, 44), (229, -26)],
            [(58, 58), (255, 0), (17, 17), (240, -15)],
            [(18, 18), (268, 13), (12, 12), (191, -64)],
            [(67, 67), (166, -89), (-28, -28), (217, -38)],
        ];
        let mut grid = PaddedGrid::from_rows(&[
            [100, 200, 50, 210],
            [30, 220, 10, 240],
            [0, 255, 5, 190],
            [60, 130, 20, 250],
        ])
        .unwrap();
        let kernel = DiffusionKernel::floyd_steinberg();

        for (row, expected) in TRACE.iter().enumerate() {
            for (col, &(old, error)) in expected.iter().enumerate() {
                let (y, x) = (row + 1, col + 1);
                assert_eq!(grid.get(y, x), old, "value at ({row}, {col})");
                assert_eq!(kernel.apply(&mut grid, y, x), error, "error at ({row}, {col})");
            }
        }
        assert_eq!(
            grid.to_interior_vec(),
            [[0, 255, 0, 255]; 4].concat()
        );
    }

    #[test]
    fn mid_gray_dithers_to_roughly_half_on() {
        let mut grid = PaddedGrid::from_interior(32, 32, &[128; 32 * 32]).unwrap();
        diffuse_sequential(&mut grid, &DiffusionKernel::floyd_steinberg());
        let on = grid.to_interior_vec().iter().filter(|&&v| v == 255).count();
        assert!(
            (400..=624).contains(&on),
            "expected about half of 1024 cells on, got {on}"
        );
    }
}
