//! The Floyd-Steinberg two-level diffusion kernel.
//!
//! One application of the kernel to padded cell `(y, x)`:
//!
//! 1. read `old`;
//! 2. write `new = if old > threshold { 255 } else { 0 }`;
//! 3. `error = old - new`;
//! 4. deposit `floor_div(error * w, 16)` into each of the four
//!    not-yet-visited neighbours:
//!
//! ```text
//!              (y, x)    E: 7
//!   SW: 3      S: 5      SE: 1
//! ```
//!
//! Each fragment is floored independently, so the four deposits do not in
//! general sum to `error`. That drift is part of the output.

use crate::math::floor_div;

/// Quantization threshold: cells strictly above it become [`HIGH`].
pub const THRESHOLD: i32 = 128;

/// Quantized "off" level.
pub const LOW: i32 = 0;

/// Quantized "on" level.
pub const HIGH: i32 = 255;

/// A not-yet-visited neighbour that receives an error fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `(y, x + 1)`
    East,
    /// `(y + 1, x - 1)`
    SouthWest,
    /// `(y + 1, x)`
    South,
    /// `(y + 1, x + 1)`
    SouthEast,
}

impl Direction {
    /// Padded coordinate of this neighbour of `(y, x)`.
    ///
    /// `x` must be at least 1, which holds for every interior cell.
    #[inline]
    pub fn neighbour_of(self, y: usize, x: usize) -> (usize, usize) {
        match self {
            Self::East => (y, x + 1),
            Self::SouthWest => (y + 1, x - 1),
            Self::South => (y + 1, x),
            Self::SouthEast => (y + 1, x + 1),
        }
    }
}

/// Cell storage the kernel reads and writes through.
///
/// The sequential scan implements this on [`PaddedGrid`](crate::PaddedGrid)
/// with plain arithmetic; the wavefront engine implements it on an atomic
/// view where [`deposit`](Self::deposit) is an atomic add.
pub trait CellAccess {
    /// Read the cell being quantized. Only its owner calls this.
    fn load(&mut self, y: usize, x: usize) -> i32;

    /// Write the quantized value back. Only its owner calls this.
    fn store(&mut self, y: usize, x: usize, value: i32);

    /// Add an error fragment to a neighbour cell.
    fn deposit(&mut self, y: usize, x: usize, amount: i32);
}

/// Threshold, weights and divisor of a two-level error-diffusion kernel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffusionKernel {
    threshold: i32,
    divisor: i32,
    taps: [(Direction, i32); 4],
}

impl Default for DiffusionKernel {
    fn default() -> Self {
        Self::floyd_steinberg()
    }
}

impl DiffusionKernel {
    /// The reference kernel: threshold 128, weights 7/3/5/1 over 16.
    pub fn floyd_steinberg() -> Self {
        Self {
            threshold: THRESHOLD,
            divisor: 16,
            taps: [
                (Direction::East, 7),
                (Direction::SouthWest, 3),
                (Direction::South, 5),
                (Direction::SouthEast, 1),
            ],
        }
    }

    /// Quantization threshold.
    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Weight divisor.
    pub fn divisor(&self) -> i32 {
        self.divisor
    }

    /// `(direction, weight)` pairs in deposit order.
    pub fn taps(&self) -> &[(Direction, i32); 4] {
        &self.taps
    }

    /// Two-level quantization of one value.
    #[inline]
    pub fn quantize(&self, old: i32) -> i32 {
        if old > self.threshold {
            HIGH
        } else {
            LOW
        }
    }

    /// The four floored fragments of `error`, in deposit order.
    #[inline]
    pub fn fragments(&self, error: i32) -> [(Direction, i32); 4] {
        self.taps
            .map(|(dir, weight)| (dir, floor_div(error * weight, self.divisor)))
    }

    /// Quantize padded cell `(y, x)` and push its error to the neighbours.
    ///
    /// Returns the quantization error. Must be applied exactly once per
    /// interior cell, after every cell that deposits into `(y, x)`.
    #[inline]
    pub fn apply<A: CellAccess + ?Sized>(&self, cells: &mut A, y: usize, x: usize) -> i32 {
        let old = cells.load(y, x);
        let new = self.quantize(old);
        cells.store(y, x, new);
        let error = old - new;
        for (dir, amount) in self.fragments(error) {
            let (ny, nx) = dir.neighbour_of(y, x);
            cells.deposit(ny, nx, amount);
        }
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PaddedGrid;

    #[test]
    fn quantize_is_strictly_above_threshold() {
        let k = DiffusionKernel::floyd_steinberg();
        assert_eq!(k.quantize(128), LOW);
        assert_eq!(k.quantize(129), HIGH);
        assert_eq!(k.quantize(-500), LOW);
        assert_eq!(k.quantize(900), HIGH);
    }

    #[test]
    fn weights_sum_to_divisor() {
        let k = DiffusionKernel::floyd_steinberg();
        let total: i32 = k.taps().iter().map(|&(_, w)| w).sum();
        assert_eq!(total, k.divisor());
    }

    #[test]
    fn fragments_are_independently_floored() {
        let k = DiffusionKernel::floyd_steinberg();
        let f = k.fragments(-1);
        assert_eq!(
            f,
            [
                (Direction::East, -1),
                (Direction::SouthWest, -1),
                (Direction::South, -1),
                (Direction::SouthEast, -1),
            ]
        );
        let f = k.fragments(1);
        assert!(f.iter().all(|&(_, amount)| amount == 0));
    }

    #[test]
    fn direction_offsets() {
        assert_eq!(Direction::East.neighbour_of(3, 3), (3, 4));
        assert_eq!(Direction::SouthWest.neighbour_of(3, 3), (4, 2));
        assert_eq!(Direction::South.neighbour_of(3, 3), (4, 3));
        assert_eq!(Direction::SouthEast.neighbour_of(3, 3), (4, 4));
    }

    #[test]
    fn apply_touches_exactly_five_cells() {
        let mut grid = PaddedGrid::from_rows(&[[0, 0, 0], [0, 100, 0], [0, 0, 0]]).unwrap();
        let k = DiffusionKernel::floyd_steinberg();
        let error = k.apply(&mut grid, 2, 2);
        assert_eq!(error, 100);
        assert_eq!(grid.get(2, 2), 0);
        assert_eq!(grid.get(2, 3), 43);
        assert_eq!(grid.get(3, 1), 18);
        assert_eq!(grid.get(3, 2), 31);
        assert_eq!(grid.get(3, 3), 6);
        // Nothing north or west of the cell changes.
        assert_eq!(grid.get(1, 1), 0);
        assert_eq!(grid.get(1, 2), 0);
        assert_eq!(grid.get(1, 3), 0);
        assert_eq!(grid.get(2, 1), 0);
    }

    #[test]
    fn apply_upward_quantization_pushes_negative_error() {
        let mut grid = PaddedGrid::from_rows(&[[200, 50], [60, 70]]).unwrap();
        let k = DiffusionKernel::floyd_steinberg();
        // 200 -> 255, error -55.
        let error = k.apply(&mut grid, 1, 1);
        assert_eq!(error, -55);
        assert_eq!(grid.get(1, 1), 255);
        assert_eq!(grid.get(1, 2), 50 - 25); // floor(-385/16) = -25
        assert_eq!(grid.get(2, 0), -11); // border absorbs floor(-165/16)
        assert_eq!(grid.get(2, 1), 60 - 18); // floor(-275/16) = -18
        assert_eq!(grid.get(2, 2), 70 - 4); // floor(-55/16) = -4
    }
}
