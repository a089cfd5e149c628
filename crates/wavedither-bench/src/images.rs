//! Deterministic benchmark inputs.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use wavedither_core::{GridError, PaddedGrid};

/// Diagonal gradient from black at the top-left to nearly white at the
/// bottom-right: `(x + y) / (width + height) * 255`, truncated.
///
/// Computed in `f32` so the values match images produced by other tools
/// that use single precision.
pub fn gradient_grid(width: usize, height: usize) -> Result<PaddedGrid, GridError> {
    let mut grid = PaddedGrid::new(width, height)?;
    let span = (width + height) as f32;
    for row in 0..height {
        for (col, cell) in grid.interior_row_mut(row).iter_mut().enumerate() {
            *cell = ((col + row) as f32 / span * 255.0) as i32;
        }
    }
    Ok(grid)
}

/// Uniform noise in `[0, 255]` from a seeded ChaCha8 stream.
pub fn noise_grid(width: usize, height: usize, seed: u64) -> Result<PaddedGrid, GridError> {
    let mut grid = PaddedGrid::new(width, height)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for row in 0..height {
        for cell in grid.interior_row_mut(row) {
            *cell = rng.random_range(0..=255);
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_corners() {
        let grid = gradient_grid(4, 4).unwrap();
        assert_eq!(grid.interior(0, 0), 0);
        // (3 + 3) / 8 * 255 = 191.25
        assert_eq!(grid.interior(3, 3), 191);
        // (1 + 0) / 8 * 255 = 31.875
        assert_eq!(grid.interior(0, 1), 31);
        assert_eq!(grid.interior(1, 0), 31);
    }

    #[test]
    fn gradient_never_reaches_white() {
        let grid = gradient_grid(17, 5).unwrap();
        let max = grid.to_interior_vec().into_iter().max().unwrap();
        assert!(max < 255);
        assert_eq!(grid.get(0, 0), 0);
    }

    #[test]
    fn noise_is_seeded_and_in_range() {
        let a = noise_grid(16, 9, 7).unwrap();
        let b = noise_grid(16, 9, 7).unwrap();
        let c = noise_grid(16, 9, 8).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.to_interior_vec().iter().all(|v| (0..=255).contains(v)));
    }

    #[test]
    fn empty_shapes_are_rejected() {
        assert!(gradient_grid(0, 3).is_err());
        assert!(noise_grid(3, 0, 1).is_err());
    }
}
