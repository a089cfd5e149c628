//! Bounds-checked reference implementation.
//!
//! Works on an unpadded buffer and skips deposits that would fall outside
//! the image, instead of letting a border absorb them. Fragments are
//! floored with `div_euclid`, not with `wavedither_core::floor_div`, so the
//! two paths share no arithmetic.

use wavedither_core::PaddedGrid;

/// Dither a row-major `width x height` buffer, returning the binary output.
pub fn reference_dither(width: usize, height: usize, input: &[i32]) -> Vec<i32> {
    assert_eq!(input.len(), width * height, "input length");
    let mut work = input.to_vec();
    let mut out = vec![0; input.len()];

    for y in 0..height {
        for x in 0..width {
            let old = work[y * width + x];
            let new = if old > 128 { 255 } else { 0 };
            out[y * width + x] = new;
            let error = old - new;
            let x = x as isize;
            let mut push = |ny: usize, nx: isize, weight: i32| {
                if nx >= 0 && (nx as usize) < width && ny < height {
                    work[ny * width + nx as usize] += (error * weight).div_euclid(16);
                }
            };
            push(y, x + 1, 7);
            push(y + 1, x - 1, 3);
            push(y + 1, x, 5);
            push(y + 1, x + 1, 1);
        }
    }
    out
}

/// [`reference_dither`] applied to a padded grid's interior.
pub fn reference_dither_grid(grid: &PaddedGrid) -> Vec<i32> {
    reference_dither(grid.width(), grid.height(), &grid.to_interior_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_row_of_scenario() {
        let out = reference_dither_grid(&crate::scenario_grid());
        assert_eq!(&out[..4], &[0, 255, 0, 255]);
        assert!(out.iter().all(|&v| v == 0 || v == 255));
    }

    #[test]
    fn edges_drop_deposits() {
        // A single cell has no neighbours to push into.
        assert_eq!(reference_dither(1, 1, &[128]), vec![0]);
        assert_eq!(reference_dither(1, 1, &[129]), vec![255]);
    }
}
