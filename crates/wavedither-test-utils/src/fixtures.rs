//! Reusable grid fixtures.

use wavedither_core::PaddedGrid;

/// The mixed-intensity 4x4 grid used by the worker-count equivalence tests.
pub const SCENARIO: [[i32; 4]; 4] = [
    [100, 200, 50, 210],
    [30, 220, 10, 240],
    [0, 255, 5, 190],
    [60, 130, 20, 250],
];

/// [`SCENARIO`] loaded into a padded grid.
pub fn scenario_grid() -> PaddedGrid {
    PaddedGrid::from_rows(&SCENARIO).expect("scenario is a valid 4x4 grid")
}

/// A `width x height` grid with every interior cell set to `value`.
///
/// Panics on an empty shape; fixtures are always non-empty.
pub fn constant_grid(width: usize, height: usize, value: i32) -> PaddedGrid {
    PaddedGrid::from_interior(width, height, &vec![value; width * height])
        .expect("constant fixture shape must be non-empty")
}
