//! The wavefront scan must match the sequential scan bit for bit.

use proptest::prelude::*;
use wavedither_core::{diffuse_sequential, DiffusionKernel, PaddedGrid};
use wavedither_engine::{diffuse_parallel, DitherEngine, EngineConfig, Progress};
use wavedither_test_utils::{constant_grid, reference_dither_grid, scenario_grid};

fn parallel(grid: &PaddedGrid, workers: usize) -> PaddedGrid {
    let mut out = grid.clone();
    let progress = Progress::new();
    progress.begin(out.height());
    diffuse_parallel(&mut out, &DiffusionKernel::floyd_steinberg(), workers, &progress);
    assert_eq!(progress.rows_done(), out.height());
    out
}

fn sequential(grid: &PaddedGrid) -> PaddedGrid {
    let mut out = grid.clone();
    diffuse_sequential(&mut out, &DiffusionKernel::floyd_steinberg());
    out
}

#[test]
fn scenario_is_identical_for_one_two_three_workers() {
    let input = scenario_grid();
    let one = parallel(&input, 1);
    let two = parallel(&input, 2);
    let three = parallel(&input, 3);
    assert_eq!(one.to_interior_vec(), two.to_interior_vec());
    assert_eq!(one.to_interior_vec(), three.to_interior_vec());
    assert_eq!(one.to_interior_vec(), reference_dither_grid(&input));
    assert!(one.is_binary());
}

#[test]
fn scenario_output_is_pinned() {
    let input = scenario_grid();
    let expected = [[0, 255, 0, 255]; 4].concat();
    assert_eq!(sequential(&input).to_interior_vec(), expected);
    for workers in 1..=5 {
        assert_eq!(parallel(&input, workers).to_interior_vec(), expected, "workers = {workers}");
    }
}

#[test]
fn constant_200_saturates_for_one_two_four_workers() {
    let input = constant_grid(4, 4, 200);
    for workers in [1, 2, 4] {
        let out = parallel(&input, workers);
        assert_eq!(out.to_interior_vec(), vec![255; 16], "workers = {workers}");
    }
}

#[test]
fn all_white_is_a_fixed_point() {
    let input = constant_grid(9, 7, 255);
    for workers in 1..=8 {
        let out = parallel(&input, workers);
        assert_eq!(
            out.to_interior_vec(),
            input.to_interior_vec(),
            "workers = {workers}"
        );
    }
}

#[test]
fn padded_scan_matches_unpadded_reference() {
    let values: Vec<i32> = (0..40 * 25).map(|i| (i * 37 + i / 40 * 11) % 256).collect();
    let input = PaddedGrid::from_interior(40, 25, &values).unwrap();
    assert_eq!(sequential(&input).to_interior_vec(), reference_dither_grid(&input));
}

#[test]
fn more_workers_than_rows() {
    let input = PaddedGrid::from_rows(&[[10, 150, 250, 90, 129, 128]]).unwrap();
    let expected = sequential(&input);
    for workers in [2, 5, 16] {
        assert_eq!(parallel(&input, workers), expected, "workers = {workers}");
    }
}

#[test]
fn wide_grid_under_contention() {
    let values: Vec<i32> = (0..257 * 33).map(|i| (i * 7919 % 256) as i32).collect();
    let input = PaddedGrid::from_interior(257, 33, &values).unwrap();
    let expected = sequential(&input);
    for workers in [2, 3, 8] {
        assert_eq!(parallel(&input, workers), expected, "workers = {workers}");
    }
}

#[test]
fn engine_matches_reference_at_default_config() {
    let values: Vec<i32> = (0..64 * 48).map(|i| (i % 251) as i32).collect();
    let input = PaddedGrid::from_interior(64, 48, &values).unwrap();
    let report = DitherEngine::new(EngineConfig::default()).run(input.clone());
    assert_eq!(report.grid.to_interior_vec(), reference_dither_grid(&input));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn any_grid_any_worker_count(
        (width, height, values) in (1usize..24, 1usize..24).prop_flat_map(|(w, h)| {
            (Just(w), Just(h), prop::collection::vec(0i32..=255, w * h))
        }),
        workers in 1usize..7,
    ) {
        let input = PaddedGrid::from_interior(width, height, &values).unwrap();
        let out = parallel(&input, workers);
        prop_assert!(out.is_binary());
        prop_assert_eq!(out, sequential(&input));
    }
}
