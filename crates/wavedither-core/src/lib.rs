//! Core types for the wavedither error-diffusion workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! padded intensity grid, the floor-division primitive every error fragment
//! is scaled with, the Floyd-Steinberg diffusion kernel, the single-threaded
//! reference scan, and grid comparison helpers.
//!
//! The parallel wavefront engine lives in `wavedither-engine`; it applies
//! the same [`DiffusionKernel`] through the [`CellAccess`] seam so both
//! paths share one arithmetic definition.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod error;
pub mod grid;
pub mod kernel;
pub mod math;
pub mod scan;

pub use compare::{
    binary_difference_rgb, binary_similarity, compare_interior, first_mismatch, Mismatch,
    MismatchReport, DIFF_MARK,
};
pub use error::GridError;
pub use grid::PaddedGrid;
pub use kernel::{CellAccess, DiffusionKernel, Direction, HIGH, LOW, THRESHOLD};
pub use math::floor_div;
pub use scan::{diffuse_row, diffuse_sequential};
