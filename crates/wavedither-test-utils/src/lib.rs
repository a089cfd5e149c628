//! Test utilities for wavedither development.
//!
//! Provides the standard grid fixtures used across the workspace's tests and
//! [`reference_dither`], an independent unpadded implementation of
//! Floyd-Steinberg that every other scan path is checked against.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod oracle;

pub use fixtures::{constant_grid, scenario_grid, SCENARIO};
pub use oracle::{reference_dither, reference_dither_grid};
