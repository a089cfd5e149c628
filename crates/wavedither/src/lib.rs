//! Wavedither: bit-exact parallel Floyd-Steinberg dithering.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the wavedither sub-crates. For most users, adding `wavedither` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use wavedither::prelude::*;
//!
//! let grid = PaddedGrid::from_rows(&[
//!     [100, 200, 50, 210],
//!     [30, 220, 10, 240],
//!     [0, 255, 5, 190],
//!     [60, 130, 20, 250],
//! ])
//! .unwrap();
//!
//! let mut reference = grid.clone();
//! diffuse_sequential(&mut reference, &DiffusionKernel::floyd_steinberg());
//!
//! let report = DitherEngine::new(EngineConfig::with_workers(3)).run(grid);
//! assert!(report.grid.is_binary());
//! assert_eq!(report.grid.to_interior_vec(), reference.to_interior_vec());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `wavedither-core` | Padded grid, kernel, floor division, comparison |
//! | [`engine`] | `wavedither-engine` | Wavefront engine, completion gate, workers |
//! | [`io`] | `wavedither-io` | Image file loading and saving |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grid, kernel and comparison types (`wavedither-core`).
pub use wavedither_core as types;

/// The parallel engine (`wavedither-engine`).
///
/// [`engine::DitherEngine`] is the entry point; [`engine::diffuse_parallel`]
/// runs the raw protocol with an exact worker count.
pub use wavedither_engine as engine;

/// Image file I/O (`wavedither-io`).
pub use wavedither_io as io;

/// Common imports for typical usage.
///
/// ```rust
/// use wavedither::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use wavedither_core::{
        binary_similarity, diffuse_sequential, floor_div, DiffusionKernel, GridError,
        PaddedGrid,
    };

    // Engine
    pub use wavedither_engine::{DitherEngine, EngineConfig, Progress, RunMetrics, RunReport};

    // I/O
    pub use wavedither_io::{load_grid, save_grid, IoError};
}
