//! Image file I/O for wavedither grids.
//!
//! [`load_grid`] decodes any format the `image` crate understands into a
//! zero-bordered [`PaddedGrid`](wavedither_core::PaddedGrid);
//! [`save_grid`] writes a grid's interior back out as 8-bit grayscale, and
//! [`save_difference`] writes a red-marked one-bit difference of two grids.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;

pub use codec::{
    decode_grid, encode_difference, encode_grid, load_grid, save_difference, save_grid,
};
pub use error::IoError;
pub use image::ImageFormat;
