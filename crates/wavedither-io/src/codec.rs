//! Grid <-> image file conversion.
//!
//! Loading expands any decoded image to RGBA8 and keeps the red channel,
//! which for grayscale input equals the luminance. Saving clamps every
//! interior cell to `[0, 255]` and writes 8-bit grayscale in the format
//! named by the file extension. A difference image of two grids is written
//! as RGB8 the same way. Output bytes are fully encoded in memory before the
//! file is created, so a failed encode leaves nothing on disk.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use tracing::debug;
use wavedither_core::{binary_difference_rgb, PaddedGrid};

use crate::error::IoError;

fn attach_path(err: IoError, path: &Path) -> IoError {
    match err {
        IoError::Image { path: None, source } => IoError::image_at(path, source),
        other => other,
    }
}

/// Decode an in-memory image into a zero-bordered grid.
pub fn decode_grid(bytes: &[u8]) -> Result<PaddedGrid, IoError> {
    let img = image::load_from_memory(bytes)
        .map_err(|source| IoError::Image { path: None, source })?;
    let rgba = img.to_rgba8();
    let mut grid = PaddedGrid::new(rgba.width() as usize, rgba.height() as usize)?;
    for (x, y, pixel) in rgba.enumerate_pixels() {
        grid.set_interior(y as usize, x as usize, i32::from(pixel[0]));
    }
    Ok(grid)
}

/// Read and decode the image at `path`.
pub fn load_grid(path: impl AsRef<Path>) -> Result<PaddedGrid, IoError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| IoError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = decode_grid(&bytes).map_err(|e| attach_path(e, path))?;
    debug!(
        path = %path.display(),
        width = grid.width(),
        height = grid.height(),
        "loaded grid"
    );
    Ok(grid)
}

fn image_dims(grid: &PaddedGrid) -> Result<(u32, u32), IoError> {
    let too_large = || IoError::TooLarge {
        width: grid.width(),
        height: grid.height(),
    };
    let width = u32::try_from(grid.width()).map_err(|_| too_large())?;
    let height = u32::try_from(grid.height()).map_err(|_| too_large())?;
    Ok((width, height))
}

fn encode_image(img: DynamicImage, format: ImageFormat) -> Result<Vec<u8>, IoError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format)
        .map_err(|source| IoError::Image { path: None, source })?;
    Ok(bytes)
}

fn write_encoded(
    path: &Path,
    encode: impl FnOnce(ImageFormat) -> Result<Vec<u8>, IoError>,
) -> Result<usize, IoError> {
    let format = ImageFormat::from_path(path).map_err(|_| IoError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let bytes = encode(format).map_err(|e| attach_path(e, path))?;
    fs::write(path, &bytes).map_err(|source| IoError::File {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(bytes.len())
}

/// Encode the grid's clamped interior as 8-bit grayscale.
pub fn encode_grid(grid: &PaddedGrid, format: ImageFormat) -> Result<Vec<u8>, IoError> {
    let (width, height) = image_dims(grid)?;
    let img = GrayImage::from_raw(width, height, grid.clamped_interior()).ok_or(
        IoError::TooLarge {
            width: grid.width(),
            height: grid.height(),
        },
    )?;
    encode_image(DynamicImage::ImageLuma8(img), format)
}

/// Encode the grid and write it to `path`, choosing the format from the
/// extension.
pub fn save_grid(grid: &PaddedGrid, path: impl AsRef<Path>) -> Result<(), IoError> {
    let path = path.as_ref();
    let bytes = write_encoded(path, |format| encode_grid(grid, format))?;
    debug!(path = %path.display(), bytes, "saved grid");
    Ok(())
}

/// Encode the one-bit difference of `base` and `other` as RGB8.
///
/// Agreeing cells are black or white from `base`; disagreeing cells are
/// [`DIFF_MARK`](wavedither_core::DIFF_MARK) red.
pub fn encode_difference(
    base: &PaddedGrid,
    other: &PaddedGrid,
    format: ImageFormat,
) -> Result<Vec<u8>, IoError> {
    let rgb = binary_difference_rgb(base, other)?;
    let (width, height) = image_dims(base)?;
    let img = RgbImage::from_raw(width, height, rgb).ok_or(IoError::TooLarge {
        width: base.width(),
        height: base.height(),
    })?;
    encode_image(DynamicImage::ImageRgb8(img), format)
}

/// Write the difference image of `base` and `other` to `path`.
pub fn save_difference(
    base: &PaddedGrid,
    other: &PaddedGrid,
    path: impl AsRef<Path>,
) -> Result<(), IoError> {
    let path = path.as_ref();
    let bytes = write_encoded(path, |format| encode_difference(base, other, format))?;
    debug!(path = %path.display(), bytes, "saved difference image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_bytes_round_trip() {
        let grid = PaddedGrid::from_rows(&[[0, 255, 17], [128, 3, 250]]).unwrap();
        let bytes = encode_grid(&grid, ImageFormat::Png).unwrap();
        let back = decode_grid(&bytes).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn encoding_clamps_out_of_range_cells() {
        let grid = PaddedGrid::from_rows(&[[-90, 400], [255, 0]]).unwrap();
        let bytes = encode_grid(&grid, ImageFormat::Png).unwrap();
        let back = decode_grid(&bytes).unwrap();
        assert_eq!(back.to_interior_vec(), vec![0, 255, 255, 0]);
    }

    #[test]
    fn decoding_takes_the_red_channel() {
        let img = image::RgbaImage::from_raw(2, 1, vec![10, 200, 200, 255, 90, 0, 0, 255]).unwrap();
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        let grid = decode_grid(&bytes).unwrap();
        assert_eq!(grid.interior_row(0), &[10, 90]);
    }

    #[test]
    fn garbage_bytes_are_an_image_error() {
        match decode_grid(b"definitely not an image") {
            Err(IoError::Image { path: None, .. }) => {}
            other => panic!("expected Image error, got {other:?}"),
        }
    }
}
