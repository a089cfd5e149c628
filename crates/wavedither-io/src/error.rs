//! Error types for image loading and saving.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use wavedither_core::GridError;

/// Errors from [`load_grid`](crate::load_grid) and
/// [`save_grid`](crate::save_grid).
#[derive(Debug)]
pub enum IoError {
    /// The file could not be read or written.
    File {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },
    /// The bytes could not be decoded, or the grid could not be encoded.
    Image {
        /// Path being decoded or encoded, if any.
        path: Option<PathBuf>,
        /// Underlying codec error.
        source: image::ImageError,
    },
    /// The output path has no extension the codec recognizes.
    UnsupportedFormat {
        /// Offending path.
        path: PathBuf,
    },
    /// The grid is wider or taller than an image can be.
    TooLarge {
        /// Logical width.
        width: usize,
        /// Logical height.
        height: usize,
    },
    /// The decoded image did not form a valid grid.
    Grid(GridError),
}

impl IoError {
    pub(crate) fn image_at(path: &std::path::Path, source: image::ImageError) -> Self {
        Self::Image {
            path: Some(path.to_path_buf()),
            source,
        }
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Image {
                path: Some(path),
                source,
            } => write!(f, "{}: {source}", path.display()),
            Self::Image { path: None, source } => write!(f, "image codec: {source}"),
            Self::UnsupportedFormat { path } => {
                write!(f, "{}: unrecognized image extension", path.display())
            }
            Self::TooLarge { width, height } => {
                write!(f, "grid {width}x{height} exceeds the maximum image size")
            }
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl Error for IoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::File { source, .. } => Some(source),
            Self::Image { source, .. } => Some(source),
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for IoError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
