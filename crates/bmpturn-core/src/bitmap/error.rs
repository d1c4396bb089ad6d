//! Error types for bitmap decoding, encoding and file access.

use std::fmt;
use thiserror::Error;

/// Broad category of a [`BitmapError`].
///
/// Every failure aborts the current run; the kind only tells the caller
/// what went wrong so it can be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Truncated or malformed header, or a pixel format we don't handle.
    Format,
    /// The byte source could not be read or the sink could not be written.
    Io,
    /// Dimensions or pixel data size are inconsistent.
    Geometry,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Format => "format error",
            ErrorKind::Io => "I/O error",
            ErrorKind::Geometry => "geometry error",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while reading or writing a bitmap.
#[derive(Debug, Error)]
pub enum BitmapError {
    /// Fewer bytes than a full header were available.
    #[error("Truncated header: expected {expected} bytes, got {actual}")]
    TruncatedHeader { expected: usize, actual: usize },

    /// Only 24 bits per pixel is supported.
    #[error("Unsupported bit depth: {0} bits per pixel (only 24 is supported)")]
    UnsupportedBitDepth(u16),

    /// Only uncompressed (BI_RGB) bitmaps are supported.
    #[error("Unsupported compression method: {0} (only uncompressed is supported)")]
    UnsupportedCompression(u32),

    /// The planes field must be 1.
    #[error("Unsupported plane count: {0} (must be 1)")]
    UnsupportedPlanes(u16),

    /// Pixel data would start inside the header.
    #[error("Invalid pixel data offset: {0} (must be at least {min})", min = super::HEADER_LEN)]
    InvalidDataOffset(u32),

    /// Width or height is zero or negative.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be positive")]
    InvalidDimensions { width: i64, height: i64 },

    /// The pixel buffer does not hold `row_size * height` bytes.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    PixelDataSize { expected: usize, actual: usize },

    /// The header declares less pixel data than the geometry requires.
    #[error("Declared pixel data size {declared} is smaller than the {required} bytes required")]
    DataSizeMismatch { declared: u32, required: usize },

    /// I/O error while reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BitmapError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BitmapError::TruncatedHeader { .. }
            | BitmapError::UnsupportedBitDepth(_)
            | BitmapError::UnsupportedCompression(_)
            | BitmapError::UnsupportedPlanes(_)
            | BitmapError::InvalidDataOffset(_) => ErrorKind::Format,
            BitmapError::InvalidDimensions { .. }
            | BitmapError::PixelDataSize { .. }
            | BitmapError::DataSizeMismatch { .. } => ErrorKind::Geometry,
            BitmapError::Io(_) => ErrorKind::Io,
        }
    }
}
