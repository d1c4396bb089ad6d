//! Whole-file bitmap reading and writing.

use std::fs;
use std::path::Path;

use log::{debug, warn};

use super::error::BitmapError;
use super::header::{BitmapHeader, HEADER_LEN, INFO_HEADER_LEN};
use super::pixels::PixelBuffer;

/// A decoded 24-bit bitmap: header plus pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Header as read from the file (or as updated by a transform).
    pub header: BitmapHeader,
    /// Pixel data, sized from the header geometry.
    pub pixels: PixelBuffer,
}

impl Bitmap {
    /// Create a bitmap with a fresh header for the given pixels.
    pub fn from_pixels(pixels: PixelBuffer) -> Self {
        Self {
            header: BitmapHeader::new_rgb24(pixels.width(), pixels.height()),
            pixels,
        }
    }

    /// Decode a complete bitmap file.
    ///
    /// Pixel data is read from `data_offset`, `row_size * height` bytes.
    /// Anything after that is ignored.
    ///
    /// # Errors
    ///
    /// * Format errors from [`BitmapHeader::decode`]
    /// * [`BitmapError::InvalidDimensions`] for non-positive width or height,
    ///   or a pixel buffer too large to address
    /// * [`BitmapError::InvalidDataOffset`] if pixel data would start inside
    ///   the header
    /// * [`BitmapError::DataSizeMismatch`] if a non-zero declared data size is
    ///   smaller than the geometry requires
    /// * [`BitmapError::PixelDataSize`] if the file is too short
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BitmapError> {
        let header = BitmapHeader::decode(bytes)?;

        if header.width <= 0 || header.height <= 0 {
            return Err(BitmapError::InvalidDimensions {
                width: header.width as i64,
                height: header.height as i64,
            });
        }
        if (header.data_offset as usize) < HEADER_LEN {
            return Err(BitmapError::InvalidDataOffset(header.data_offset));
        }

        let width = header.width as u32;
        let height = header.height as u32;
        let required = header
            .checked_pixel_buffer_size()
            .ok_or(BitmapError::InvalidDimensions {
                width: i64::from(header.width),
                height: i64::from(header.height),
            })?;

        if header.data_size != 0 {
            if (header.data_size as usize) < required {
                return Err(BitmapError::DataSizeMismatch {
                    declared: header.data_size,
                    required,
                });
            }
            if header.data_size as usize > required {
                warn!(
                    "Declared pixel data size {} exceeds the {} bytes needed for {}x{}, ignoring the rest",
                    header.data_size, required, width, height
                );
            }
        }

        let start = header.data_offset as usize;
        let available = bytes.len().saturating_sub(start);
        let data = start
            .checked_add(required)
            .and_then(|end| bytes.get(start..end))
            .ok_or(BitmapError::PixelDataSize {
                expected: required,
                actual: available,
            })?;

        debug!(
            "Decoded {}x{} bitmap, row size {}, {} pixel bytes at offset {}",
            width,
            height,
            header.row_size(),
            required,
            start
        );

        let pixels = PixelBuffer::from_raw(width, height, data.to_vec())?;
        Ok(Self { header, pixels })
    }

    /// Encode to file bytes: the header followed directly by the pixel data.
    ///
    /// The written header always describes this layout: `data_offset` is 54,
    /// `header_size` is 40, and `file_size`/`data_size` match the pixel data.
    /// Width and height come from the pixel buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut header = self
            .header
            .with_dimensions(self.pixels.width(), self.pixels.height());
        header.header_size = INFO_HEADER_LEN;

        let pixel_bytes = self.pixels.as_bytes();
        let mut out = Vec::with_capacity(HEADER_LEN + pixel_bytes.len());
        out.extend_from_slice(&header.encode());
        out.extend_from_slice(pixel_bytes);
        out
    }

    /// Read and decode a bitmap file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BitmapError> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Encode and write a bitmap file, returning the number of bytes written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<usize, BitmapError> {
        let bytes = self.to_bytes();
        fs::write(path.as_ref(), &bytes)?;
        Ok(bytes.len())
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}
