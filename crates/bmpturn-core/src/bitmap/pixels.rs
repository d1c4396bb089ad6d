//! Row-padded 24-bit pixel storage.

use super::error::BitmapError;
use super::header::{buffer_len, row_size, BITS_PER_PIXEL, BYTES_PER_PIXEL};

/// Raw pixel data of a 24-bit bitmap.
///
/// Pixels are 3 interleaved channel bytes, stored row by row in the order
/// they appear in the file. Each row is [`row_stride`](Self::row_stride)
/// bytes long; bytes past `width * 3` are padding and kept at zero by every
/// transform in this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zero-filled buffer.
    ///
    /// # Panics
    ///
    /// Panics if `row_size * height` does not fit in `usize`. Use
    /// [`from_raw`](Self::from_raw) for sizes that come from untrusted input.
    pub fn new(width: u32, height: u32) -> Self {
        let len = buffer_len(width, height)
            .unwrap_or_else(|| panic!("{width}x{height} pixel buffer overflows usize"));
        Self {
            width,
            height,
            data: vec![0u8; len],
        }
    }

    /// Wrap existing row-padded pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`BitmapError::InvalidDimensions`] if the buffer size overflows
    /// `usize`, and [`BitmapError::PixelDataSize`] if `data` is not exactly
    /// `row_size * height` bytes long.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BitmapError> {
        let expected = buffer_len(width, height).ok_or_else(|| too_large(width, height))?;
        if data.len() != expected {
            return Err(BitmapError::PixelDataSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a buffer from tightly packed pixels (3 bytes each, no row padding).
    pub fn from_packed_rgb(width: u32, height: u32, packed: &[u8]) -> Result<Self, BitmapError> {
        buffer_len(width, height).ok_or_else(|| too_large(width, height))?;
        let packed_row = width as usize * BYTES_PER_PIXEL;
        let expected = packed_row * height as usize;
        if packed.len() != expected {
            return Err(BitmapError::PixelDataSize {
                expected,
                actual: packed.len(),
            });
        }

        let mut buffer = Self::new(width, height);
        if packed_row == 0 {
            return Ok(buffer);
        }
        let stride = buffer.row_stride();
        for (dst, src) in buffer
            .data
            .chunks_exact_mut(stride)
            .zip(packed.chunks_exact(packed_row))
        {
            dst[..packed_row].copy_from_slice(src);
        }
        Ok(buffer)
    }

    /// Copy the pixels out without row padding.
    pub fn to_packed_rgb(&self) -> Vec<u8> {
        let packed_row = self.width as usize * BYTES_PER_PIXEL;
        let mut packed = Vec::with_capacity(packed_row * self.height as usize);
        for row in self.rows() {
            packed.extend_from_slice(row);
        }
        packed
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row including padding.
    #[inline]
    pub fn row_stride(&self) -> usize {
        row_size(self.width, BITS_PER_PIXEL)
    }

    /// Byte offset of the first channel of pixel `(x, y)`.
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.row_stride() + x as usize * BYTES_PER_PIXEL
    }

    /// Channel triple at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Overwrite the channel triple at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: [u8; 3]) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let i = self.offset(x, y);
        self.data[i..i + BYTES_PER_PIXEL].copy_from_slice(&value);
    }

    /// Iterate over rows, each trimmed to `width * 3` bytes.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let packed_row = self.width as usize * BYTES_PER_PIXEL;
        // chunks_exact panics on a zero chunk size
        let stride = self.row_stride().max(1);
        self.data
            .chunks_exact(stride)
            .take(if packed_row == 0 { 0 } else { self.height as usize })
            .map(move |row| &row[..packed_row])
    }

    /// The raw row-padded bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the raw bytes, used by the transforms that fill a
    /// freshly allocated buffer.
    #[inline]
    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return the raw bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

fn too_large(width: u32, height: u32) -> BitmapError {
    BitmapError::InvalidDimensions {
        width: i64::from(width),
        height: i64::from(height),
    }
}
